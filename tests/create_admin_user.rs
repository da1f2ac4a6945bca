use serde_json::json;
use url::Url;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kyroo_admin::api::client::ApiError;
use kyroo_admin::op::{Op, OpContext};
use kyroo_admin::ops::admin_user::{CreateAdminUser, CreateAdminUserError};
use kyroo_admin::Config;

const SERVICE_ROLE_KEY: &str = "test-service-role-key";

fn context(server: &MockServer) -> OpContext {
    let config = Config {
        supabase_url: Url::parse(&server.uri()).unwrap(),
        service_role_key: SERVICE_ROLE_KEY.to_string(),
    };
    OpContext::new(config).unwrap()
}

fn create_admin_user() -> CreateAdminUser {
    CreateAdminUser {
        email: "ops@example.com".to_string(),
        password: "sup3r-secret".to_string(),
        display_name: None,
        update_existing: false,
    }
}

fn user_body(id: Uuid) -> serde_json::Value {
    json!({
        "id": id,
        "aud": "authenticated",
        "email": "ops@example.com",
        "created_at": "2024-05-14T10:00:00Z",
        "user_metadata": { "display_name": "ops" }
    })
}

#[tokio::test]
async fn creates_user_and_sets_admin_role() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/auth/v1/admin/users"))
        .and(header("apikey", SERVICE_ROLE_KEY))
        .and(header(
            "authorization",
            format!("Bearer {}", SERVICE_ROLE_KEY).as_str(),
        ))
        .and(body_json(json!({
            "email": "ops@example.com",
            "password": "sup3r-secret",
            "email_confirm": true,
            "user_metadata": { "display_name": "ops" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body(user_id)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("id", format!("eq.{}", user_id).as_str()))
        .and(body_json(json!({
            "role": "admin",
            "display_name": "ops"
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let output = create_admin_user()
        .execute(&context(&server))
        .await
        .unwrap();

    assert!(output.contains("Created admin user: ops@example.com"));
    assert!(output.contains(&user_id.to_string()));
    assert!(!output.contains("Warning"));
}

#[tokio::test]
async fn role_update_failure_is_reported_as_warning() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/auth/v1/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body(user_id)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/profiles"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "internal error" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    // The user was created, so the run still succeeds
    let output = create_admin_user()
        .execute(&context(&server))
        .await
        .unwrap();

    assert!(output.contains("Created user: ops@example.com"));
    assert!(output.contains("Warning"));
}

#[tokio::test]
async fn create_failure_skips_role_update() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/admin/users"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "msg": "invalid password" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let err = create_admin_user()
        .execute(&context(&server))
        .await
        .unwrap_err();

    match err {
        CreateAdminUserError::Api(ApiError::HttpStatus(status, body)) => {
            assert_eq!(status.as_u16(), 422);
            assert!(body.contains("invalid password"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn update_existing_elevates_registered_user() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/auth/v1/admin/users"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "msg": "User already registered" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/v1/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [
                { "id": Uuid::new_v4(), "email": "someone-else@example.com" },
                { "id": user_id, "email": "ops@example.com" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("id", format!("eq.{}", user_id).as_str()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let op = CreateAdminUser {
        update_existing: true,
        ..create_admin_user()
    };
    let output = op.execute(&context(&server)).await.unwrap();

    assert!(output.contains("Elevated existing user ops@example.com"));
    assert!(output.contains(&user_id.to_string()));
}

#[tokio::test]
async fn update_existing_without_flag_still_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/admin/users"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "msg": "User already registered" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/v1/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "users": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let err = create_admin_user()
        .execute(&context(&server))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CreateAdminUserError::Api(ApiError::HttpStatus(_, _))
    ));
}

#[tokio::test]
async fn update_existing_role_update_failure_is_fatal() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/auth/v1/admin/users"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "msg": "User already registered" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/v1/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{ "id": user_id, "email": "ops@example.com" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/profiles"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "internal error" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let op = CreateAdminUser {
        update_existing: true,
        ..create_admin_user()
    };
    let err = op.execute(&context(&server)).await.unwrap_err();

    assert!(matches!(
        err,
        CreateAdminUserError::Api(ApiError::HttpStatus(_, _))
    ));
}

#[tokio::test]
async fn explicit_display_name_is_used_verbatim() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/auth/v1/admin/users"))
        .and(body_json(json!({
            "email": "ops@example.com",
            "password": "sup3r-secret",
            "email_confirm": true,
            "user_metadata": { "display_name": "Operations" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body(user_id)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/profiles"))
        .and(body_json(json!({
            "role": "admin",
            "display_name": "Operations"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let op = CreateAdminUser {
        display_name: Some("Operations".to_string()),
        ..create_admin_user()
    };
    let output = op.execute(&context(&server)).await.unwrap();

    assert!(output.contains("display name: Operations"));
}
