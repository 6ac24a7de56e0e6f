//! Integration tests for the send-code endpoint

use std::sync::Arc;

use actix_web::{test, web, App};
use async_trait::async_trait;
use serde_json::{json, Value};

use otp_api::routes::otp::{send_code, AppState};
use otp_core::errors::SyncFailure;
use otp_core::services::issuance::{
    ExternalStoreTrait, IssuanceConfig, IssuanceService, MailerTrait,
};
use otp_core::store::OtpStore;

struct TestMailer {
    fail: bool,
}

#[async_trait]
impl MailerTrait for TestMailer {
    async fn send_code_email(
        &self,
        _to: &str,
        _code: &str,
        _validity_minutes: i64,
    ) -> Result<String, String> {
        if self.fail {
            Err("gateway refused the message".to_string())
        } else {
            Ok("msg_test_1".to_string())
        }
    }

    fn is_valid_email(&self, email: &str) -> bool {
        otp_shared::utils::is_valid_email(email)
    }
}

struct TestExternalStore {
    publish_failure: Option<SyncFailure>,
}

#[async_trait]
impl ExternalStoreTrait for TestExternalStore {
    async fn publish(&self, _key: &str, _identity: &str, _code: &str) -> Result<(), SyncFailure> {
        match &self.publish_failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }

    async fn clear(&self, _key: &str) -> Result<(), SyncFailure> {
        Ok(())
    }
}

fn app_state(
    mailer: TestMailer,
    external: TestExternalStore,
) -> web::Data<AppState<TestMailer, TestExternalStore>> {
    let service = IssuanceService::new(
        Arc::new(mailer),
        Arc::new(external),
        Arc::new(OtpStore::new()),
        IssuanceConfig::default(),
    );
    web::Data::new(AppState {
        issuance_service: Arc::new(service),
    })
}

#[actix_web::test]
async fn test_send_code_success() {
    let state = app_state(
        TestMailer { fail: false },
        TestExternalStore {
            publish_failure: None,
        },
    );

    let app = test::init_service(App::new().app_data(state).route(
        "/api/v1/otp/send-code",
        web::post().to(send_code::<TestMailer, TestExternalStore>),
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/send-code")
        .set_json(json!({"email": "user@example.com"}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("sent successfully"));
    assert!(body["data"]["expires_at"].is_string());
    assert!(body["meta"]["request_id"].is_string());
    assert!(body.get("error").is_none());
}

#[actix_web::test]
async fn test_send_code_invalid_email_returns_400() {
    let state = app_state(
        TestMailer { fail: false },
        TestExternalStore {
            publish_failure: None,
        },
    );

    let app = test::init_service(App::new().app_data(state).route(
        "/api/v1/otp/send-code",
        web::post().to(send_code::<TestMailer, TestExternalStore>),
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/send-code")
        .set_json(json!({"email": "not-an-email"}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"]["code"], "INVALID_IDENTITY");
}

#[actix_web::test]
async fn test_send_code_delivery_failure_returns_503() {
    let state = app_state(
        TestMailer { fail: true },
        TestExternalStore {
            publish_failure: None,
        },
    );

    let app = test::init_service(App::new().app_data(state).route(
        "/api/v1/otp/send-code",
        web::post().to(send_code::<TestMailer, TestExternalStore>),
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/send-code")
        .set_json(json!({"email": "user@example.com"}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 503);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"]["code"], "DELIVERY_ERROR");
}

#[actix_web::test]
async fn test_send_code_mirror_failure_is_partial_success() {
    let state = app_state(
        TestMailer { fail: false },
        TestExternalStore {
            publish_failure: Some(SyncFailure::Transport("sheet store unreachable".to_string())),
        },
    );

    let app = test::init_service(App::new().app_data(state).route(
        "/api/v1/otp/send-code",
        web::post().to(send_code::<TestMailer, TestExternalStore>),
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/send-code")
        .set_json(json!({"email": "user@example.com"}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    // The caller holds a valid code even though the mirror is stale
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "partial");
    assert_eq!(body["error"]["code"], "SYNC_ERROR");
    assert!(body["data"]["expires_at"].is_string());
}

#[actix_web::test]
async fn test_send_code_missing_target_is_partial_success() {
    let state = app_state(
        TestMailer { fail: false },
        TestExternalStore {
            publish_failure: Some(SyncFailure::TargetNotFound {
                key: "user_example_com".to_string(),
            }),
        },
    );

    let app = test::init_service(App::new().app_data(state).route(
        "/api/v1/otp/send-code",
        web::post().to(send_code::<TestMailer, TestExternalStore>),
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/send-code")
        .set_json(json!({"email": "user@example.com"}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "partial");
    assert_eq!(body["error"]["code"], "SYNC_ERROR");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("not found"));
}
