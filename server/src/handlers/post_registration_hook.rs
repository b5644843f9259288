use portico_api::validation::{validate_account_name, validate_email};

use crate::handlers::prelude::*;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AccountInfo {
    pub email: String,
    pub username: String,
}

#[post("/hooks/after_registration")]
pub async fn post_after_registration_hook(info: web::Json<AccountInfo>) -> HttpResponse {
    check_account(info.into_inner())
}

#[post("/hooks/after_settings")]
pub async fn post_after_settings_hook(info: web::Json<AccountInfo>) -> HttpResponse {
    // Intentionally the same as after registration.
    check_account(info.into_inner())
}

fn check_account(info: AccountInfo) -> HttpResponse {
    let email = info.email.trim().to_lowercase();
    let mut errors = FieldErrors::new();
    errors.check("email", validate_email(&email));
    errors.check("username", validate_account_name(&info.username));
    if !errors.is_empty() {
        let result = errors.into_result();
        log::debug!(
            "Rejected identity traits, invalid fields: {:?}",
            result.invalid_fields()
        );
        return HttpResponse::BadRequest().json(FormResponse::<AccountInfo>::rejected(result));
    }
    HttpResponse::Ok().json(FormResponse::ok(AccountInfo {
        email,
        username: info.username,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test;

    use super::AccountInfo;
    use crate::action::tests::FakeIdentity;
    use crate::config::BodySize;
    use crate::server::build_state;
    use crate::server::tests::{test_app, test_config};
    use portico_api::form::FormResponse;

    #[actix_web::test]
    async fn valid_traits_are_normalized() {
        let state = build_state(test_config(), Arc::new(FakeIdentity::default())).unwrap();
        let app = test_app!(state).await;
        let req = test::TestRequest::post()
            .uri("/hooks/after_registration")
            .set_json(serde_json::json!({"email": "Bob@Example.com", "username": "bob_1"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: FormResponse<AccountInfo> = test::read_body_json(resp).await;
        assert!(body.result.is_success());
        assert_eq!(
            body.data,
            Some(AccountInfo {
                email: "bob@example.com".to_owned(),
                username: "bob_1".to_owned(),
            })
        );
    }

    #[actix_web::test]
    async fn invalid_traits_report_field_errors() {
        let state = build_state(test_config(), Arc::new(FakeIdentity::default())).unwrap();
        let app = test_app!(state).await;
        let req = test::TestRequest::post()
            .uri("/hooks/after_settings")
            .set_json(serde_json::json!({"email": "bob", "username": "b o b"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: FormResponse<AccountInfo> = test::read_body_json(resp).await;
        assert!(!body.result.is_success());
        assert_eq!(body.result.field_errors("email").len(), 1);
        assert_eq!(body.result.field_errors("username").len(), 1);
        assert_eq!(body.data, None);
    }

    #[actix_web::test]
    async fn malformed_json_is_bad_request() {
        let state = build_state(test_config(), Arc::new(FakeIdentity::default())).unwrap();
        let app = test_app!(state).await;
        let req = test::TestRequest::post()
            .uri("/hooks/after_registration")
            .insert_header(actix_web::http::header::ContentType::json())
            .set_payload("{\"email\":")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn oversized_payload_is_refused() {
        let mut config = test_config();
        config.app.server_actions.body_size_limit = BodySize::parse("1kb").unwrap();
        let state = build_state(config, Arc::new(FakeIdentity::default())).unwrap();
        let app = test_app!(state).await;
        let req = test::TestRequest::post()
            .uri("/hooks/after_registration")
            .set_json(serde_json::json!({"email": "bob@example.com", "username": "x".repeat(2048)}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
