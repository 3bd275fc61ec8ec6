/// Bearer-token middleware behavior: anonymous requests pass through to
/// public routes, invalid credentials are rejected outright, and handlers
/// requiring `AuthUser` turn a missing identity into 401.
use actix_web::{test, web, App, HttpResponse};
use uuid::Uuid;

use blog_service::middleware::{AuthMiddleware, AuthUser};

async fn public_probe() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"public": true}))
}

async fn protected_probe(user: AuthUser) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"username": user.username}))
}

fn init_jwt() {
    let _ = auth_core::jwt::initialize_secret("middleware-test-secret");
}

macro_rules! test_app {
    () => {
        test::init_service(
            App::new().service(
                web::scope("")
                    .wrap(AuthMiddleware)
                    .route("/public", web::get().to(public_probe))
                    .route("/protected", web::get().to(protected_probe)),
            ),
        )
        .await
    };
}

#[actix_web::test]
async fn anonymous_request_reaches_public_route() {
    init_jwt();
    let app = test_app!();

    let req = test::TestRequest::get().uri("/public").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
}

#[actix_web::test]
async fn anonymous_request_gets_401_on_protected_route() {
    init_jwt();
    let app = test_app!();

    let req = test::TestRequest::get().uri("/protected").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn garbage_token_is_rejected_even_on_public_route() {
    init_jwt();
    let app = test_app!();

    let req = test::TestRequest::get()
        .uri("/public")
        .insert_header(("Authorization", "Bearer not-a-real-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn wrong_scheme_is_rejected() {
    init_jwt();
    let app = test_app!();

    let req = test::TestRequest::get()
        .uri("/public")
        .insert_header(("Authorization", "Basic YWxpY2U6cHc="))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn valid_access_token_reaches_protected_route() {
    init_jwt();
    let app = test_app!();

    let token = auth_core::jwt::generate_access_token(Uuid::new_v4(), "alice")
        .expect("token generation");

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["username"], "alice");
}

#[actix_web::test]
async fn refresh_token_is_not_a_bearer_credential() {
    init_jwt();
    let app = test_app!();

    let token = auth_core::jwt::generate_refresh_token(Uuid::new_v4(), "alice")
        .expect("token generation");

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
}
