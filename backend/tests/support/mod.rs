//! Shared helpers for HTTP integration tests.

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use serde_json::{Value, json};

use backend::inbound::http::{self, health::HealthState, state::HttpState};
use backend::server::{Adapters, build_state};

/// Build a test application over a fresh in-memory adapter set.
pub fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".into())
        .cookie_secure(false)
        .cookie_same_site(SameSite::Lax)
        .build();
    let health = std::sync::Arc::new(HealthState::new());
    health.mark_ready();

    App::new()
        .wrap(session)
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(health))
        .configure(http::configure)
}

/// Fresh HTTP state over empty in-memory adapters.
pub fn fresh_state() -> HttpState {
    build_state(&Adapters::new())
}

/// Send a request, returning status, any refreshed session cookie, and the
/// JSON body (null when empty).
pub async fn send<S, B>(
    app: &S,
    req: test::TestRequest,
) -> (StatusCode, Option<Cookie<'static>>, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status();
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .map(|c| c.into_owned());
    let body = test::read_body(resp).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, cookie, value)
}

/// Register a user and return their wire body plus session cookie.
pub async fn register<S, B>(
    app: &S,
    name: &str,
    email: &str,
    role: &str,
) -> (Value, Cookie<'static>)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, cookie, body) = send(
        app,
        test::TestRequest::post().uri("/api/users").set_json(json!({
            "name": name,
            "email": email,
            "phone": "+541100000000",
            "role": role,
            "address": "Av. Corrientes 1234",
            "city": "Buenos Aires",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");
    (
        body,
        cookie.unwrap_or_else(|| panic!("registration must set a session cookie")),
    )
}

/// POST a JSON body with a session cookie.
pub fn post_as(cookie: &Cookie<'static>, uri: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri(uri)
        .cookie(cookie.clone())
        .set_json(body)
}

/// POST without a body, with a session cookie.
pub fn post_empty_as(cookie: &Cookie<'static>, uri: &str) -> test::TestRequest {
    test::TestRequest::post().uri(uri).cookie(cookie.clone())
}

/// GET with a session cookie.
pub fn get_as(cookie: &Cookie<'static>, uri: &str) -> test::TestRequest {
    test::TestRequest::get().uri(uri).cookie(cookie.clone())
}

/// A one-package join body.
pub fn one_package(description: &str) -> Value {
    json!({
        "packages": [{
            "width": 30.0,
            "height": 30.0,
            "length": 30.0,
            "weight": 5.0,
            "description": description,
        }]
    })
}

/// Extract the `code` field from an error response's details.
pub fn error_code(body: &Value) -> Option<&str> {
    body.get("details")
        .and_then(|d| d.get("code"))
        .and_then(Value::as_str)
}
