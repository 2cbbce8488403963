//! User directory HTTP handlers.
//!
//! ```text
//! POST /api/users
//! POST /api/login
//! POST /api/logout
//! GET  /api/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{LoginRequest, RegisterUserRequest, UserPayload};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_location, parse_user_role};

/// One directory entry on the wire.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    /// User id.
    #[schema(format = "uuid")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Role the user acts under.
    #[schema(example = "customer")]
    pub role: String,
    /// Aggregate rating in `0.0..=5.0`.
    pub rating: f64,
    /// Number of ratings backing `rating`.
    pub ratings_count: u32,
    /// Registration timestamp.
    #[schema(format = "date-time")]
    pub created_at: String,
    /// Optional avatar reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Optional street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl From<&UserPayload> for UserBody {
    fn from(value: &UserPayload) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.clone(),
            email: value.email.clone(),
            phone: value.phone.clone(),
            role: value.role.as_str().to_owned(),
            rating: value.rating,
            ratings_count: value.ratings_count,
            created_at: value.created_at.to_rfc3339(),
            avatar: value.avatar.clone(),
            address: value.address.clone(),
        }
    }
}

/// Request payload for registration.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequestBody {
    /// Display name.
    pub name: String,
    /// Contact email; unique across the directory.
    pub email: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: String,
    /// Role: `customer` or `transporter`.
    #[schema(example = "customer")]
    pub role: String,
    /// Optional street address used when joining shared freights.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Optional home city for the address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// Request payload for login.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequestBody {
    /// The registered email to look up.
    pub email: String,
}

/// Register a user and sign the session in.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegisterRequestBody,
    responses(
        (status = 201, description = "User registered", body = UserBody),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 403, description = "Role cannot self-register", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/api/users")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Json<RegisterRequestBody>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    let role = parse_user_role(&body.role)?;
    let location = match (&body.address, &body.city) {
        (Some(address), Some(city)) => Some(parse_location(
            "address",
            address.clone(),
            city.clone(),
            None,
            None,
        )?),
        _ => None,
    };

    let response = state
        .users
        .register(RegisterUserRequest {
            name: body.name,
            email: body.email,
            phone: body.phone,
            role,
            address: body.address,
            location,
        })
        .await?;

    session.sign_in(response.user.id)?;
    Ok(HttpResponse::Created().json(UserBody::from(&response.user)))
}

/// Look up a directory entry by email and sign the session in.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequestBody,
    responses(
        (status = 200, description = "Signed in", body = UserBody),
        (status = 404, description = "Unknown email", body = ErrorSchema),
    ),
    tags = ["users"],
    operation_id = "login"
)]
#[post("/api/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Json<LoginRequestBody>,
) -> ApiResult<web::Json<UserBody>> {
    let response = state
        .users
        .login(LoginRequest {
            email: body.into_inner().email,
        })
        .await?;
    session.sign_in(response.user.id)?;
    Ok(web::Json(UserBody::from(&response.user)))
}

/// Drop the session.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses((status = 204, description = "Signed out")),
    tags = ["users"],
    operation_id = "logout"
)]
#[post("/api/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.sign_out();
    HttpResponse::NoContent().finish()
}

/// Fetch the authenticated user's directory entry.
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "The authenticated user", body = UserBody),
        (status = 401, description = "Login required", body = ErrorSchema),
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/api/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserBody>> {
    let user_id = session.require_user_id()?;
    let payload = state.users_query.get_user(user_id).await?;
    Ok(web::Json(UserBody::from(&payload)))
}
