//! Review HTTP handlers.
//!
//! ```text
//! GET  /api/freights/{id}/reviews
//! POST /api/freights/{id}/reviews
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::DomainError;
use crate::domain::ports::{AddReviewRequest, ReviewPayload};
use crate::domain::UserId;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_user_role;

/// One review on the wire.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewBody {
    /// Review id.
    #[schema(format = "uuid")]
    pub id: String,
    /// The freight this review is scoped to.
    #[schema(format = "uuid")]
    pub freight_id: String,
    /// Author id.
    #[schema(format = "uuid")]
    pub author_id: String,
    /// Target id.
    #[schema(format = "uuid")]
    pub target_id: String,
    /// The target's role on the freight.
    #[schema(example = "transporter")]
    pub role: String,
    /// Star rating, 1–5.
    pub rating: u8,
    /// Free-text comment.
    pub comment: String,
    /// Submission timestamp.
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<&ReviewPayload> for ReviewBody {
    fn from(value: &ReviewPayload) -> Self {
        Self {
            id: value.id.to_string(),
            freight_id: value.freight_id.to_string(),
            author_id: value.author_id.to_string(),
            target_id: value.target_id.to_string(),
            role: value.role.as_str().to_owned(),
            rating: value.rating,
            comment: value.comment.clone(),
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// Request payload for recording a review.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddReviewRequestBody {
    /// Who the review is about.
    #[schema(format = "uuid")]
    pub target_id: String,
    /// The target's role on the freight.
    #[schema(example = "transporter")]
    pub role: String,
    /// Star rating, 1–5.
    pub rating: u8,
    /// Free-text comment; may be empty.
    #[serde(default)]
    pub comment: String,
}

/// List reviews recorded for a freight.
#[utoipa::path(
    get,
    path = "/api/freights/{id}/reviews",
    params(("id" = Uuid, Path, description = "Freight id")),
    responses(
        (status = 200, description = "Reviews, newest first", body = [ReviewBody]),
    ),
    tags = ["reviews"],
    operation_id = "listReviews"
)]
#[get("/api/freights/{id}/reviews")]
pub async fn list_reviews(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Vec<ReviewBody>>> {
    let reviews = state.reviews_query.list_reviews(path.into_inner()).await?;
    Ok(web::Json(reviews.iter().map(ReviewBody::from).collect()))
}

/// Record a review for a delivered freight.
#[utoipa::path(
    post,
    path = "/api/freights/{id}/reviews",
    params(("id" = Uuid, Path, description = "Freight id")),
    request_body = AddReviewRequestBody,
    responses(
        (status = 201, description = "Review recorded", body = ReviewBody),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Caller is not a party to the freight", body = ErrorSchema),
        (status = 409, description = "Duplicate review or freight not delivered", body = ErrorSchema),
    ),
    tags = ["reviews"],
    operation_id = "addReview"
)]
#[post("/api/freights/{id}/reviews")]
pub async fn add_review(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    body: web::Json<AddReviewRequestBody>,
) -> ApiResult<HttpResponse> {
    let author_id = session.require_user_id()?;
    let body = body.into_inner();

    let target_id = UserId::new(&body.target_id).map_err(|_| {
        DomainError::invalid_request("targetId must be a valid UUID").with_details(
            serde_json::json!({ "field": "targetId", "code": "invalid_uuid" }),
        )
    })?;
    let role = parse_user_role(&body.role)?;

    let response = state
        .reviews
        .add_review(AddReviewRequest {
            freight_id: path.into_inner(),
            author_id,
            target_id,
            role,
            rating: body.rating,
            comment: body.comment,
        })
        .await?;
    Ok(HttpResponse::Created().json(ReviewBody::from(&response.review)))
}
