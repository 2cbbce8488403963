//! Notification HTTP handlers.
//!
//! ```text
//! GET  /api/notifications
//! POST /api/notifications/{id}/read
//! ```

use actix_web::{get, post, web};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{MarkNotificationReadRequest, NotificationPayload};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// One notification on the wire.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationBody {
    /// Notification id.
    #[schema(format = "uuid")]
    pub id: String,
    /// Recipient id.
    #[schema(format = "uuid")]
    pub user_id: String,
    /// What triggered the notification.
    #[schema(example = "delivery")]
    pub kind: String,
    /// Short headline.
    pub title: String,
    /// Message body.
    pub message: String,
    /// The triggering freight, when applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(format = "uuid")]
    pub related_id: Option<String>,
    /// Whether the recipient has seen it.
    pub read: bool,
    /// Emission timestamp.
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<&NotificationPayload> for NotificationBody {
    fn from(value: &NotificationPayload) -> Self {
        Self {
            id: value.id.to_string(),
            user_id: value.user_id.to_string(),
            kind: value.kind.as_str().to_owned(),
            title: value.title.clone(),
            message: value.message.clone(),
            related_id: value.related_id.map(|id| id.to_string()),
            read: value.read,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// List the authenticated user's notifications.
#[utoipa::path(
    get,
    path = "/api/notifications",
    responses(
        (status = 200, description = "Notifications, newest first", body = [NotificationBody]),
        (status = 401, description = "Login required", body = ErrorSchema),
    ),
    tags = ["notifications"],
    operation_id = "listNotifications"
)]
#[get("/api/notifications")]
pub async fn list_notifications(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<NotificationBody>>> {
    let user_id = session.require_user_id()?;
    let notifications = state.notifications_query.list_notifications(user_id).await?;
    Ok(web::Json(
        notifications.iter().map(NotificationBody::from).collect(),
    ))
}

/// Mark one of the authenticated user's notifications as read.
#[utoipa::path(
    post,
    path = "/api/notifications/{id}/read",
    params(("id" = Uuid, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Notification updated", body = NotificationBody),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Caller is not the recipient", body = ErrorSchema),
        (status = 404, description = "Unknown notification", body = ErrorSchema),
    ),
    tags = ["notifications"],
    operation_id = "markNotificationRead"
)]
#[post("/api/notifications/{id}/read")]
pub async fn mark_notification_read(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<NotificationBody>> {
    let user_id = session.require_user_id()?;
    let payload = state
        .notifications
        .mark_read(MarkNotificationReadRequest {
            notification_id: path.into_inner(),
            user_id,
        })
        .await?;
    Ok(web::Json(NotificationBody::from(&payload)))
}
