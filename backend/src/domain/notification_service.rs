//! Notification log domain services.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{
    MarkNotificationReadRequest, NotificationCommand, NotificationPayload, NotificationQuery,
    NotificationRepository, NotificationRepositoryError,
};
use crate::domain::{DomainError, UserId};

fn map_notification_repository_error(error: NotificationRepositoryError) -> DomainError {
    match error {
        NotificationRepositoryError::Connection { message } => DomainError::service_unavailable(
            format!("notification repository unavailable: {message}"),
        ),
        NotificationRepositoryError::Query { message } => {
            DomainError::internal(format!("notification repository error: {message}"))
        }
    }
}

/// Notification service implementing the notification driving ports.
#[derive(Clone)]
pub struct NotificationService<N> {
    notification_repo: Arc<N>,
}

impl<N> NotificationService<N> {
    /// Create a new service over the notification log.
    pub fn new(notification_repo: Arc<N>) -> Self {
        Self { notification_repo }
    }
}

#[async_trait]
impl<N> NotificationQuery for NotificationService<N>
where
    N: NotificationRepository,
{
    async fn list_notifications(
        &self,
        user_id: UserId,
    ) -> Result<Vec<NotificationPayload>, DomainError> {
        let notifications = self
            .notification_repo
            .list_for_user(user_id)
            .await
            .map_err(map_notification_repository_error)?;
        Ok(notifications.iter().map(NotificationPayload::from).collect())
    }
}

#[async_trait]
impl<N> NotificationCommand for NotificationService<N>
where
    N: NotificationRepository,
{
    async fn mark_read(
        &self,
        request: MarkNotificationReadRequest,
    ) -> Result<NotificationPayload, DomainError> {
        let notification = self
            .notification_repo
            .find_by_id(request.notification_id)
            .await
            .map_err(map_notification_repository_error)?
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "notification {} not found",
                    request.notification_id
                ))
            })?;

        if notification.user_id() != request.user_id {
            return Err(
                DomainError::forbidden("only the recipient may mark a notification read")
                    .with_details(json!({ "code": "not_recipient" })),
            );
        }

        let updated = self
            .notification_repo
            .mark_read(request.notification_id)
            .await
            .map_err(map_notification_repository_error)?
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "notification {} not found",
                    request.notification_id
                ))
            })?;

        Ok(NotificationPayload::from(&updated))
    }
}

#[cfg(test)]
#[path = "notification_service_tests.rs"]
mod tests;
