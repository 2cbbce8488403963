//! Driving ports for the notification log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DomainError, Notification, NotificationKind, UserId};

/// Serializable notification representation for driving ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    /// Stable identifier.
    pub id: Uuid,
    /// Recipient.
    pub user_id: UserId,
    /// What triggered the notification.
    pub kind: NotificationKind,
    /// Short headline.
    pub title: String,
    /// Message body.
    pub message: String,
    /// The triggering freight, when applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_id: Option<Uuid>,
    /// Whether the recipient has seen it.
    pub read: bool,
    /// Emission timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&Notification> for NotificationPayload {
    fn from(value: &Notification) -> Self {
        Self {
            id: value.id(),
            user_id: value.user_id(),
            kind: value.kind(),
            title: value.title().to_owned(),
            message: value.message().to_owned(),
            related_id: value.related_id(),
            read: value.is_read(),
            created_at: value.created_at(),
        }
    }
}

/// Request to mark one notification as read.
#[derive(Debug, Clone)]
pub struct MarkNotificationReadRequest {
    /// The notification being acknowledged.
    pub notification_id: Uuid,
    /// Authenticated caller; must be the recipient.
    pub user_id: UserId,
}

/// Driving port for notification reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationQuery: Send + Sync {
    /// List the caller's notifications, newest first.
    async fn list_notifications(
        &self,
        user_id: UserId,
    ) -> Result<Vec<NotificationPayload>, DomainError>;
}

/// Driving port for notification writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationCommand: Send + Sync {
    /// Mark one of the caller's notifications as read; idempotent once set.
    async fn mark_read(
        &self,
        request: MarkNotificationReadRequest,
    ) -> Result<NotificationPayload, DomainError>;
}

/// Fixture query implementation for tests without notification data.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNotificationQuery;

#[async_trait]
impl NotificationQuery for FixtureNotificationQuery {
    async fn list_notifications(
        &self,
        _user_id: UserId,
    ) -> Result<Vec<NotificationPayload>, DomainError> {
        Ok(Vec::new())
    }
}
