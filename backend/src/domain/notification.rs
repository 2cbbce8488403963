//! Per-user notification log entries.
//!
//! The log is append-only; the only mutable bit is the `read` flag, which
//! moves from `false` to `true` exactly once.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::UserId;

/// What triggered a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A new freight request relevant to the recipient.
    FreightRequest,
    /// A transporter accepted a freight.
    FreightAccepted,
    /// A freight was cancelled.
    FreightCancelled,
    /// A delivery-sequence update for one of the recipient's packages.
    Delivery,
    /// A payment was submitted or confirmed.
    Payment,
    /// A review was recorded about the recipient.
    Review,
}

impl NotificationKind {
    /// Stable string form used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FreightRequest => "freight_request",
            Self::FreightAccepted => "freight_accepted",
            Self::FreightCancelled => "freight_cancelled",
            Self::Delivery => "delivery",
            Self::Payment => "payment",
            Self::Review => "review",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse error for [`NotificationKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNotificationKindError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseNotificationKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid notification kind: {}", self.input)
    }
}

impl std::error::Error for ParseNotificationKindError {}

impl FromStr for NotificationKind {
    type Err = ParseNotificationKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "freight_request" => Ok(Self::FreightRequest),
            "freight_accepted" => Ok(Self::FreightAccepted),
            "freight_cancelled" => Ok(Self::FreightCancelled),
            "delivery" => Ok(Self::Delivery),
            "payment" => Ok(Self::Payment),
            "review" => Ok(Self::Review),
            _ => Err(ParseNotificationKindError {
                input: value.to_owned(),
            }),
        }
    }
}

/// One message in a user's notification log.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    id: Uuid,
    user_id: UserId,
    kind: NotificationKind,
    title: String,
    message: String,
    related_id: Option<Uuid>,
    read: bool,
    created_at: DateTime<Utc>,
}

impl Notification {
    /// Create an unread notification.
    pub fn new(
        id: Uuid,
        user_id: UserId,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        related_id: Option<Uuid>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            kind,
            title: title.into(),
            message: message.into(),
            related_id,
            read: false,
            created_at,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Recipient.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// What triggered the notification.
    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Short headline.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Message body.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// The triggering freight, when applicable.
    pub fn related_id(&self) -> Option<Uuid> {
        self.related_id
    }

    /// Whether the recipient has seen it.
    pub fn is_read(&self) -> bool {
        self.read
    }

    /// Emission timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Flip the read flag; idempotent once set.
    pub fn mark_read(&mut self) {
        self.read = true;
    }
}
