//! Port for the per-user notification log.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{Notification, UserId};

/// Errors raised by notification log adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationRepositoryError {
    /// Repository connection could not be established.
    #[error("notification repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("notification repository query failed: {message}")]
    Query {
        /// Adapter-provided failure detail.
        message: String,
    },
}

impl NotificationRepositoryError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for appending to and reading the notification log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Append a notification to the log.
    async fn append(&self, notification: &Notification)
    -> Result<(), NotificationRepositoryError>;

    /// List a user's notifications, newest first.
    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Notification>, NotificationRepositoryError>;

    /// Fetch one notification by id.
    async fn find_by_id(
        &self,
        notification_id: Uuid,
    ) -> Result<Option<Notification>, NotificationRepositoryError>;

    /// Set the read flag; returns the updated notification, or `None` when
    /// no such notification exists.
    async fn mark_read(
        &self,
        notification_id: Uuid,
    ) -> Result<Option<Notification>, NotificationRepositoryError>;
}

/// Fixture implementation for tests that do not exercise the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNotificationRepository;

#[async_trait]
impl NotificationRepository for FixtureNotificationRepository {
    async fn append(
        &self,
        _notification: &Notification,
    ) -> Result<(), NotificationRepositoryError> {
        Ok(())
    }

    async fn list_for_user(
        &self,
        _user_id: UserId,
    ) -> Result<Vec<Notification>, NotificationRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(
        &self,
        _notification_id: Uuid,
    ) -> Result<Option<Notification>, NotificationRepositoryError> {
        Ok(None)
    }

    async fn mark_read(
        &self,
        _notification_id: Uuid,
    ) -> Result<Option<Notification>, NotificationRepositoryError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_list_returns_empty() {
        let repo = FixtureNotificationRepository;
        let listed = repo
            .list_for_user(UserId::random())
            .await
            .expect("fixture list succeeds");
        assert!(listed.is_empty());
    }
}
