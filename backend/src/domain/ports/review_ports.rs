//! Driving ports for the review ledger.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DomainError, Review, UserId, UserRole};

/// Serializable review representation for driving ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPayload {
    /// Stable identifier.
    pub id: Uuid,
    /// The freight this review is scoped to.
    pub freight_id: Uuid,
    /// Who wrote the review.
    pub author_id: UserId,
    /// Who the review is about.
    pub target_id: UserId,
    /// The target's role on the freight.
    pub role: UserRole,
    /// Star rating, `1..=5`.
    pub rating: u8,
    /// Free-text comment.
    pub comment: String,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&Review> for ReviewPayload {
    fn from(value: &Review) -> Self {
        Self {
            id: value.id(),
            freight_id: value.freight_id(),
            author_id: value.author_id(),
            target_id: value.target_id(),
            role: value.role(),
            rating: value.rating(),
            comment: value.comment().to_owned(),
            created_at: value.created_at(),
        }
    }
}

/// Request to record a review.
#[derive(Debug, Clone)]
pub struct AddReviewRequest {
    /// The freight this review is scoped to; must be `delivered`.
    pub freight_id: Uuid,
    /// Authenticated author.
    pub author_id: UserId,
    /// Who the review is about.
    pub target_id: UserId,
    /// The target's role as stated by the caller; validated against the
    /// freight's actual parties.
    pub role: UserRole,
    /// Star rating, `1..=5`.
    pub rating: u8,
    /// Free-text comment; may be empty.
    pub comment: String,
}

/// Response from recording a review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddReviewResponse {
    /// The recorded review.
    pub review: ReviewPayload,
}

/// Driving port for review writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewCommand: Send + Sync {
    /// Record a review; at most one per (freight, author, target).
    async fn add_review(&self, request: AddReviewRequest) -> Result<AddReviewResponse, DomainError>;
}

/// Driving port for review reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewQuery: Send + Sync {
    /// List reviews for a freight, newest first.
    async fn list_reviews(&self, freight_id: Uuid) -> Result<Vec<ReviewPayload>, DomainError>;
}

/// Fixture query implementation for tests without review data.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReviewQuery;

#[async_trait]
impl ReviewQuery for FixtureReviewQuery {
    async fn list_reviews(&self, _freight_id: Uuid) -> Result<Vec<ReviewPayload>, DomainError> {
        Ok(Vec::new())
    }
}
