//! Review ledger entities.
//!
//! Reviews are append-only and scoped to one freight; uniqueness of
//! (freight, author, target) is enforced by the review service at write
//! time, not by this type.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::user::{UserId, UserRole};

/// Validation errors returned by [`Review::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewValidationError {
    /// The rating was outside `1..=5`.
    RatingOutOfRange {
        /// The rejected value.
        value: u8,
    },
    /// Author and target were the same user.
    SelfReview,
    /// The target role must be customer or transporter.
    UnreviewableRole {
        /// The rejected role.
        role: UserRole,
    },
}

impl fmt::Display for ReviewValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RatingOutOfRange { value } => {
                write!(f, "rating must be between 1 and 5, got {value}")
            }
            Self::SelfReview => write!(f, "author and target must differ"),
            Self::UnreviewableRole { role } => {
                write!(f, "reviews cannot target the {role} role")
            }
        }
    }
}

impl std::error::Error for ReviewValidationError {}

/// Input payload for [`Review::new`].
#[derive(Debug, Clone)]
pub struct ReviewDraft {
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
    /// Free-text comment; may be empty.
    pub comment: String,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
}

/// One rating from one party to another, scoped to one freight.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    id: Uuid,
    freight_id: Uuid,
    author_id: UserId,
    target_id: UserId,
    role: UserRole,
    rating: u8,
    comment: String,
    created_at: DateTime<Utc>,
}

impl Review {
    /// Create a validated review.
    pub fn new(draft: ReviewDraft) -> Result<Self, ReviewValidationError> {
        if !(1..=5).contains(&draft.rating) {
            return Err(ReviewValidationError::RatingOutOfRange {
                value: draft.rating,
            });
        }
        if draft.author_id == draft.target_id {
            return Err(ReviewValidationError::SelfReview);
        }
        if draft.role == UserRole::Admin {
            return Err(ReviewValidationError::UnreviewableRole { role: draft.role });
        }
        Ok(Self {
            id: draft.id,
            freight_id: draft.freight_id,
            author_id: draft.author_id,
            target_id: draft.target_id,
            role: draft.role,
            rating: draft.rating,
            comment: draft.comment,
            created_at: draft.created_at,
        })
    }

    /// Stable identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The freight this review is scoped to.
    pub fn freight_id(&self) -> Uuid {
        self.freight_id
    }

    /// Who wrote the review.
    pub fn author_id(&self) -> UserId {
        self.author_id
    }

    /// Who the review is about.
    pub fn target_id(&self) -> UserId {
        self.target_id
    }

    /// The target's role on the freight.
    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Star rating, `1..=5`.
    pub fn rating(&self) -> u8 {
        self.rating
    }

    /// Free-text comment.
    pub fn comment(&self) -> &str {
        self.comment.as_str()
    }

    /// Submission timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    fn sample_draft() -> ReviewDraft {
        ReviewDraft {
            id: Uuid::new_v4(),
            freight_id: Uuid::new_v4(),
            author_id: UserId::random(),
            target_id: UserId::random(),
            role: UserRole::Transporter,
            rating: 4,
            comment: "Muy puntual".to_owned(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    fn rejects_out_of_range_ratings(#[case] rating: u8) {
        let mut draft = sample_draft();
        draft.rating = rating;
        let err = Review::new(draft).expect_err("rating out of range");
        assert_eq!(err, ReviewValidationError::RatingOutOfRange { value: rating });
    }

    #[rstest]
    #[case(1)]
    #[case(5)]
    fn accepts_boundary_ratings(#[case] rating: u8) {
        let mut draft = sample_draft();
        draft.rating = rating;
        let review = Review::new(draft).expect("boundary rating accepted");
        assert_eq!(review.rating(), rating);
    }

    #[rstest]
    fn rejects_self_reviews() {
        let mut draft = sample_draft();
        draft.target_id = draft.author_id;
        let err = Review::new(draft).expect_err("self review");
        assert_eq!(err, ReviewValidationError::SelfReview);
    }

    #[rstest]
    fn rejects_admin_targets() {
        let mut draft = sample_draft();
        draft.role = UserRole::Admin;
        let err = Review::new(draft).expect_err("admin target");
        assert_eq!(
            err,
            ReviewValidationError::UnreviewableRole {
                role: UserRole::Admin
            }
        );
    }

    #[rstest]
    fn empty_comments_are_allowed() {
        let mut draft = sample_draft();
        draft.comment = String::new();
        let review = Review::new(draft).expect("empty comment accepted");
        assert!(review.comment().is_empty());
    }
}
