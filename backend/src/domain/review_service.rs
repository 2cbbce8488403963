//! Review domain services.
//!
//! Reviews are only accepted for delivered freights, only between parties of
//! that freight, and at most once per (freight, author, target). The
//! uniqueness constraint lives here at the write boundary, not in the
//! caller.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use crate::domain::freight_service::{map_freight_repository_error, map_freight_update_error};
use crate::domain::ports::{
    AddReviewRequest, AddReviewResponse, FreightRepository, NotificationRepository, ReviewCommand,
    ReviewPayload, ReviewQuery, ReviewRepository, ReviewRepositoryError,
};
use crate::domain::{
    DomainError, FreightRequest, FreightStatus, Notification, NotificationKind, Review,
    ReviewDraft, ReviewValidationError, UserId, UserRole,
};

fn map_review_repository_error(error: ReviewRepositoryError) -> DomainError {
    match error {
        ReviewRepositoryError::Connection { message } => {
            DomainError::service_unavailable(format!("review repository unavailable: {message}"))
        }
        ReviewRepositoryError::Query { message } => {
            DomainError::internal(format!("review repository error: {message}"))
        }
    }
}

fn map_review_validation_error(error: &ReviewValidationError) -> DomainError {
    match error {
        ReviewValidationError::RatingOutOfRange { value } => {
            DomainError::invalid_request("rating must be between 1 and 5").with_details(json!({
                "field": "rating",
                "value": value,
                "code": "rating_out_of_range",
            }))
        }
        ReviewValidationError::SelfReview => {
            DomainError::invalid_request("author and target must differ")
                .with_details(json!({ "code": "self_review" }))
        }
        ReviewValidationError::UnreviewableRole { role } => {
            DomainError::invalid_request(format!("reviews cannot target the {role} role"))
                .with_details(json!({ "code": "unreviewable_role" }))
        }
    }
}

/// Review service implementing the review driving ports.
#[derive(Clone)]
pub struct ReviewService<R, F, N> {
    review_repo: Arc<R>,
    freight_repo: Arc<F>,
    notification_repo: Arc<N>,
    clock: Arc<dyn Clock>,
}

impl<R, F, N> ReviewService<R, F, N> {
    /// Create a new service over the given adapters.
    pub fn new(
        review_repo: Arc<R>,
        freight_repo: Arc<F>,
        notification_repo: Arc<N>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            review_repo,
            freight_repo,
            notification_repo,
            clock,
        }
    }
}

impl<R, F, N> ReviewService<R, F, N>
where
    R: ReviewRepository,
    F: FreightRepository,
    N: NotificationRepository,
{
    /// Work out which role the target plays for this author on this
    /// freight, rejecting pairs that are not parties to it.
    fn derive_target_role(
        freight: &FreightRequest,
        author_id: UserId,
        target_id: UserId,
    ) -> Result<UserRole, DomainError> {
        let transporter_id = freight.transporter_id();

        if Some(author_id) == transporter_id {
            if freight.involves_customer(target_id) {
                return Ok(UserRole::Customer);
            }
            return Err(DomainError::invalid_request(
                "target is not a customer on this freight",
            )
            .with_details(json!({ "code": "target_not_involved" })));
        }

        if freight.involves_customer(author_id) {
            if Some(target_id) == transporter_id {
                return Ok(UserRole::Transporter);
            }
            return Err(DomainError::invalid_request(
                "customers can only review the freight's transporter",
            )
            .with_details(json!({ "code": "target_not_transporter" })));
        }

        Err(
            DomainError::forbidden("only parties to the freight may review it")
                .with_details(json!({ "code": "not_involved" })),
        )
    }
}

#[async_trait]
impl<R, F, N> ReviewCommand for ReviewService<R, F, N>
where
    R: ReviewRepository,
    F: FreightRepository,
    N: NotificationRepository,
{
    async fn add_review(
        &self,
        request: AddReviewRequest,
    ) -> Result<AddReviewResponse, DomainError> {
        let freight = self
            .freight_repo
            .find_by_id(request.freight_id)
            .await
            .map_err(map_freight_repository_error)?
            .ok_or_else(|| {
                map_freight_update_error(crate::domain::ports::FreightUpdateError::NotFound {
                    freight_id: request.freight_id,
                })
            })?;

        if freight.status() != FreightStatus::Delivered {
            return Err(DomainError::conflict(
                "reviews are only accepted once the freight is delivered",
            )
            .with_details(json!({
                "code": "freight_not_delivered",
                "status": freight.status().as_str(),
            })));
        }

        let derived_role =
            Self::derive_target_role(&freight, request.author_id, request.target_id)?;
        if request.role != derived_role {
            return Err(DomainError::invalid_request(format!(
                "target plays the {derived_role} role on this freight"
            ))
            .with_details(json!({ "code": "role_mismatch" })));
        }

        let exists = self
            .review_repo
            .exists(request.freight_id, request.author_id, request.target_id)
            .await
            .map_err(map_review_repository_error)?;
        if exists {
            return Err(DomainError::conflict(
                "a review for this freight and target already exists",
            )
            .with_details(json!({ "code": "duplicate_review" })));
        }

        let review = Review::new(ReviewDraft {
            id: Uuid::new_v4(),
            freight_id: request.freight_id,
            author_id: request.author_id,
            target_id: request.target_id,
            role: derived_role,
            rating: request.rating,
            comment: request.comment,
            created_at: self.clock.utc(),
        })
        .map_err(|err| map_review_validation_error(&err))?;

        self.review_repo
            .append(&review)
            .await
            .map_err(map_review_repository_error)?;

        let notification = Notification::new(
            Uuid::new_v4(),
            request.target_id,
            NotificationKind::Review,
            "New review",
            format!("You received a {}-star review", review.rating()),
            Some(request.freight_id),
            self.clock.utc(),
        );
        if let Err(error) = self.notification_repo.append(&notification).await {
            warn!(user_id = %request.target_id, %error, "notification append failed");
        }

        Ok(AddReviewResponse {
            review: ReviewPayload::from(&review),
        })
    }
}

#[async_trait]
impl<R, F, N> ReviewQuery for ReviewService<R, F, N>
where
    R: ReviewRepository,
    F: FreightRepository,
    N: NotificationRepository,
{
    async fn list_reviews(&self, freight_id: Uuid) -> Result<Vec<ReviewPayload>, DomainError> {
        let reviews = self
            .review_repo
            .list_for_freight(freight_id)
            .await
            .map_err(map_review_repository_error)?;
        Ok(reviews.iter().map(ReviewPayload::from).collect())
    }
}

#[cfg(test)]
#[path = "review_service_tests.rs"]
mod tests;
