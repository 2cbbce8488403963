//! Port for freight aggregate persistence.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{FreightError, FreightMutation, FreightMutationOutcome, FreightRequest};

/// Errors raised by freight repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FreightRepositoryError {
    /// Repository connection could not be established.
    #[error("freight repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("freight repository query failed: {message}")]
    Query {
        /// Adapter-provided failure detail.
        message: String,
    },
}

impl FreightRepositoryError {
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

/// Errors raised when applying a [`FreightMutation`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FreightUpdateError {
    /// No freight with this id exists.
    #[error("freight {freight_id} not found")]
    NotFound {
        /// The missing freight id.
        freight_id: Uuid,
    },
    /// A domain guard rejected the mutation; the stored aggregate is
    /// untouched.
    #[error(transparent)]
    Rejected(#[from] FreightError),
    /// The adapter itself failed.
    #[error(transparent)]
    Repository(#[from] FreightRepositoryError),
}

/// A successfully applied mutation: the committed aggregate plus what the
/// mutation produced.
#[derive(Debug, Clone, PartialEq)]
pub struct FreightUpdate {
    /// The aggregate after the mutation.
    pub freight: FreightRequest,
    /// What the mutation produced.
    pub outcome: FreightMutationOutcome,
}

/// Port for storing and mutating freight aggregates.
///
/// `update` must serialize mutations per freight id and commit
/// all-or-nothing: when the mutation is rejected the stored aggregate is
/// unchanged.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FreightRepository: Send + Sync {
    /// Persist a newly created freight.
    async fn insert(&self, freight: &FreightRequest) -> Result<(), FreightRepositoryError>;

    /// Fetch a freight by id.
    async fn find_by_id(
        &self,
        freight_id: Uuid,
    ) -> Result<Option<FreightRequest>, FreightRepositoryError>;

    /// List all freights, newest first.
    async fn list(&self) -> Result<Vec<FreightRequest>, FreightRepositoryError>;

    /// Apply one guarded mutation atomically.
    async fn update(
        &self,
        freight_id: Uuid,
        mutation: FreightMutation,
    ) -> Result<FreightUpdate, FreightUpdateError>;
}

/// Fixture implementation for tests that do not exercise freight persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFreightRepository;

#[async_trait]
impl FreightRepository for FixtureFreightRepository {
    async fn insert(&self, _freight: &FreightRequest) -> Result<(), FreightRepositoryError> {
        Ok(())
    }

    async fn find_by_id(
        &self,
        _freight_id: Uuid,
    ) -> Result<Option<FreightRequest>, FreightRepositoryError> {
        Ok(None)
    }

    async fn list(&self) -> Result<Vec<FreightRequest>, FreightRepositoryError> {
        Ok(Vec::new())
    }

    async fn update(
        &self,
        freight_id: Uuid,
        _mutation: FreightMutation,
    ) -> Result<FreightUpdate, FreightUpdateError> {
        Err(FreightUpdateError::NotFound { freight_id })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;
    use crate::domain::UserId;

    #[rstest]
    #[tokio::test]
    async fn fixture_update_reports_not_found() {
        let repo = FixtureFreightRepository;
        let freight_id = Uuid::new_v4();
        let err = repo
            .update(
                freight_id,
                FreightMutation::Cancel {
                    actor: UserId::random(),
                },
            )
            .await
            .expect_err("fixture holds nothing");
        assert_eq!(err, FreightUpdateError::NotFound { freight_id });
    }

    #[rstest]
    fn repository_error_helpers_format_messages() {
        let err = FreightRepositoryError::query("store poisoned");
        assert!(err.to_string().contains("store poisoned"));
    }
}
