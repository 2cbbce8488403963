//! Port for idempotency record storage.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{IdempotencyLookup, IdempotencyLookupResult, IdempotencyRecord};

/// Errors raised by idempotency storage adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdempotencyRepositoryError {
    /// Repository connection could not be established.
    #[error("idempotency repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("idempotency repository query failed: {message}")]
    Query {
        /// Adapter-provided failure detail.
        message: String,
    },
    /// Another record for this (user, type, key) was stored concurrently.
    #[error("idempotency key already stored: {message}")]
    DuplicateKey {
        /// Adapter-provided failure detail.
        message: String,
    },
}

impl IdempotencyRepositoryError {
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

    /// Helper for write races on the same key.
    pub fn duplicate_key(message: impl Into<String>) -> Self {
        Self::DuplicateKey {
            message: message.into(),
        }
    }
}

/// Port for looking up and storing idempotent-mutation records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdempotencyRepository: Send + Sync {
    /// Look up a record for (user, mutation type, key) and classify the
    /// payload match.
    async fn lookup(
        &self,
        query: &IdempotencyLookup,
    ) -> Result<IdempotencyLookupResult, IdempotencyRepositoryError>;

    /// Store the outcome of a completed mutation.
    async fn store(&self, record: &IdempotencyRecord) -> Result<(), IdempotencyRepositoryError>;
}

/// Fixture implementation for callers that skip idempotency handling.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdempotencyRepository;

#[async_trait]
impl IdempotencyRepository for FixtureIdempotencyRepository {
    async fn lookup(
        &self,
        _query: &IdempotencyLookup,
    ) -> Result<IdempotencyLookupResult, IdempotencyRepositoryError> {
        Ok(IdempotencyLookupResult::NotFound)
    }

    async fn store(&self, _record: &IdempotencyRecord) -> Result<(), IdempotencyRepositoryError> {
        Ok(())
    }
}
