//! Driving port for freight reads.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::DomainError;

use super::freight_command::FreightPayload;

/// Driving port for freight read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FreightQuery: Send + Sync {
    /// List all freights, newest first.
    async fn list_freights(&self) -> Result<Vec<FreightPayload>, DomainError>;

    /// Fetch one freight by id.
    async fn get_freight(&self, freight_id: Uuid) -> Result<FreightPayload, DomainError>;
}

/// Fixture query implementation for tests without freight data.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFreightQuery;

#[async_trait]
impl FreightQuery for FixtureFreightQuery {
    async fn list_freights(&self) -> Result<Vec<FreightPayload>, DomainError> {
        Ok(Vec::new())
    }

    async fn get_freight(&self, freight_id: Uuid) -> Result<FreightPayload, DomainError> {
        Err(DomainError::not_found(format!("freight {freight_id} not found")))
    }
}
