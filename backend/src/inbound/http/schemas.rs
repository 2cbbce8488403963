//! Shared OpenAPI schema aliases for handler annotations.

use crate::domain::DomainError;

/// Error payload schema exposed in OpenAPI responses.
pub type ErrorSchema = DomainError;
