//! Driving ports for the user directory.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Location, User, UserId, UserRole};

/// Serializable user representation for driving ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    /// Stable identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Role the user acts under.
    pub role: UserRole,
    /// Aggregate rating in `0.0..=5.0`.
    pub rating: f64,
    /// Number of ratings backing `rating`.
    pub ratings_count: u32,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional avatar reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Optional street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Optional geocoded home location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl From<&User> for UserPayload {
    fn from(value: &User) -> Self {
        Self {
            id: value.id(),
            name: value.name().to_owned(),
            email: value.email().to_string(),
            phone: value.phone().to_owned(),
            role: value.role(),
            rating: value.rating(),
            ratings_count: value.ratings_count(),
            created_at: value.created_at(),
            avatar: value.avatar().map(str::to_owned),
            address: value.address().map(str::to_owned),
            location: value.location().cloned(),
        }
    }
}

/// Request to register a new user.
#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    /// Display name.
    pub name: String,
    /// Contact email; unique across the directory.
    pub email: String,
    /// Contact phone; may be empty.
    pub phone: String,
    /// Role the user acts under.
    pub role: UserRole,
    /// Optional street address used when joining shared freights.
    pub address: Option<String>,
    /// Optional geocoded home location.
    pub location: Option<Location>,
}

/// Response from registering a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserResponse {
    /// The registered user.
    pub user: UserPayload,
}

/// Request to look up a directory entry by email for session login.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    /// The email to look up.
    pub email: String,
}

/// Response from a directory login lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// The matched user.
    pub user: UserPayload,
}

/// Driving port for user directory writes and login lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCommand: Send + Sync {
    /// Register a new user with a fresh rating aggregate.
    async fn register(
        &self,
        request: RegisterUserRequest,
    ) -> Result<RegisterUserResponse, DomainError>;

    /// Look up a user by email for session login.
    ///
    /// Credential verification is out of scope; the directory lookup is the
    /// whole check, as in the source system.
    async fn login(&self, request: LoginRequest) -> Result<LoginResponse, DomainError>;
}

/// Driving port for user directory reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Fetch one user by id.
    async fn get_user(&self, user_id: UserId) -> Result<UserPayload, DomainError>;
}

/// Fixture query implementation for tests without directory data.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUsersQuery;

#[async_trait]
impl UsersQuery for FixtureUsersQuery {
    async fn get_user(&self, user_id: UserId) -> Result<UserPayload, DomainError> {
        Err(DomainError::not_found(format!("user {user_id} not found")))
    }
}
