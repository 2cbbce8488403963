//! User directory entities.
//!
//! Users are created at registration and never mutated in this slice;
//! identity is a UUID and emails are unique across the directory.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::location::Location;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The id was empty or not a valid UUID.
    InvalidId,
    /// The name was empty after trimming.
    EmptyName,
    /// The email had no local part or no domain.
    InvalidEmail,
    /// The role string was not a known role.
    UnknownRole { input: String },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::InvalidEmail => write!(f, "email must contain a local part and a domain"),
            Self::UnknownRole { input } => write!(f, "unknown user role: {input}"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let parsed = Uuid::parse_str(id.as_ref()).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed))
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Role a user acts under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Requests freights and joins shared ones.
    Customer,
    /// Accepts and carries freights.
    Transporter,
    /// Back-office access; no freight operations.
    Admin,
}

impl UserRole {
    /// Stable string form used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Transporter => "transporter",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UserValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "customer" => Ok(Self::Customer),
            "transporter" => Ok(Self::Transporter),
            "admin" => Ok(Self::Admin),
            _ => Err(UserValidationError::UnknownRole {
                input: value.to_owned(),
            }),
        }
    }
}

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`] from owned input.
    ///
    /// The check is deliberately shallow: a non-empty local part and a domain
    /// containing a dot. Deliverability is not this layer's concern.
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        let Some((local, domain)) = email.split_once('@') else {
            return Err(UserValidationError::InvalidEmail);
        };
        if local.is_empty() || domain.is_empty() || !domain.contains('.') {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Input payload for [`User::new`].
#[derive(Debug, Clone)]
pub struct UserDraft {
    /// Stable identifier.
    pub id: UserId,
    /// Display name, non-empty after trimming.
    pub name: String,
    /// Unique contact email.
    pub email: EmailAddress,
    /// Contact phone; may be empty at registration.
    pub phone: String,
    /// Role the user acts under.
    pub role: UserRole,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional avatar reference.
    pub avatar: Option<String>,
    /// Optional street address used when joining shared freights.
    pub address: Option<String>,
    /// Optional geocoded home location.
    pub location: Option<Location>,
}

/// A registered user.
///
/// ## Invariants
/// - `name` is non-empty after trimming.
/// - `rating` stays within `0.0..=5.0`; it is seeded at registration and not
///   recomputed from reviews in this slice.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    name: String,
    email: EmailAddress,
    phone: String,
    role: UserRole,
    rating: f64,
    ratings_count: u32,
    created_at: DateTime<Utc>,
    avatar: Option<String>,
    address: Option<String>,
    location: Option<Location>,
}

impl User {
    /// Create a validated user with a fresh (zeroed) rating.
    pub fn new(draft: UserDraft) -> Result<Self, UserValidationError> {
        Self::with_rating(draft, 0.0, 0)
    }

    /// Create a validated user with an existing rating aggregate.
    ///
    /// Used when seeding the directory from fixtures.
    pub fn with_rating(
        draft: UserDraft,
        rating: f64,
        ratings_count: u32,
    ) -> Result<Self, UserValidationError> {
        if draft.name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self {
            id: draft.id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            role: draft.role,
            rating: rating.clamp(0.0, 5.0),
            ratings_count,
            created_at: draft.created_at,
            avatar: draft.avatar,
            address: draft.address,
            location: draft.location,
        })
    }

    /// Stable identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Contact email, unique across the directory.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Contact phone.
    pub fn phone(&self) -> &str {
        self.phone.as_str()
    }

    /// Role the user acts under.
    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Aggregate rating in `0.0..=5.0`.
    pub fn rating(&self) -> f64 {
        self.rating
    }

    /// Number of ratings backing [`User::rating`].
    pub fn ratings_count(&self) -> u32 {
        self.ratings_count
    }

    /// Registration timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Optional avatar reference.
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    /// Optional street address.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Optional geocoded home location.
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }
}

#[cfg(test)]
#[path = "user_tests.rs"]
mod tests;
