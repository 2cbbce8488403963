//! Route endpoints for freight requests.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors returned by [`Location::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationValidationError {
    /// The street address was empty after trimming.
    EmptyAddress,
    /// The city was empty after trimming.
    EmptyCity,
}

impl fmt::Display for LocationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAddress => write!(f, "address must not be empty"),
            Self::EmptyCity => write!(f, "city must not be empty"),
        }
    }
}

impl std::error::Error for LocationValidationError {}

/// A pickup or delivery endpoint: street address plus city, with optional
/// coordinates when the caller has them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    address: String,
    city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<String>,
}

impl Location {
    /// Create a validated location without coordinates.
    pub fn new(
        address: impl Into<String>,
        city: impl Into<String>,
    ) -> Result<Self, LocationValidationError> {
        let address = address.into();
        let city = city.into();
        if address.trim().is_empty() {
            return Err(LocationValidationError::EmptyAddress);
        }
        if city.trim().is_empty() {
            return Err(LocationValidationError::EmptyCity);
        }
        Ok(Self {
            address,
            city,
            latitude: None,
            longitude: None,
            state: None,
            country: None,
        })
    }

    /// Attach coordinates to the location.
    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Attach region metadata to the location.
    pub fn with_region(mut self, state: impl Into<String>, country: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self.country = Some(country.into());
        self
    }

    /// Street address.
    pub fn address(&self) -> &str {
        self.address.as_str()
    }

    /// City name.
    pub fn city(&self) -> &str {
        self.city.as_str()
    }

    /// Latitude, when known.
    pub fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    /// Longitude, when known.
    pub fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    /// State or province, when known.
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    /// Country, when known.
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }
}
