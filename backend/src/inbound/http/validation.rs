//! Shared validation helpers for inbound HTTP adapters.

use actix_web::HttpRequest;
use serde_json::json;

use crate::domain::{
    DomainError, FreightStatus, IdempotencyKey, Location, PaymentMethod, UserRole,
};

/// Header carrying the client's retry key for participation mutations.
pub(crate) const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

fn field_error(field: &str, message: impl Into<String>, code: &str) -> DomainError {
    DomainError::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

/// Parse a wire freight status string.
pub(crate) fn parse_freight_status(value: &str) -> Result<FreightStatus, DomainError> {
    value.parse().map_err(|_| {
        field_error(
            "status",
            format!("unknown freight status: {value}"),
            "invalid_status",
        )
    })
}

/// Parse a wire payment method string.
pub(crate) fn parse_payment_method(value: &str) -> Result<PaymentMethod, DomainError> {
    value.parse().map_err(|_| {
        field_error(
            "method",
            format!("unknown payment method: {value}"),
            "invalid_payment_method",
        )
    })
}

/// Parse a wire user role string.
pub(crate) fn parse_user_role(value: &str) -> Result<UserRole, DomainError> {
    value.parse().map_err(|_| {
        field_error("role", format!("unknown user role: {value}"), "invalid_role")
    })
}

/// Build a validated [`Location`] from wire fields.
pub(crate) fn parse_location(
    field: &str,
    address: String,
    city: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Location, DomainError> {
    let location = Location::new(address, city).map_err(|err| {
        field_error(field, err.to_string(), "invalid_location")
    })?;
    Ok(match (latitude, longitude) {
        (Some(lat), Some(lng)) => location.with_coordinates(lat, lng),
        _ => location,
    })
}

/// Parse an RFC 3339 timestamp from a wire field.
pub(crate) fn parse_rfc3339(
    field: &str,
    value: &str,
) -> Result<chrono::DateTime<chrono::Utc>, DomainError> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|_| {
            field_error(
                field,
                format!("{field} must be an RFC 3339 timestamp"),
                "invalid_timestamp",
            )
        })
}

/// Extract and validate the optional `Idempotency-Key` header.
pub(crate) fn idempotency_key_from(
    req: &HttpRequest,
) -> Result<Option<IdempotencyKey>, DomainError> {
    let Some(value) = req.headers().get(IDEMPOTENCY_KEY_HEADER) else {
        return Ok(None);
    };
    let raw = value.to_str().map_err(|_| {
        field_error(
            IDEMPOTENCY_KEY_HEADER,
            "idempotency key must be valid ASCII",
            "invalid_idempotency_key",
        )
    })?;
    IdempotencyKey::new(raw)
        .map(Some)
        .map_err(|err| field_error(IDEMPOTENCY_KEY_HEADER, err.to_string(), "invalid_idempotency_key"))
}
