//! Idempotency primitives for retried participation mutations.
//!
//! A client retrying a join or leave after a lost response replays the same
//! `Idempotency-Key`; the recorded response is returned instead of tripping
//! the already-joined / not-participant guards. The same key with a
//! different payload is a conflict.

use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::user::UserId;

/// Maximum accepted key length.
const KEY_MAX_LEN: usize = 128;

/// Validation errors returned by [`IdempotencyKey::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdempotencyKeyValidationError {
    /// The key was empty after trimming.
    Empty,
    /// The key exceeded [`KEY_MAX_LEN`] bytes.
    TooLong {
        /// Maximum accepted length.
        max: usize,
    },
}

impl fmt::Display for IdempotencyKeyValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "idempotency key must not be empty"),
            Self::TooLong { max } => {
                write!(f, "idempotency key must be at most {max} bytes")
            }
        }
    }
}

impl std::error::Error for IdempotencyKeyValidationError {}

/// Client-chosen key identifying one logical mutation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    /// Validate and construct a key from client input.
    pub fn new(value: impl Into<String>) -> Result<Self, IdempotencyKeyValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(IdempotencyKeyValidationError::Empty);
        }
        if value.len() > KEY_MAX_LEN {
            return Err(IdempotencyKeyValidationError::TooLong { max: KEY_MAX_LEN });
        }
        Ok(Self(value))
    }

    /// Borrow the underlying key.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which mutation family a record belongs to; keys never collide across
/// families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationType {
    /// Joining a shared freight.
    Join,
    /// Cancelling one's own participation.
    Leave,
}

impl MutationType {
    /// Stable string form for storage keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Leave => "leave",
        }
    }
}

/// Canonical fingerprint of a mutation payload.
///
/// Two requests with the same key must carry the same payload; the
/// fingerprint is the canonical JSON rendering (object keys sorted
/// recursively), which is stable across field ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PayloadHash(String);

impl PayloadHash {
    /// Borrow the canonical rendering.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Canonicalize a JSON payload into a [`PayloadHash`].
pub fn canonicalize_payload(value: &Value) -> PayloadHash {
    let mut out = String::new();
    write_canonical(value, &mut out);
    PayloadHash(out)
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String((*key).clone()).to_string());
                out.push(':');
                if let Some(child) = map.get(*key) {
                    write_canonical(child, out);
                }
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        other => out.push_str(&other.to_string()),
    }
}

/// A stored idempotent-mutation outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct IdempotencyRecord {
    /// Client-chosen key.
    pub key: IdempotencyKey,
    /// Requesting user; keys are scoped per user.
    pub user_id: UserId,
    /// Mutation family.
    pub mutation_type: MutationType,
    /// Canonical payload fingerprint.
    pub payload_hash: PayloadHash,
    /// The response returned by the original attempt.
    pub response_snapshot: Value,
    /// When the original attempt completed.
    pub created_at: DateTime<Utc>,
}

/// Lookup parameters for a stored record.
#[derive(Debug, Clone, PartialEq)]
pub struct IdempotencyLookup {
    /// Client-chosen key.
    pub key: IdempotencyKey,
    /// Requesting user.
    pub user_id: UserId,
    /// Mutation family.
    pub mutation_type: MutationType,
    /// Canonical fingerprint of the incoming payload.
    pub payload_hash: PayloadHash,
}

/// Outcome of an idempotency lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum IdempotencyLookupResult {
    /// No record for this (user, type, key).
    NotFound,
    /// A record exists and the payload matches; replay it.
    MatchingPayload(IdempotencyRecord),
    /// A record exists but the payload differs; reject the request.
    ConflictingPayload(IdempotencyRecord),
}
