//! Persistence adapters.
//!
//! Only in-memory adapters exist today; a durable store slots in behind the
//! same repository ports.

mod memory;

pub use memory::{
    InMemoryFreightRepository, InMemoryIdempotencyRepository, InMemoryNotificationRepository,
    InMemoryReviewRepository, InMemoryUserRepository,
};
