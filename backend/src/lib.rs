//! FleteShare backend: a peer-to-peer freight-sharing marketplace service.
//!
//! The domain core (freight aggregate, package delivery sequencing,
//! payments, reviews, notifications, user directory) lives behind driving
//! ports in [`domain::ports`]; [`inbound::http`] exposes them as a REST API
//! and [`outbound`] provides the in-memory adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;

pub use doc::ApiDoc;
