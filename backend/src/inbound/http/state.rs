//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FreightCommand, FreightQuery, NotificationCommand, NotificationQuery, ReviewCommand,
    ReviewQuery, UserCommand, UsersQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Freight write operations.
    pub freights: Arc<dyn FreightCommand>,
    /// Freight read operations.
    pub freights_query: Arc<dyn FreightQuery>,
    /// Review writes.
    pub reviews: Arc<dyn ReviewCommand>,
    /// Review reads.
    pub reviews_query: Arc<dyn ReviewQuery>,
    /// Notification writes (read flag).
    pub notifications: Arc<dyn NotificationCommand>,
    /// Notification reads.
    pub notifications_query: Arc<dyn NotificationQuery>,
    /// User registration and login lookups.
    pub users: Arc<dyn UserCommand>,
    /// User directory reads.
    pub users_query: Arc<dyn UsersQuery>,
}
