//! Application wiring: adapters, services, and HTTP state construction.

pub mod config;
pub mod seed;

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::ports::{
    FreightCommand, FreightQuery, NotificationCommand, NotificationQuery, ReviewCommand,
    ReviewQuery, UserCommand, UsersQuery,
};
use crate::domain::{FreightService, NotificationService, ReviewService, UserDirectoryService};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{
    InMemoryFreightRepository, InMemoryIdempotencyRepository, InMemoryNotificationRepository,
    InMemoryReviewRepository, InMemoryUserRepository,
};
use crate::outbound::pricing::SyntheticPriceEngine;

pub use config::AppConfig;
pub use seed::{SeedError, seed_example_data};

/// The in-memory adapter set backing one process.
pub struct Adapters {
    /// Freight aggregate store.
    pub freights: Arc<InMemoryFreightRepository>,
    /// User directory.
    pub users: Arc<InMemoryUserRepository>,
    /// Review ledger.
    pub reviews: Arc<InMemoryReviewRepository>,
    /// Notification log.
    pub notifications: Arc<InMemoryNotificationRepository>,
    /// Idempotency record store.
    pub idempotency: Arc<InMemoryIdempotencyRepository>,
    /// Synthetic quote engine.
    pub pricing: Arc<SyntheticPriceEngine>,
}

impl Adapters {
    /// Create a fresh, empty adapter set.
    pub fn new() -> Self {
        Self {
            freights: Arc::new(InMemoryFreightRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            reviews: Arc::new(InMemoryReviewRepository::new()),
            notifications: Arc::new(InMemoryNotificationRepository::new()),
            idempotency: Arc::new(InMemoryIdempotencyRepository::new()),
            pricing: Arc::new(SyntheticPriceEngine::new()),
        }
    }
}

impl Default for Adapters {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the HTTP dependency bundle over an adapter set.
///
/// Constructed once per process; handlers receive it through
/// `actix_web::web::Data` (the application-state service replacing the
/// source system's ambient context providers).
pub fn build_state(adapters: &Adapters) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let freight_service = Arc::new(FreightService::new(
        Arc::clone(&adapters.freights),
        Arc::clone(&adapters.users),
        Arc::clone(&adapters.notifications),
        Arc::clone(&adapters.idempotency),
        Arc::clone(&adapters.pricing),
        Arc::clone(&clock),
    ));
    let review_service = Arc::new(ReviewService::new(
        Arc::clone(&adapters.reviews),
        Arc::clone(&adapters.freights),
        Arc::clone(&adapters.notifications),
        Arc::clone(&clock),
    ));
    let notification_service = Arc::new(NotificationService::new(Arc::clone(
        &adapters.notifications,
    )));
    let user_service = Arc::new(UserDirectoryService::new(
        Arc::clone(&adapters.users),
        Arc::clone(&clock),
    ));

    let freights: Arc<dyn FreightCommand> = freight_service.clone();
    let freights_query: Arc<dyn FreightQuery> = freight_service;
    let reviews: Arc<dyn ReviewCommand> = review_service.clone();
    let reviews_query: Arc<dyn ReviewQuery> = review_service;
    let notifications: Arc<dyn NotificationCommand> = notification_service.clone();
    let notifications_query: Arc<dyn NotificationQuery> = notification_service;
    let users: Arc<dyn UserCommand> = user_service.clone();
    let users_query: Arc<dyn UsersQuery> = user_service;

    HttpState {
        freights,
        freights_query,
        reviews,
        reviews_query,
        notifications,
        notifications_query,
        users,
        users_query,
    }
}
