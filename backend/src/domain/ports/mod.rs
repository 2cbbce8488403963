//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, price engine) describe how the domain expects
//! to interact with adapters; driving ports (commands, queries) are the
//! use-cases the inbound adapters call. Each trait exposes strongly typed
//! errors so adapters map their failures into predictable variants.

mod freight_command;
mod freight_query;
mod freight_repository;
mod idempotency_repository;
mod notification_ports;
mod notification_repository;
mod price_engine;
mod review_ports;
mod review_repository;
mod user_ports;
mod user_repository;

pub use freight_command::{
    AcceptFreightRequest, CancelParticipationRequest, CancelParticipationResponse, CargoInput,
    ConfirmPaymentRequest, CreateFreightRequest, CreateFreightResponse, FreightCommand,
    FreightPayload, FreightResponse, JoinFreightRequest, JoinFreightResponse,
    MarkPackageDeliveredRequest, PackagePayload, PackageResponse, SubmitPaymentRequest,
    UpdateFreightStatusRequest,
};
#[cfg(test)]
pub use freight_command::MockFreightCommand;
pub use freight_query::{FixtureFreightQuery, FreightQuery};
#[cfg(test)]
pub use freight_query::MockFreightQuery;
pub use freight_repository::{
    FixtureFreightRepository, FreightRepository, FreightRepositoryError, FreightUpdate,
    FreightUpdateError,
};
#[cfg(test)]
pub use freight_repository::MockFreightRepository;
pub use idempotency_repository::{
    FixtureIdempotencyRepository, IdempotencyRepository, IdempotencyRepositoryError,
};
#[cfg(test)]
pub use idempotency_repository::MockIdempotencyRepository;
pub use notification_ports::{
    FixtureNotificationQuery, MarkNotificationReadRequest, NotificationCommand,
    NotificationPayload, NotificationQuery,
};
#[cfg(test)]
pub use notification_ports::{MockNotificationCommand, MockNotificationQuery};
pub use notification_repository::{
    FixtureNotificationRepository, NotificationRepository, NotificationRepositoryError,
};
#[cfg(test)]
pub use notification_repository::MockNotificationRepository;
pub use price_engine::{
    FIXTURE_DISTANCE_KM, FixturePriceEngine, PriceEngine, PriceEngineError, Quote, price_for,
};
#[cfg(test)]
pub use price_engine::MockPriceEngine;
pub use review_ports::{
    AddReviewRequest, AddReviewResponse, FixtureReviewQuery, ReviewCommand, ReviewPayload,
    ReviewQuery,
};
#[cfg(test)]
pub use review_ports::{MockReviewCommand, MockReviewQuery};
pub use review_repository::{FixtureReviewRepository, ReviewRepository, ReviewRepositoryError};
#[cfg(test)]
pub use review_repository::MockReviewRepository;
pub use user_ports::{
    FixtureUsersQuery, LoginRequest, LoginResponse, RegisterUserRequest, RegisterUserResponse,
    UserCommand, UserPayload, UsersQuery,
};
#[cfg(test)]
pub use user_ports::{MockUserCommand, MockUsersQuery};
pub use user_repository::{FixtureUserRepository, UserRepository, UserRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
