//! Domain entities, state machines, ports, and services.
//!
//! The domain layer is transport agnostic: inbound adapters call the driving
//! ports in [`ports`], and driven adapters implement the repository and
//! price-engine ports. Every guarded operation re-validates its own
//! preconditions here, independent of what the caller already checked.

pub mod error;
pub mod freight;
mod freight_service;
pub mod idempotency;
pub mod location;
pub mod notification;
mod notification_service;
pub mod ports;
pub mod review;
mod review_service;
#[cfg(test)]
pub(crate) mod test_support;
pub mod user;
mod user_service;

pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::freight::{
    CargoDetails, DeliveryAdvance, DeliveryStatus, FreightDraft, FreightError, FreightMutation,
    FreightMutationOutcome, FreightRequest, FreightStatus, PackageDimensions, PackageDraft,
    PackageItem, PackageValidationError, ParseFreightStatusError, ParsePaymentMethodError,
    Participant, PaymentError, PaymentMethod, PaymentStatus, TransporterRef,
};
pub use self::freight_service::FreightService;
pub use self::idempotency::{
    IdempotencyKey, IdempotencyKeyValidationError, IdempotencyLookup, IdempotencyLookupResult,
    IdempotencyRecord, MutationType, PayloadHash, canonicalize_payload,
};
pub use self::location::{Location, LocationValidationError};
pub use self::notification::{Notification, NotificationKind, ParseNotificationKindError};
pub use self::notification_service::NotificationService;
pub use self::review::{Review, ReviewDraft, ReviewValidationError};
pub use self::review_service::ReviewService;
pub use self::user::{EmailAddress, User, UserDraft, UserId, UserRole, UserValidationError};
pub use self::user_service::UserDirectoryService;
