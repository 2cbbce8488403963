//! The freight aggregate: status lifecycle, shared participation, package
//! delivery sequencing, and per-package payments.

mod mutation;
mod package;
mod request;
mod status;

pub use mutation::{FreightMutation, FreightMutationOutcome};
pub use package::{
    PackageDimensions, PackageDraft, PackageItem, PackageValidationError, PaymentError,
};
pub use request::{
    CargoDetails, DeliveryAdvance, FreightDraft, FreightError, FreightRequest, Participant,
    TransporterRef,
};
pub use status::{
    DeliveryStatus, FreightStatus, ParseFreightStatusError, ParsePaymentMethodError, PaymentMethod,
    PaymentStatus,
};

#[cfg(test)]
mod tests;
