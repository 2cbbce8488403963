//! Packages attached to a shared freight, including their payment state.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::UserId;

use super::status::{DeliveryStatus, PaymentMethod, PaymentStatus};

/// Cubic centimetres per cubic metre, for the `space` derivation.
const CM3_PER_M3: f64 = 1_000_000.0;

/// Validation errors for package construction.
#[derive(Debug, Clone, PartialEq)]
pub enum PackageValidationError {
    /// A dimension or the weight was zero or negative.
    NonPositiveDimension {
        /// Which measurement failed.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The description was empty after trimming.
    EmptyDescription,
}

impl fmt::Display for PackageValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveDimension { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::EmptyDescription => write!(f, "description must not be empty"),
        }
    }
}

impl std::error::Error for PackageValidationError {}

/// Errors raised by the payment state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// A bank payment was submitted without a proof reference.
    MissingProof,
    /// Payment was already submitted for this package.
    AlreadySubmitted {
        /// The current payment status.
        status: PaymentStatus,
    },
    /// Confirmation requires a submitted payment.
    NotPaid {
        /// The current payment status.
        status: PaymentStatus,
    },
}

impl fmt::Display for PaymentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingProof => write!(f, "bank payments require a payment proof"),
            Self::AlreadySubmitted { status } => {
                write!(f, "payment already submitted (status {status})")
            }
            Self::NotPaid { status } => {
                write!(f, "payment must be submitted before confirmation (status {status})")
            }
        }
    }
}

impl std::error::Error for PaymentError {}

/// Physical measurements of a package, centimetres and kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageDimensions {
    width_cm: f64,
    height_cm: f64,
    length_cm: f64,
    weight_kg: f64,
}

impl PackageDimensions {
    /// Create validated dimensions; every measurement must be positive.
    pub fn new(
        width_cm: f64,
        height_cm: f64,
        length_cm: f64,
        weight_kg: f64,
    ) -> Result<Self, PackageValidationError> {
        for (field, value) in [
            ("width", width_cm),
            ("height", height_cm),
            ("length", length_cm),
            ("weight", weight_kg),
        ] {
            if !(value > 0.0) {
                return Err(PackageValidationError::NonPositiveDimension { field, value });
            }
        }
        Ok(Self {
            width_cm,
            height_cm,
            length_cm,
            weight_kg,
        })
    }

    /// Width in centimetres.
    pub fn width_cm(&self) -> f64 {
        self.width_cm
    }

    /// Height in centimetres.
    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    /// Length in centimetres.
    pub fn length_cm(&self) -> f64 {
        self.length_cm
    }

    /// Weight in kilograms.
    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// Volume in cubic centimetres.
    pub fn volume_cm3(&self) -> f64 {
        self.width_cm * self.height_cm * self.length_cm
    }

    /// Occupied space in cubic metres.
    pub fn space_m3(&self) -> f64 {
        self.volume_cm3() / CM3_PER_M3
    }
}

/// Input payload for [`PackageItem::new`].
#[derive(Debug, Clone)]
pub struct PackageDraft {
    /// Stable identifier.
    pub id: Uuid,
    /// Physical measurements.
    pub dimensions: PackageDimensions,
    /// What is inside; non-empty after trimming.
    pub description: String,
    /// Optional photo references.
    pub photos: Vec<String>,
    /// Owning customer.
    pub owner_id: UserId,
    /// Owner display name, denormalized for read views.
    pub owner_name: String,
}

/// One customer's cargo inside a shared freight.
///
/// ## Invariants
/// - `delivery_status` only moves forward: `pending → in_transit → delivered`.
/// - `payment_status` only moves forward: `pending → paid → confirmed`;
///   `paid` requires a method, and `bank` additionally a proof.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageItem {
    pub(super) id: Uuid,
    pub(super) dimensions: PackageDimensions,
    pub(super) description: String,
    pub(super) photos: Vec<String>,
    pub(super) owner_id: UserId,
    pub(super) owner_name: String,
    pub(super) delivery_status: DeliveryStatus,
    pub(super) distance_km: f64,
    pub(super) space_m3: f64,
    pub(super) price: f64,
    pub(super) payment_status: PaymentStatus,
    pub(super) payment_method: Option<PaymentMethod>,
    pub(super) payment_proof: Option<String>,
}

impl PackageItem {
    /// Create a validated package stamped with its quote.
    ///
    /// `distance_km` and `price` come from the price engine; `space` is
    /// derived from the dimensions.
    pub fn new(
        draft: PackageDraft,
        distance_km: f64,
        price: f64,
    ) -> Result<Self, PackageValidationError> {
        if draft.description.trim().is_empty() {
            return Err(PackageValidationError::EmptyDescription);
        }
        let space_m3 = draft.dimensions.space_m3();
        Ok(Self {
            id: draft.id,
            dimensions: draft.dimensions,
            description: draft.description,
            photos: draft.photos,
            owner_id: draft.owner_id,
            owner_name: draft.owner_name,
            delivery_status: DeliveryStatus::Pending,
            distance_km,
            space_m3,
            price,
            payment_status: PaymentStatus::Pending,
            payment_method: None,
            payment_proof: None,
        })
    }

    /// Stable identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Physical measurements.
    pub fn dimensions(&self) -> &PackageDimensions {
        &self.dimensions
    }

    /// Contents description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Photo references.
    pub fn photos(&self) -> &[String] {
        self.photos.as_slice()
    }

    /// Owning customer.
    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Owner display name.
    pub fn owner_name(&self) -> &str {
        self.owner_name.as_str()
    }

    /// Current delivery progress.
    pub fn delivery_status(&self) -> DeliveryStatus {
        self.delivery_status
    }

    /// Quoted distance for this package's leg, in kilometres.
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Occupied space in cubic metres.
    pub fn space_m3(&self) -> f64 {
        self.space_m3
    }

    /// Quoted price for this package.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Current payment progress.
    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    /// Chosen payment method, once submitted.
    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    /// Proof reference for bank payments.
    pub fn payment_proof(&self) -> Option<&str> {
        self.payment_proof.as_deref()
    }

    /// Record the owner's payment submission: `pending → paid`.
    pub(super) fn submit_payment(
        &mut self,
        method: PaymentMethod,
        proof: Option<String>,
    ) -> Result<(), PaymentError> {
        if self.payment_status != PaymentStatus::Pending {
            return Err(PaymentError::AlreadySubmitted {
                status: self.payment_status,
            });
        }
        if method == PaymentMethod::Bank && proof.as_deref().is_none_or(|p| p.trim().is_empty()) {
            return Err(PaymentError::MissingProof);
        }
        self.payment_status = PaymentStatus::Paid;
        self.payment_method = Some(method);
        self.payment_proof = proof;
        Ok(())
    }

    /// Record the transporter's acknowledgement: `paid → confirmed`.
    pub(super) fn confirm_payment(&mut self) -> Result<(), PaymentError> {
        match self.payment_status {
            PaymentStatus::Paid => {
                self.payment_status = PaymentStatus::Confirmed;
                Ok(())
            }
            status => Err(PaymentError::NotPaid { status }),
        }
    }
}
