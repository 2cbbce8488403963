//! The freight request aggregate and its guarded mutations.
//!
//! Every state-changing operation re-validates its own preconditions here,
//! independent of what the caller already checked. All mutations are
//! all-or-nothing: methods return an error before touching any field, or
//! complete entirely.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Location, UserId};

use super::package::{PackageItem, PaymentError};
use super::status::{DeliveryStatus, FreightStatus, PaymentMethod};

/// Errors raised by the aggregate's guarded mutations.
#[derive(Debug, Clone, PartialEq)]
pub enum FreightError {
    /// A state transition outside the lifecycle table was requested.
    InvalidTransition {
        /// Current status.
        from: FreightStatus,
        /// Requested status.
        to: FreightStatus,
    },
    /// The freight already has an assigned transporter.
    AlreadyAssigned,
    /// The actor is not the assigned transporter.
    NotAssignedTransporter,
    /// The actor may not cancel this freight.
    NotCancellable {
        /// Current status.
        status: FreightStatus,
    },
    /// Only the creator or the assigned transporter may cancel.
    NotAParty,
    /// The freight does not accept shared packages.
    NotShared,
    /// All package slots are taken.
    CapacityExhausted {
        /// Configured capacity.
        max_packages: u32,
    },
    /// Joining more packages than the remaining slots allow.
    ExceedsCapacity {
        /// Slots still free.
        remaining: u32,
        /// Packages offered.
        offered: u32,
    },
    /// The freight is past the joinable stage.
    NotJoinable {
        /// Current status.
        status: FreightStatus,
    },
    /// The creator cannot join their own freight.
    OwnFreight,
    /// The customer already joined this freight.
    AlreadyJoined,
    /// A join must carry at least one package.
    NoPackages,
    /// The customer has no participation to cancel.
    NotParticipant,
    /// Participation can only be cancelled before transit.
    ParticipationLocked {
        /// Current status.
        status: FreightStatus,
    },
    /// The referenced package does not exist on this freight.
    PackageNotFound {
        /// The missing package id.
        package_id: Uuid,
    },
    /// Only the package at the head of the delivery sequence may complete.
    OutOfSequence {
        /// The package whose turn it is, if any.
        expected: Option<Uuid>,
    },
    /// Deliveries only progress while the freight is in transit.
    NotInTransit {
        /// Current status.
        status: FreightStatus,
    },
    /// The actor does not own the referenced package.
    NotPackageOwner,
    /// The payment state machine rejected the operation.
    Payment(PaymentError),
}

impl fmt::Display for FreightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTransition { from, to } => {
                write!(f, "cannot move freight from {from} to {to}")
            }
            Self::AlreadyAssigned => write!(f, "freight already has a transporter"),
            Self::NotAssignedTransporter => write!(f, "caller is not the assigned transporter"),
            Self::NotCancellable { status } => {
                write!(f, "freight in status {status} cannot be cancelled")
            }
            Self::NotAParty => write!(f, "only the creator or the transporter may cancel"),
            Self::NotShared => write!(f, "freight does not accept shared packages"),
            Self::CapacityExhausted { max_packages } => {
                write!(f, "freight is full ({max_packages} packages)")
            }
            Self::ExceedsCapacity { remaining, offered } => {
                write!(f, "{offered} packages offered but only {remaining} slots free")
            }
            Self::NotJoinable { status } => {
                write!(f, "freight in status {status} cannot be joined")
            }
            Self::OwnFreight => write!(f, "creator cannot join their own freight"),
            Self::AlreadyJoined => write!(f, "customer already joined this freight"),
            Self::NoPackages => write!(f, "a join must include at least one package"),
            Self::NotParticipant => write!(f, "customer has not joined this freight"),
            Self::ParticipationLocked { status } => {
                write!(f, "participation cannot change once the freight is {status}")
            }
            Self::PackageNotFound { package_id } => {
                write!(f, "package {package_id} not found on this freight")
            }
            Self::OutOfSequence { expected } => match expected {
                Some(id) => write!(f, "package {id} is next in the delivery sequence"),
                None => write!(f, "no package is awaiting delivery"),
            },
            Self::NotInTransit { status } => {
                write!(f, "deliveries only progress while in transit, freight is {status}")
            }
            Self::NotPackageOwner => write!(f, "caller does not own this package"),
            Self::Payment(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for FreightError {}

impl From<PaymentError> for FreightError {
    fn from(value: PaymentError) -> Self {
        Self::Payment(value)
    }
}

/// The creator's cargo record, present on every freight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CargoDetails {
    /// Width in centimetres.
    pub width_cm: f64,
    /// Height in centimetres.
    pub height_cm: f64,
    /// Length in centimetres.
    pub length_cm: f64,
    /// Weight in kilograms.
    pub weight_kg: f64,
    /// Contents description.
    pub description: String,
    /// Optional photo references.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<String>,
}

/// A customer who joined a shared freight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Joining customer.
    #[schema(value_type = String, format = "uuid")]
    pub id: UserId,
    /// Display name, denormalized for read views.
    pub name: String,
    /// Street address the packages are collected from.
    pub address: String,
    /// City of the address.
    pub city: String,
    /// Latitude, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Identity snapshot of the transporter accepting a freight.
#[derive(Debug, Clone, PartialEq)]
pub struct TransporterRef {
    /// Transporter user id.
    pub id: UserId,
    /// Display name, denormalized for read views.
    pub name: String,
    /// Optional avatar reference.
    pub avatar: Option<String>,
}

/// Input payload for [`FreightRequest::new`].
#[derive(Debug, Clone)]
pub struct FreightDraft {
    /// Stable identifier.
    pub id: Uuid,
    /// Creating customer.
    pub customer_id: UserId,
    /// Creator display name.
    pub customer_name: String,
    /// Creator avatar reference.
    pub customer_avatar: Option<String>,
    /// Collection endpoint.
    pub pickup: Location,
    /// Drop-off endpoint.
    pub delivery: Location,
    /// The creator's cargo record.
    pub cargo: CargoDetails,
    /// Total quoted price.
    pub price: f64,
    /// Quoted route distance in kilometres.
    pub distance_km: f64,
    /// When the customer wants the freight carried.
    pub requested_date: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Whether other customers may attach packages.
    pub is_shared: bool,
    /// Capacity for joined packages; ignored (forced to 0) when not shared.
    pub max_packages: u32,
}

/// Outcome of completing one package delivery, for notification fan-out.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryAdvance {
    /// Owner of the package just delivered.
    pub delivered_owner: UserId,
    /// Owner of the package now in transit, if any remain.
    pub next_owner: Option<UserId>,
    /// Whether the whole freight reached `delivered`.
    pub freight_delivered: bool,
}

/// One shipment job, possibly shared across multiple customers' packages.
///
/// ## Invariants
/// - `current_packages == packages.len() <= max_packages`; the creator's
///   cargo occupies no capacity slot.
/// - `shared_by` and `participants` list each joined customer exactly once.
/// - At most one package is `in_transit` at a time, in join order.
#[derive(Debug, Clone, PartialEq)]
pub struct FreightRequest {
    pub(super) id: Uuid,
    pub(super) customer_id: UserId,
    pub(super) customer_name: String,
    pub(super) customer_avatar: Option<String>,
    pub(super) transporter_id: Option<UserId>,
    pub(super) transporter_name: Option<String>,
    pub(super) transporter_avatar: Option<String>,
    pub(super) status: FreightStatus,
    pub(super) pickup: Location,
    pub(super) delivery: Location,
    pub(super) cargo: CargoDetails,
    pub(super) packages: Vec<PackageItem>,
    pub(super) price: f64,
    pub(super) distance_km: f64,
    pub(super) requested_date: DateTime<Utc>,
    pub(super) estimated_arrival: Option<DateTime<Utc>>,
    pub(super) created_at: DateTime<Utc>,
    pub(super) is_shared: bool,
    pub(super) max_packages: u32,
    pub(super) shared_by: Vec<UserId>,
    pub(super) participants: Vec<Participant>,
}

impl FreightRequest {
    /// Create a pending freight request.
    pub fn new(draft: FreightDraft) -> Self {
        let max_packages = if draft.is_shared { draft.max_packages } else { 0 };
        Self {
            id: draft.id,
            customer_id: draft.customer_id,
            customer_name: draft.customer_name,
            customer_avatar: draft.customer_avatar,
            transporter_id: None,
            transporter_name: None,
            transporter_avatar: None,
            status: FreightStatus::Pending,
            pickup: draft.pickup,
            delivery: draft.delivery,
            cargo: draft.cargo,
            packages: Vec::new(),
            price: draft.price,
            distance_km: draft.distance_km,
            requested_date: draft.requested_date,
            estimated_arrival: None,
            created_at: draft.created_at,
            is_shared: draft.is_shared,
            max_packages,
            shared_by: Vec::new(),
            participants: Vec::new(),
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Creating customer.
    pub fn customer_id(&self) -> UserId {
        self.customer_id
    }

    /// Creator display name.
    pub fn customer_name(&self) -> &str {
        self.customer_name.as_str()
    }

    /// Creator avatar reference.
    pub fn customer_avatar(&self) -> Option<&str> {
        self.customer_avatar.as_deref()
    }

    /// Assigned transporter, once accepted.
    pub fn transporter_id(&self) -> Option<UserId> {
        self.transporter_id
    }

    /// Transporter display name, once accepted.
    pub fn transporter_name(&self) -> Option<&str> {
        self.transporter_name.as_deref()
    }

    /// Transporter avatar, once accepted.
    pub fn transporter_avatar(&self) -> Option<&str> {
        self.transporter_avatar.as_deref()
    }

    /// Current lifecycle status.
    pub fn status(&self) -> FreightStatus {
        self.status
    }

    /// Collection endpoint.
    pub fn pickup(&self) -> &Location {
        &self.pickup
    }

    /// Drop-off endpoint.
    pub fn delivery(&self) -> &Location {
        &self.delivery
    }

    /// The creator's cargo record.
    pub fn cargo(&self) -> &CargoDetails {
        &self.cargo
    }

    /// Joined participants' packages, in join order.
    pub fn packages(&self) -> &[PackageItem] {
        self.packages.as_slice()
    }

    /// Total quoted price.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Quoted route distance in kilometres.
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// When the customer wants the freight carried.
    pub fn requested_date(&self) -> DateTime<Utc> {
        self.requested_date
    }

    /// Estimated arrival, set on acceptance.
    pub fn estimated_arrival(&self) -> Option<DateTime<Utc>> {
        self.estimated_arrival
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether other customers may attach packages.
    pub fn is_shared(&self) -> bool {
        self.is_shared
    }

    /// Capacity for joined packages.
    pub fn max_packages(&self) -> u32 {
        self.max_packages
    }

    /// Count of joined packages; always `packages().len()`.
    pub fn current_packages(&self) -> u32 {
        u32::try_from(self.packages.len()).unwrap_or(u32::MAX)
    }

    /// Customers who joined, in join order.
    pub fn shared_by(&self) -> &[UserId] {
        self.shared_by.as_slice()
    }

    /// Participant entries, one per joined customer.
    pub fn participants(&self) -> &[Participant] {
        self.participants.as_slice()
    }

    /// Whether `customer` created this freight or joined it.
    pub fn involves_customer(&self, customer: UserId) -> bool {
        self.customer_id == customer || self.shared_by.contains(&customer)
    }

    /// Assign a transporter: `pending → confirmed`.
    ///
    /// Fails when the freight is past `pending` or already has a
    /// transporter. The caller supplies the arrival estimate.
    pub fn assign_transporter(
        &mut self,
        transporter: TransporterRef,
        estimated_arrival: DateTime<Utc>,
    ) -> Result<(), FreightError> {
        if self.transporter_id.is_some() {
            return Err(FreightError::AlreadyAssigned);
        }
        if !self.status.can_transition_to(FreightStatus::Confirmed) {
            return Err(FreightError::InvalidTransition {
                from: self.status,
                to: FreightStatus::Confirmed,
            });
        }
        self.transporter_id = Some(transporter.id);
        self.transporter_name = Some(transporter.name);
        self.transporter_avatar = transporter.avatar;
        self.estimated_arrival = Some(estimated_arrival);
        self.status = FreightStatus::Confirmed;
        Ok(())
    }

    /// Start the trip: `confirmed → in_transit`, assigned transporter only.
    pub fn begin_transit(&mut self, actor: UserId) -> Result<(), FreightError> {
        self.require_transporter(actor)?;
        if !self.status.can_transition_to(FreightStatus::InTransit) {
            return Err(FreightError::InvalidTransition {
                from: self.status,
                to: FreightStatus::InTransit,
            });
        }
        self.status = FreightStatus::InTransit;
        Ok(())
    }

    /// Complete a non-shared freight: `in_transit → delivered`.
    ///
    /// Shared freights reach `delivered` exclusively through
    /// [`FreightRequest::mark_package_delivered`]; a direct transition is
    /// rejected while joined packages are still outstanding.
    pub fn complete(&mut self, actor: UserId) -> Result<(), FreightError> {
        self.require_transporter(actor)?;
        if !self.status.can_transition_to(FreightStatus::Delivered) {
            return Err(FreightError::InvalidTransition {
                from: self.status,
                to: FreightStatus::Delivered,
            });
        }
        if self
            .packages
            .iter()
            .any(|p| p.delivery_status != DeliveryStatus::Delivered)
        {
            return Err(FreightError::OutOfSequence {
                expected: self.next_package_id(),
            });
        }
        self.status = FreightStatus::Delivered;
        Ok(())
    }

    /// Cancel the freight: creator or assigned transporter, before transit.
    ///
    /// Participant data is left intact; cancellation is a status flag, not a
    /// rollback.
    pub fn cancel(&mut self, actor: UserId) -> Result<(), FreightError> {
        if !self.status.is_cancellable() {
            return Err(FreightError::NotCancellable {
                status: self.status,
            });
        }
        if actor != self.customer_id && Some(actor) != self.transporter_id {
            return Err(FreightError::NotAParty);
        }
        self.status = FreightStatus::Cancelled;
        Ok(())
    }

    /// Attach a joining customer's packages.
    ///
    /// Preconditions (checked in this order, matching the public error
    /// contract): freight is shared; capacity remains; status is `pending`;
    /// the joiner is not the creator and has not already joined; at least
    /// one package is offered and all offered packages fit the remaining
    /// capacity.
    pub fn join(
        &mut self,
        participant: Participant,
        packages: Vec<PackageItem>,
    ) -> Result<(), FreightError> {
        if !self.is_shared {
            return Err(FreightError::NotShared);
        }
        if self.current_packages() >= self.max_packages {
            return Err(FreightError::CapacityExhausted {
                max_packages: self.max_packages,
            });
        }
        if self.status != FreightStatus::Pending {
            return Err(FreightError::NotJoinable {
                status: self.status,
            });
        }
        if participant.id == self.customer_id {
            return Err(FreightError::OwnFreight);
        }
        if self.shared_by.contains(&participant.id) {
            return Err(FreightError::AlreadyJoined);
        }
        if packages.is_empty() {
            return Err(FreightError::NoPackages);
        }
        let offered = u32::try_from(packages.len()).unwrap_or(u32::MAX);
        let remaining = self.max_packages - self.current_packages();
        if offered > remaining {
            return Err(FreightError::ExceedsCapacity { remaining, offered });
        }

        self.shared_by.push(participant.id);
        self.participants.push(participant);
        self.packages.extend(packages);
        Ok(())
    }

    /// Remove a participant and all their packages, before transit.
    ///
    /// Returns the number of packages removed.
    pub fn remove_participation(&mut self, customer: UserId) -> Result<u32, FreightError> {
        if customer == self.customer_id || !self.shared_by.contains(&customer) {
            return Err(FreightError::NotParticipant);
        }
        if !matches!(
            self.status,
            FreightStatus::Pending | FreightStatus::Confirmed
        ) {
            return Err(FreightError::ParticipationLocked {
                status: self.status,
            });
        }

        let before = self.packages.len();
        self.packages.retain(|p| p.owner_id != customer);
        let removed = before - self.packages.len();
        self.shared_by.retain(|id| *id != customer);
        self.participants.retain(|p| p.id != customer);
        Ok(u32::try_from(removed).unwrap_or(u32::MAX))
    }

    /// Id of the package whose delivery is next, if any.
    ///
    /// The head of the sequence is the first package `in_transit`; when none
    /// is, the first still `pending`, in join order.
    pub fn next_package_id(&self) -> Option<Uuid> {
        self.packages
            .iter()
            .find(|p| p.delivery_status == DeliveryStatus::InTransit)
            .or_else(|| {
                self.packages
                    .iter()
                    .find(|p| p.delivery_status == DeliveryStatus::Pending)
            })
            .map(PackageItem::id)
    }

    /// Complete the delivery of the package at the head of the sequence.
    ///
    /// Only the assigned transporter may call this, only while the freight
    /// is in transit, and only for the package whose turn it is. On success
    /// the following package (if any) moves to `in_transit`, and the freight
    /// becomes `delivered` once every package is.
    pub fn mark_package_delivered(
        &mut self,
        actor: UserId,
        package_id: Uuid,
    ) -> Result<DeliveryAdvance, FreightError> {
        self.require_transporter(actor)?;
        if self.status != FreightStatus::InTransit {
            return Err(FreightError::NotInTransit {
                status: self.status,
            });
        }
        if !self.packages.iter().any(|p| p.id == package_id) {
            return Err(FreightError::PackageNotFound { package_id });
        }
        let expected = self.next_package_id();
        if expected != Some(package_id) {
            return Err(FreightError::OutOfSequence { expected });
        }

        let mut delivered_owner = None;
        let mut next_owner = None;
        for package in &mut self.packages {
            if delivered_owner.is_none() {
                if package.id == package_id {
                    package.delivery_status = DeliveryStatus::Delivered;
                    delivered_owner = Some(package.owner_id);
                }
            } else if package.delivery_status == DeliveryStatus::Pending {
                package.delivery_status = DeliveryStatus::InTransit;
                next_owner = Some(package.owner_id);
                break;
            }
        }
        let delivered_owner = delivered_owner.ok_or(FreightError::PackageNotFound { package_id })?;

        let freight_delivered = self
            .packages
            .iter()
            .all(|p| p.delivery_status == DeliveryStatus::Delivered);
        if freight_delivered {
            self.status = FreightStatus::Delivered;
        }

        Ok(DeliveryAdvance {
            delivered_owner,
            next_owner,
            freight_delivered,
        })
    }

    /// Record a package owner's payment submission.
    pub fn submit_payment(
        &mut self,
        actor: UserId,
        package_id: Uuid,
        method: PaymentMethod,
        proof: Option<String>,
    ) -> Result<&PackageItem, FreightError> {
        let package = self
            .packages
            .iter_mut()
            .find(|p| p.id == package_id)
            .ok_or(FreightError::PackageNotFound { package_id })?;
        if package.owner_id != actor {
            return Err(FreightError::NotPackageOwner);
        }
        package.submit_payment(method, proof)?;
        Ok(package)
    }

    /// Record the transporter's payment confirmation.
    pub fn confirm_payment(
        &mut self,
        actor: UserId,
        package_id: Uuid,
    ) -> Result<&PackageItem, FreightError> {
        self.require_transporter(actor)?;
        let package = self
            .packages
            .iter_mut()
            .find(|p| p.id == package_id)
            .ok_or(FreightError::PackageNotFound { package_id })?;
        package.confirm_payment()?;
        Ok(package)
    }

    fn require_transporter(&self, actor: UserId) -> Result<(), FreightError> {
        if self.transporter_id != Some(actor) {
            return Err(FreightError::NotAssignedTransporter);
        }
        Ok(())
    }
}
