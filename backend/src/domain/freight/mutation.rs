//! Command representation of the aggregate's guarded mutations.
//!
//! Repositories apply one [`FreightMutation`] per update call, so every
//! mutation on a freight serializes at the store and commits all-or-nothing:
//! a rejected command leaves the stored aggregate untouched.

use uuid::Uuid;

use crate::domain::UserId;

use super::package::PackageItem;
use super::request::{
    DeliveryAdvance, FreightError, FreightRequest, Participant, TransporterRef,
};
use super::status::PaymentMethod;

/// One guarded mutation against a freight aggregate.
#[derive(Debug, Clone)]
pub enum FreightMutation {
    /// Accept the freight: `pending → confirmed`.
    AssignTransporter {
        /// Accepting transporter.
        transporter: TransporterRef,
        /// Synthetic arrival estimate.
        estimated_arrival: chrono::DateTime<chrono::Utc>,
    },
    /// Start the trip: `confirmed → in_transit`.
    BeginTransit {
        /// Acting user; must be the assigned transporter.
        actor: UserId,
    },
    /// Complete a non-shared freight: `in_transit → delivered`.
    Complete {
        /// Acting user; must be the assigned transporter.
        actor: UserId,
    },
    /// Cancel the freight outright.
    Cancel {
        /// Acting user; creator or assigned transporter.
        actor: UserId,
    },
    /// Attach a joining customer's packages.
    Join {
        /// The joining customer's participant entry.
        participant: Participant,
        /// Their quoted packages.
        packages: Vec<PackageItem>,
    },
    /// Remove a participant and their packages.
    RemoveParticipation {
        /// The leaving customer.
        customer: UserId,
    },
    /// Complete the delivery of the package at the head of the sequence.
    MarkPackageDelivered {
        /// Acting user; must be the assigned transporter.
        actor: UserId,
        /// The package being handed over.
        package_id: Uuid,
    },
    /// Record a package owner's payment submission.
    SubmitPayment {
        /// Acting user; must own the package.
        actor: UserId,
        /// The package being paid for.
        package_id: Uuid,
        /// Chosen payment method.
        method: PaymentMethod,
        /// Proof reference; required for bank payments.
        proof: Option<String>,
    },
    /// Record the transporter's payment confirmation.
    ConfirmPayment {
        /// Acting user; must be the assigned transporter.
        actor: UserId,
        /// The package whose payment is confirmed.
        package_id: Uuid,
    },
}

/// What a successfully applied mutation produced, for notification fan-out.
#[derive(Debug, Clone, PartialEq)]
pub enum FreightMutationOutcome {
    /// The aggregate changed; nothing further to report.
    Updated,
    /// A delivery completed, possibly advancing the sequence.
    Delivery(DeliveryAdvance),
    /// A participant left, removing this many packages.
    ParticipationRemoved {
        /// Packages removed with the participant.
        removed_packages: u32,
    },
    /// A payment operation touched this package.
    Payment(PackageItem),
}

impl FreightRequest {
    /// Apply one guarded mutation; errors leave the aggregate untouched.
    pub fn apply(
        &mut self,
        mutation: FreightMutation,
    ) -> Result<FreightMutationOutcome, FreightError> {
        match mutation {
            FreightMutation::AssignTransporter {
                transporter,
                estimated_arrival,
            } => {
                self.assign_transporter(transporter, estimated_arrival)?;
                Ok(FreightMutationOutcome::Updated)
            }
            FreightMutation::BeginTransit { actor } => {
                self.begin_transit(actor)?;
                Ok(FreightMutationOutcome::Updated)
            }
            FreightMutation::Complete { actor } => {
                self.complete(actor)?;
                Ok(FreightMutationOutcome::Updated)
            }
            FreightMutation::Cancel { actor } => {
                self.cancel(actor)?;
                Ok(FreightMutationOutcome::Updated)
            }
            FreightMutation::Join {
                participant,
                packages,
            } => {
                self.join(participant, packages)?;
                Ok(FreightMutationOutcome::Updated)
            }
            FreightMutation::RemoveParticipation { customer } => {
                let removed_packages = self.remove_participation(customer)?;
                Ok(FreightMutationOutcome::ParticipationRemoved { removed_packages })
            }
            FreightMutation::MarkPackageDelivered { actor, package_id } => {
                let advance = self.mark_package_delivered(actor, package_id)?;
                Ok(FreightMutationOutcome::Delivery(advance))
            }
            FreightMutation::SubmitPayment {
                actor,
                package_id,
                method,
                proof,
            } => {
                let package = self.submit_payment(actor, package_id, method, proof)?;
                Ok(FreightMutationOutcome::Payment(package.clone()))
            }
            FreightMutation::ConfirmPayment { actor, package_id } => {
                let package = self.confirm_payment(actor, package_id)?;
                Ok(FreightMutationOutcome::Payment(package.clone()))
            }
        }
    }
}
