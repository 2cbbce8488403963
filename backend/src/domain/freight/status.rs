//! Freight, delivery, and payment status enums with their transition rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle state of a freight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FreightStatus {
    /// Created, waiting for a transporter.
    Pending,
    /// Accepted by a transporter.
    Confirmed,
    /// On the road.
    InTransit,
    /// All cargo delivered.
    Delivered,
    /// Abandoned before transit.
    Cancelled,
}

impl FreightStatus {
    /// Stable string form used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether the state machine permits moving from `self` to `next`.
    ///
    /// Cancellation is reachable from `pending` and `confirmed` only; the
    /// forward path is strictly `pending → confirmed → in_transit →
    /// delivered`.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Confirmed, Self::InTransit)
                | (Self::InTransit, Self::Delivered)
                | (Self::Pending | Self::Confirmed, Self::Cancelled)
        )
    }

    /// Whether the freight can still be cancelled outright.
    pub fn is_cancellable(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }
}

impl fmt::Display for FreightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse error for [`FreightStatus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFreightStatusError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseFreightStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid freight status: {}", self.input)
    }
}

impl std::error::Error for ParseFreightStatusError {}

impl FromStr for FreightStatus {
    type Err = ParseFreightStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "in_transit" => Ok(Self::InTransit),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseFreightStatusError {
                input: value.to_owned(),
            }),
        }
    }
}

/// Per-package delivery progress inside a shared freight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// Waiting for its slot in the delivery sequence.
    Pending,
    /// Currently being carried to its owner.
    InTransit,
    /// Handed over.
    Delivered,
}

impl DeliveryStatus {
    /// Stable string form used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-package payment progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// No payment submitted yet.
    Pending,
    /// Owner submitted a payment; waiting for the transporter.
    Paid,
    /// Transporter acknowledged the payment.
    Confirmed,
}

impl PaymentStatus {
    /// Stable string form used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Confirmed => "confirmed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a package owner pays for their slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash on delivery; no proof required.
    Cash,
    /// Bank transfer; requires an uploaded proof reference.
    Bank,
}

impl PaymentMethod {
    /// Stable string form used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Bank => "bank",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse error for [`PaymentMethod`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePaymentMethodError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParsePaymentMethodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid payment method: {}", self.input)
    }
}

impl std::error::Error for ParsePaymentMethodError {}

impl FromStr for PaymentMethod {
    type Err = ParsePaymentMethodError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "cash" => Ok(Self::Cash),
            "bank" => Ok(Self::Bank),
            _ => Err(ParsePaymentMethodError {
                input: value.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(FreightStatus::Pending, FreightStatus::Confirmed, true)]
    #[case(FreightStatus::Confirmed, FreightStatus::InTransit, true)]
    #[case(FreightStatus::InTransit, FreightStatus::Delivered, true)]
    #[case(FreightStatus::Pending, FreightStatus::Cancelled, true)]
    #[case(FreightStatus::Confirmed, FreightStatus::Cancelled, true)]
    #[case(FreightStatus::InTransit, FreightStatus::Cancelled, false)]
    #[case(FreightStatus::Delivered, FreightStatus::Cancelled, false)]
    #[case(FreightStatus::Pending, FreightStatus::InTransit, false)]
    #[case(FreightStatus::Delivered, FreightStatus::Pending, false)]
    #[case(FreightStatus::Cancelled, FreightStatus::Confirmed, false)]
    fn transition_table_matches_lifecycle(
        #[case] from: FreightStatus,
        #[case] to: FreightStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(from.can_transition_to(to), allowed);
    }

    #[rstest]
    #[case("pending", FreightStatus::Pending)]
    #[case("in_transit", FreightStatus::InTransit)]
    #[case("cancelled", FreightStatus::Cancelled)]
    fn freight_status_round_trips(#[case] raw: &str, #[case] status: FreightStatus) {
        assert_eq!(raw.parse::<FreightStatus>().expect("known status"), status);
        assert_eq!(status.as_str(), raw);
    }

    #[rstest]
    fn unknown_status_is_rejected() {
        let err = "shipped".parse::<FreightStatus>().expect_err("unknown");
        assert_eq!(err.input, "shipped");
    }

    #[rstest]
    #[case("cash", PaymentMethod::Cash)]
    #[case("bank", PaymentMethod::Bank)]
    fn payment_method_round_trips(#[case] raw: &str, #[case] method: PaymentMethod) {
        assert_eq!(raw.parse::<PaymentMethod>().expect("known method"), method);
        assert_eq!(method.as_str(), raw);
    }
}
