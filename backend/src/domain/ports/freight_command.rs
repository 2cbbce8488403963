//! Driving port for freight mutations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    CargoDetails, DeliveryStatus, DomainError, FreightRequest, FreightStatus, IdempotencyKey,
    Location, PackageItem, Participant, PaymentMethod, PaymentStatus, UserId,
};

/// Serializable package representation for driving ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagePayload {
    /// Stable identifier.
    pub id: Uuid,
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
    /// Photo references.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<String>,
    /// Owning customer.
    pub owner_id: UserId,
    /// Owner display name.
    pub owner_name: String,
    /// Delivery progress.
    pub delivery_status: DeliveryStatus,
    /// Quoted leg distance in kilometres.
    pub distance_km: f64,
    /// Occupied space in cubic metres.
    pub space_m3: f64,
    /// Quoted price.
    pub price: f64,
    /// Payment progress.
    pub payment_status: PaymentStatus,
    /// Chosen payment method, once submitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    /// Proof reference for bank payments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_proof: Option<String>,
}

impl From<&PackageItem> for PackagePayload {
    fn from(value: &PackageItem) -> Self {
        Self {
            id: value.id(),
            width_cm: value.dimensions().width_cm(),
            height_cm: value.dimensions().height_cm(),
            length_cm: value.dimensions().length_cm(),
            weight_kg: value.dimensions().weight_kg(),
            description: value.description().to_owned(),
            photos: value.photos().to_vec(),
            owner_id: value.owner_id(),
            owner_name: value.owner_name().to_owned(),
            delivery_status: value.delivery_status(),
            distance_km: value.distance_km(),
            space_m3: value.space_m3(),
            price: value.price(),
            payment_status: value.payment_status(),
            payment_method: value.payment_method(),
            payment_proof: value.payment_proof().map(str::to_owned),
        }
    }
}

/// Serializable freight representation for driving ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreightPayload {
    /// Stable identifier.
    pub id: Uuid,
    /// Creating customer.
    pub customer_id: UserId,
    /// Creator display name.
    pub customer_name: String,
    /// Creator avatar reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_avatar: Option<String>,
    /// Assigned transporter, once accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transporter_id: Option<UserId>,
    /// Transporter display name, once accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transporter_name: Option<String>,
    /// Transporter avatar, once accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transporter_avatar: Option<String>,
    /// Lifecycle status.
    pub status: FreightStatus,
    /// Collection endpoint.
    pub pickup: Location,
    /// Drop-off endpoint.
    pub delivery: Location,
    /// The creator's cargo record.
    pub package_details: CargoDetails,
    /// Joined participants' packages, in join order.
    pub packages: Vec<PackagePayload>,
    /// Total quoted price.
    pub price: f64,
    /// Quoted route distance in kilometres.
    pub distance_km: f64,
    /// When the customer wants the freight carried.
    pub requested_date: DateTime<Utc>,
    /// Estimated arrival, set on acceptance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_arrival: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Whether other customers may attach packages.
    pub is_shared: bool,
    /// Capacity for joined packages.
    pub max_packages: u32,
    /// Count of joined packages.
    pub current_packages: u32,
    /// Customers who joined, in join order.
    pub shared_by: Vec<UserId>,
    /// Participant entries, one per joined customer.
    pub participants: Vec<Participant>,
}

impl From<&FreightRequest> for FreightPayload {
    fn from(value: &FreightRequest) -> Self {
        Self {
            id: value.id(),
            customer_id: value.customer_id(),
            customer_name: value.customer_name().to_owned(),
            customer_avatar: value.customer_avatar().map(str::to_owned),
            transporter_id: value.transporter_id(),
            transporter_name: value.transporter_name().map(str::to_owned),
            transporter_avatar: value.transporter_avatar().map(str::to_owned),
            status: value.status(),
            pickup: value.pickup().clone(),
            delivery: value.delivery().clone(),
            package_details: value.cargo().clone(),
            packages: value.packages().iter().map(PackagePayload::from).collect(),
            price: value.price(),
            distance_km: value.distance_km(),
            requested_date: value.requested_date(),
            estimated_arrival: value.estimated_arrival(),
            created_at: value.created_at(),
            is_shared: value.is_shared(),
            max_packages: value.max_packages(),
            current_packages: value.current_packages(),
            shared_by: value.shared_by().to_vec(),
            participants: value.participants().to_vec(),
        }
    }
}

/// Cargo measurements supplied when creating a freight or joining one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CargoInput {
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
    /// Photo references.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<String>,
}

/// Request to create a freight.
#[derive(Debug, Clone)]
pub struct CreateFreightRequest {
    /// Authenticated creator; must hold the customer role.
    pub customer_id: UserId,
    /// Collection endpoint.
    pub pickup: Location,
    /// Drop-off endpoint.
    pub delivery: Location,
    /// The creator's cargo.
    pub cargo: CargoInput,
    /// When the customer wants the freight carried.
    pub requested_date: DateTime<Utc>,
    /// Whether other customers may attach packages.
    pub is_shared: bool,
    /// Capacity for joined packages; ignored when not shared.
    pub max_packages: u32,
}

/// Response from creating a freight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFreightResponse {
    /// The created freight.
    pub freight: FreightPayload,
}

/// Request to accept a pending freight.
#[derive(Debug, Clone)]
pub struct AcceptFreightRequest {
    /// The freight being accepted.
    pub freight_id: Uuid,
    /// Authenticated transporter.
    pub transporter_id: UserId,
}

/// Request to move a freight through its lifecycle.
#[derive(Debug, Clone)]
pub struct UpdateFreightStatusRequest {
    /// The freight being updated.
    pub freight_id: Uuid,
    /// Authenticated actor.
    pub actor_id: UserId,
    /// Requested target status.
    pub status: FreightStatus,
}

/// Response carrying the updated freight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreightResponse {
    /// The freight after the mutation.
    pub freight: FreightPayload,
}

/// Request to join a shared freight with one or more packages.
#[derive(Debug, Clone)]
pub struct JoinFreightRequest {
    /// The freight being joined.
    pub freight_id: Uuid,
    /// Authenticated joining customer.
    pub customer_id: UserId,
    /// Packages to attach; at least one.
    pub packages: Vec<CargoInput>,
    /// Optional retry key; replaying the same key and payload returns the
    /// recorded response.
    pub idempotency_key: Option<IdempotencyKey>,
}

/// Response from joining a freight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinFreightResponse {
    /// The freight after the join.
    pub freight: FreightPayload,
    /// Whether this response was replayed from an idempotency record.
    pub replayed: bool,
}

/// Request to cancel one's own participation.
#[derive(Debug, Clone)]
pub struct CancelParticipationRequest {
    /// The freight being left.
    pub freight_id: Uuid,
    /// Authenticated leaving customer.
    pub customer_id: UserId,
    /// Optional retry key.
    pub idempotency_key: Option<IdempotencyKey>,
}

/// Response from cancelling participation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelParticipationResponse {
    /// The freight after the removal.
    pub freight: FreightPayload,
    /// Packages removed with the participant.
    pub removed_packages: u32,
    /// Whether this response was replayed from an idempotency record.
    pub replayed: bool,
}

/// Request to complete the delivery of one package.
#[derive(Debug, Clone)]
pub struct MarkPackageDeliveredRequest {
    /// The freight being progressed.
    pub freight_id: Uuid,
    /// The package being handed over.
    pub package_id: Uuid,
    /// Authenticated transporter.
    pub transporter_id: UserId,
}

/// Request to submit a payment for one package.
#[derive(Debug, Clone)]
pub struct SubmitPaymentRequest {
    /// The freight the package belongs to.
    pub freight_id: Uuid,
    /// The package being paid for.
    pub package_id: Uuid,
    /// Authenticated package owner.
    pub customer_id: UserId,
    /// Chosen payment method.
    pub method: PaymentMethod,
    /// Proof reference; required for bank payments.
    pub proof: Option<String>,
}

/// Request for the transporter to confirm a submitted payment.
#[derive(Debug, Clone)]
pub struct ConfirmPaymentRequest {
    /// The freight the package belongs to.
    pub freight_id: Uuid,
    /// The package whose payment is confirmed.
    pub package_id: Uuid,
    /// Authenticated transporter.
    pub transporter_id: UserId,
}

/// Response carrying one package after a payment operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageResponse {
    /// The package after the mutation.
    pub package: PackagePayload,
}

/// Driving port for freight write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FreightCommand: Send + Sync {
    /// Create a pending freight for an authenticated customer.
    async fn create_freight(
        &self,
        request: CreateFreightRequest,
    ) -> Result<CreateFreightResponse, DomainError>;

    /// Accept a pending freight as a transporter.
    async fn accept_freight(
        &self,
        request: AcceptFreightRequest,
    ) -> Result<FreightResponse, DomainError>;

    /// Move a freight through its lifecycle (`in_transit`, `delivered`,
    /// `cancelled`).
    async fn update_status(
        &self,
        request: UpdateFreightStatusRequest,
    ) -> Result<FreightResponse, DomainError>;

    /// Attach a joining customer's packages to a shared freight.
    async fn join_freight(
        &self,
        request: JoinFreightRequest,
    ) -> Result<JoinFreightResponse, DomainError>;

    /// Remove the caller's participation and packages.
    async fn cancel_participation(
        &self,
        request: CancelParticipationRequest,
    ) -> Result<CancelParticipationResponse, DomainError>;

    /// Complete the delivery of the package at the head of the sequence.
    async fn mark_package_delivered(
        &self,
        request: MarkPackageDeliveredRequest,
    ) -> Result<FreightResponse, DomainError>;

    /// Submit a payment for one package.
    async fn submit_payment(
        &self,
        request: SubmitPaymentRequest,
    ) -> Result<PackageResponse, DomainError>;

    /// Confirm a submitted payment as the transporter.
    async fn confirm_payment(
        &self,
        request: ConfirmPaymentRequest,
    ) -> Result<PackageResponse, DomainError>;
}
