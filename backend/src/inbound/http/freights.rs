//! Freight HTTP handlers.
//!
//! ```text
//! GET  /api/freights
//! POST /api/freights
//! GET  /api/freights/{id}
//! POST /api/freights/{id}/accept
//! POST /api/freights/{id}/status
//! POST /api/freights/{id}/join
//! POST /api/freights/{id}/leave
//! POST /api/freights/{id}/packages/{packageId}/delivered
//! POST /api/freights/{id}/packages/{packageId}/payment
//! POST /api/freights/{id}/packages/{packageId}/payment/confirm
//! ```

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Location;
use crate::domain::ports::{
    AcceptFreightRequest, CancelParticipationRequest, CargoInput, ConfirmPaymentRequest,
    CreateFreightRequest, FreightPayload, JoinFreightRequest, MarkPackageDeliveredRequest,
    PackagePayload, SubmitPaymentRequest, UpdateFreightStatusRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    idempotency_key_from, parse_freight_status, parse_location, parse_payment_method,
    parse_rfc3339,
};

/// Route endpoint on the wire.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationBody {
    /// Street address.
    pub address: String,
    /// City name.
    pub city: String,
    /// Latitude, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// State or province, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Country, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl From<&Location> for LocationBody {
    fn from(value: &Location) -> Self {
        Self {
            address: value.address().to_owned(),
            city: value.city().to_owned(),
            latitude: value.latitude(),
            longitude: value.longitude(),
            state: value.state().map(str::to_owned),
            country: value.country().map(str::to_owned),
        }
    }
}

/// Cargo measurements on the wire, centimetres and kilograms.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CargoBody {
    /// Width in centimetres.
    pub width: f64,
    /// Height in centimetres.
    pub height: f64,
    /// Length in centimetres.
    pub length: f64,
    /// Weight in kilograms.
    pub weight: f64,
    /// Contents description.
    pub description: String,
    /// Photo references.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<String>,
}

impl CargoBody {
    fn into_input(self) -> CargoInput {
        CargoInput {
            width_cm: self.width,
            height_cm: self.height,
            length_cm: self.length,
            weight_kg: self.weight,
            description: self.description,
            photos: self.photos,
        }
    }
}

impl From<&crate::domain::CargoDetails> for CargoBody {
    fn from(value: &crate::domain::CargoDetails) -> Self {
        Self {
            width: value.width_cm,
            height: value.height_cm,
            length: value.length_cm,
            weight: value.weight_kg,
            description: value.description.clone(),
            photos: value.photos.clone(),
        }
    }
}

/// One attached package on the wire.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageBody {
    /// Package id.
    #[schema(format = "uuid")]
    pub id: String,
    /// Width in centimetres.
    pub width: f64,
    /// Height in centimetres.
    pub height: f64,
    /// Length in centimetres.
    pub length: f64,
    /// Weight in kilograms.
    pub weight: f64,
    /// Contents description.
    pub description: String,
    /// Photo references.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<String>,
    /// Owning customer id.
    #[schema(format = "uuid")]
    pub owner_id: String,
    /// Owner display name.
    pub owner_name: String,
    /// Delivery progress.
    #[schema(example = "pending")]
    pub delivery_status: String,
    /// Quoted leg distance in kilometres.
    pub distance: f64,
    /// Occupied space in cubic metres.
    pub space: f64,
    /// Quoted price.
    pub price: f64,
    /// Payment progress.
    #[schema(example = "pending")]
    pub payment_status: String,
    /// Chosen payment method, once submitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    /// Proof reference for bank payments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_proof: Option<String>,
}

impl From<&PackagePayload> for PackageBody {
    fn from(value: &PackagePayload) -> Self {
        Self {
            id: value.id.to_string(),
            width: value.width_cm,
            height: value.height_cm,
            length: value.length_cm,
            weight: value.weight_kg,
            description: value.description.clone(),
            photos: value.photos.clone(),
            owner_id: value.owner_id.to_string(),
            owner_name: value.owner_name.clone(),
            delivery_status: value.delivery_status.as_str().to_owned(),
            distance: value.distance_km,
            space: value.space_m3,
            price: value.price,
            payment_status: value.payment_status.as_str().to_owned(),
            payment_method: value.payment_method.map(|m| m.as_str().to_owned()),
            payment_proof: value.payment_proof.clone(),
        }
    }
}

/// One joined participant on the wire.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantBody {
    /// Joining customer id.
    #[schema(format = "uuid")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Collection address.
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

/// One freight request on the wire.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FreightBody {
    /// Freight id.
    #[schema(format = "uuid")]
    pub id: String,
    /// Creating customer id.
    #[schema(format = "uuid")]
    pub customer_id: String,
    /// Creator display name.
    pub customer_name: String,
    /// Creator avatar reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_avatar: Option<String>,
    /// Assigned transporter id, once accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transporter_id: Option<String>,
    /// Transporter display name, once accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transporter_name: Option<String>,
    /// Transporter avatar, once accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transporter_avatar: Option<String>,
    /// Lifecycle status.
    #[schema(example = "pending")]
    pub status: String,
    /// Collection endpoint.
    pub pickup: LocationBody,
    /// Drop-off endpoint.
    pub delivery: LocationBody,
    /// The creator's cargo record.
    pub package_details: CargoBody,
    /// Joined participants' packages, in join order.
    pub packages: Vec<PackageBody>,
    /// Total quoted price.
    pub price: f64,
    /// Quoted route distance in kilometres.
    pub distance: f64,
    /// When the customer wants the freight carried.
    #[schema(format = "date-time")]
    pub requested_date: String,
    /// Estimated arrival, set on acceptance.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(format = "date-time")]
    pub estimated_arrival: Option<String>,
    /// Creation timestamp.
    #[schema(format = "date-time")]
    pub created_at: String,
    /// Whether other customers may attach packages.
    pub is_shared: bool,
    /// Capacity for joined packages.
    pub max_packages: u32,
    /// Count of joined packages.
    pub current_packages: u32,
    /// Customers who joined, in join order.
    #[schema(value_type = Vec<String>)]
    pub shared_by: Vec<String>,
    /// Participant entries, one per joined customer.
    pub participants: Vec<ParticipantBody>,
}

impl From<&FreightPayload> for FreightBody {
    fn from(value: &FreightPayload) -> Self {
        Self {
            id: value.id.to_string(),
            customer_id: value.customer_id.to_string(),
            customer_name: value.customer_name.clone(),
            customer_avatar: value.customer_avatar.clone(),
            transporter_id: value.transporter_id.map(|id| id.to_string()),
            transporter_name: value.transporter_name.clone(),
            transporter_avatar: value.transporter_avatar.clone(),
            status: value.status.as_str().to_owned(),
            pickup: LocationBody::from(&value.pickup),
            delivery: LocationBody::from(&value.delivery),
            package_details: CargoBody::from(&value.package_details),
            packages: value.packages.iter().map(PackageBody::from).collect(),
            price: value.price,
            distance: value.distance_km,
            requested_date: value.requested_date.to_rfc3339(),
            estimated_arrival: value.estimated_arrival.map(|dt| dt.to_rfc3339()),
            created_at: value.created_at.to_rfc3339(),
            is_shared: value.is_shared,
            max_packages: value.max_packages,
            current_packages: value.current_packages,
            shared_by: value.shared_by.iter().map(ToString::to_string).collect(),
            participants: value
                .participants
                .iter()
                .map(|p| ParticipantBody {
                    id: p.id.to_string(),
                    name: p.name.clone(),
                    address: p.address.clone(),
                    city: p.city.clone(),
                    latitude: p.latitude,
                    longitude: p.longitude,
                })
                .collect(),
        }
    }
}

/// Request payload for creating a freight.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFreightRequestBody {
    /// Collection endpoint.
    pub pickup: LocationBody,
    /// Drop-off endpoint.
    pub delivery: LocationBody,
    /// The creator's cargo.
    pub package_details: CargoBody,
    /// When the freight should be carried, RFC 3339.
    #[schema(format = "date-time")]
    pub requested_date: String,
    /// Whether other customers may attach packages.
    #[serde(default)]
    pub is_shared: bool,
    /// Capacity for joined packages; required when shared.
    #[serde(default)]
    pub max_packages: u32,
}

/// Request payload for a lifecycle transition.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequestBody {
    /// Target status.
    #[schema(example = "in_transit")]
    pub status: String,
}

/// Request payload for joining a shared freight.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JoinFreightRequestBody {
    /// Packages to attach; at least one.
    pub packages: Vec<CargoBody>,
}

/// Request payload for submitting a payment.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPaymentRequestBody {
    /// Payment method: `cash` or `bank`.
    #[schema(example = "bank")]
    pub method: String,
    /// Proof reference; required for bank payments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof: Option<String>,
}

/// Response payload for join operations.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JoinFreightResponseBody {
    /// The freight after the join.
    pub freight: FreightBody,
    /// Whether this response was replayed from an idempotency record.
    pub replayed: bool,
}

/// Response payload for leave operations.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveFreightResponseBody {
    /// The freight after the removal.
    pub freight: FreightBody,
    /// Packages removed with the participant.
    pub removed_packages: u32,
    /// Whether this response was replayed from an idempotency record.
    pub replayed: bool,
}

impl LocationBody {
    fn into_location(self, field: &str) -> ApiResult<Location> {
        parse_location(field, self.address, self.city, self.latitude, self.longitude)
    }
}

/// List all freight requests.
#[utoipa::path(
    get,
    path = "/api/freights",
    responses(
        (status = 200, description = "All freights, newest first", body = [FreightBody]),
    ),
    tags = ["freights"],
    operation_id = "listFreights"
)]
#[get("/api/freights")]
pub async fn list_freights(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<FreightBody>>> {
    let freights = state.freights_query.list_freights().await?;
    Ok(web::Json(freights.iter().map(FreightBody::from).collect()))
}

/// Fetch one freight request.
#[utoipa::path(
    get,
    path = "/api/freights/{id}",
    params(("id" = Uuid, Path, description = "Freight id")),
    responses(
        (status = 200, description = "The freight", body = FreightBody),
        (status = 404, description = "Unknown freight", body = ErrorSchema),
    ),
    tags = ["freights"],
    operation_id = "getFreight"
)]
#[get("/api/freights/{id}")]
pub async fn get_freight(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<FreightBody>> {
    let freight = state.freights_query.get_freight(path.into_inner()).await?;
    Ok(web::Json(FreightBody::from(&freight)))
}

/// Create a freight request for the authenticated customer.
#[utoipa::path(
    post,
    path = "/api/freights",
    request_body = CreateFreightRequestBody,
    responses(
        (status = 201, description = "Freight created", body = FreightBody),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Customer role required", body = ErrorSchema),
    ),
    tags = ["freights"],
    operation_id = "createFreight"
)]
#[post("/api/freights")]
pub async fn create_freight(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Json<CreateFreightRequestBody>,
) -> ApiResult<HttpResponse> {
    let customer_id = session.require_user_id()?;
    let body = body.into_inner();

    let request = CreateFreightRequest {
        customer_id,
        pickup: body.pickup.into_location("pickup")?,
        delivery: body.delivery.into_location("delivery")?,
        cargo: body.package_details.into_input(),
        requested_date: parse_rfc3339("requestedDate", &body.requested_date)?,
        is_shared: body.is_shared,
        max_packages: body.max_packages,
    };
    let response = state.freights.create_freight(request).await?;
    Ok(HttpResponse::Created().json(FreightBody::from(&response.freight)))
}

/// Accept a pending freight as the authenticated transporter.
#[utoipa::path(
    post,
    path = "/api/freights/{id}/accept",
    params(("id" = Uuid, Path, description = "Freight id")),
    responses(
        (status = 200, description = "Freight confirmed", body = FreightBody),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Transporter role required", body = ErrorSchema),
        (status = 409, description = "Already assigned or past pending", body = ErrorSchema),
    ),
    tags = ["freights"],
    operation_id = "acceptFreight"
)]
#[post("/api/freights/{id}/accept")]
pub async fn accept_freight(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<FreightBody>> {
    let transporter_id = session.require_user_id()?;
    let response = state
        .freights
        .accept_freight(AcceptFreightRequest {
            freight_id: path.into_inner(),
            transporter_id,
        })
        .await?;
    Ok(web::Json(FreightBody::from(&response.freight)))
}

/// Move a freight through its lifecycle.
#[utoipa::path(
    post,
    path = "/api/freights/{id}/status",
    params(("id" = Uuid, Path, description = "Freight id")),
    request_body = UpdateStatusRequestBody,
    responses(
        (status = 200, description = "Freight updated", body = FreightBody),
        (status = 400, description = "Unknown or unsupported status", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Actor is not a party", body = ErrorSchema),
        (status = 409, description = "Transition not allowed", body = ErrorSchema),
    ),
    tags = ["freights"],
    operation_id = "updateFreightStatus"
)]
#[post("/api/freights/{id}/status")]
pub async fn update_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    body: web::Json<UpdateStatusRequestBody>,
) -> ApiResult<web::Json<FreightBody>> {
    let actor_id = session.require_user_id()?;
    let status = parse_freight_status(&body.status)?;
    let response = state
        .freights
        .update_status(UpdateFreightStatusRequest {
            freight_id: path.into_inner(),
            actor_id,
            status,
        })
        .await?;
    Ok(web::Json(FreightBody::from(&response.freight)))
}

/// Join a shared freight with one or more packages.
///
/// Supports an optional `Idempotency-Key` header: replaying the same key and
/// payload returns the recorded response instead of a duplicate-join error.
#[utoipa::path(
    post,
    path = "/api/freights/{id}/join",
    params(("id" = Uuid, Path, description = "Freight id")),
    request_body = JoinFreightRequestBody,
    responses(
        (status = 200, description = "Joined", body = JoinFreightResponseBody),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Creator cannot join", body = ErrorSchema),
        (status = 409, description = "Capacity, status, or duplicate join", body = ErrorSchema),
    ),
    tags = ["freights"],
    operation_id = "joinFreight"
)]
#[post("/api/freights/{id}/join")]
pub async fn join_freight(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    body: web::Json<JoinFreightRequestBody>,
    req: HttpRequest,
) -> ApiResult<web::Json<JoinFreightResponseBody>> {
    let customer_id = session.require_user_id()?;
    let idempotency_key = idempotency_key_from(&req)?;
    let response = state
        .freights
        .join_freight(JoinFreightRequest {
            freight_id: path.into_inner(),
            customer_id,
            packages: body
                .into_inner()
                .packages
                .into_iter()
                .map(CargoBody::into_input)
                .collect(),
            idempotency_key,
        })
        .await?;
    Ok(web::Json(JoinFreightResponseBody {
        freight: FreightBody::from(&response.freight),
        replayed: response.replayed,
    }))
}

/// Cancel the authenticated customer's participation.
#[utoipa::path(
    post,
    path = "/api/freights/{id}/leave",
    params(("id" = Uuid, Path, description = "Freight id")),
    responses(
        (status = 200, description = "Participation removed", body = LeaveFreightResponseBody),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 409, description = "Not a participant or already in transit", body = ErrorSchema),
    ),
    tags = ["freights"],
    operation_id = "cancelParticipation"
)]
#[post("/api/freights/{id}/leave")]
pub async fn leave_freight(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    req: HttpRequest,
) -> ApiResult<web::Json<LeaveFreightResponseBody>> {
    let customer_id = session.require_user_id()?;
    let idempotency_key = idempotency_key_from(&req)?;
    let response = state
        .freights
        .cancel_participation(CancelParticipationRequest {
            freight_id: path.into_inner(),
            customer_id,
            idempotency_key,
        })
        .await?;
    Ok(web::Json(LeaveFreightResponseBody {
        freight: FreightBody::from(&response.freight),
        removed_packages: response.removed_packages,
        replayed: response.replayed,
    }))
}

/// Complete the delivery of the package at the head of the sequence.
#[utoipa::path(
    post,
    path = "/api/freights/{id}/packages/{packageId}/delivered",
    params(
        ("id" = Uuid, Path, description = "Freight id"),
        ("packageId" = Uuid, Path, description = "Package id"),
    ),
    responses(
        (status = 200, description = "Delivery recorded", body = FreightBody),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Caller is not the transporter", body = ErrorSchema),
        (status = 409, description = "Out of sequence or not in transit", body = ErrorSchema),
    ),
    tags = ["freights"],
    operation_id = "markPackageDelivered"
)]
#[post("/api/freights/{id}/packages/{package_id}/delivered")]
pub async fn mark_package_delivered(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(Uuid, Uuid)>,
) -> ApiResult<web::Json<FreightBody>> {
    let transporter_id = session.require_user_id()?;
    let (freight_id, package_id) = path.into_inner();
    let response = state
        .freights
        .mark_package_delivered(MarkPackageDeliveredRequest {
            freight_id,
            package_id,
            transporter_id,
        })
        .await?;
    Ok(web::Json(FreightBody::from(&response.freight)))
}

/// Submit a payment for one package.
#[utoipa::path(
    post,
    path = "/api/freights/{id}/packages/{packageId}/payment",
    params(
        ("id" = Uuid, Path, description = "Freight id"),
        ("packageId" = Uuid, Path, description = "Package id"),
    ),
    request_body = SubmitPaymentRequestBody,
    responses(
        (status = 200, description = "Payment recorded", body = PackageBody),
        (status = 400, description = "Missing proof or unknown method", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Caller does not own the package", body = ErrorSchema),
        (status = 409, description = "Payment already submitted", body = ErrorSchema),
    ),
    tags = ["freights"],
    operation_id = "submitPayment"
)]
#[post("/api/freights/{id}/packages/{package_id}/payment")]
pub async fn submit_payment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<SubmitPaymentRequestBody>,
) -> ApiResult<web::Json<PackageBody>> {
    let customer_id = session.require_user_id()?;
    let (freight_id, package_id) = path.into_inner();
    let body = body.into_inner();
    let method = parse_payment_method(&body.method)?;
    let response = state
        .freights
        .submit_payment(SubmitPaymentRequest {
            freight_id,
            package_id,
            customer_id,
            method,
            proof: body.proof,
        })
        .await?;
    Ok(web::Json(PackageBody::from(&response.package)))
}

/// Confirm a submitted payment as the transporter.
#[utoipa::path(
    post,
    path = "/api/freights/{id}/packages/{packageId}/payment/confirm",
    params(
        ("id" = Uuid, Path, description = "Freight id"),
        ("packageId" = Uuid, Path, description = "Package id"),
    ),
    responses(
        (status = 200, description = "Payment confirmed", body = PackageBody),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Caller is not the transporter", body = ErrorSchema),
        (status = 409, description = "Nothing to confirm", body = ErrorSchema),
    ),
    tags = ["freights"],
    operation_id = "confirmPayment"
)]
#[post("/api/freights/{id}/packages/{package_id}/payment/confirm")]
pub async fn confirm_payment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(Uuid, Uuid)>,
) -> ApiResult<web::Json<PackageBody>> {
    let transporter_id = session.require_user_id()?;
    let (freight_id, package_id) = path.into_inner();
    let response = state
        .freights
        .confirm_payment(ConfirmPaymentRequest {
            freight_id,
            package_id,
            transporter_id,
        })
        .await?;
    Ok(web::Json(PackageBody::from(&response.package)))
}
