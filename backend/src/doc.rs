//! OpenAPI document exposed through Swagger UI and tooling.

use utoipa::OpenApi;

use crate::domain::{DomainError, ErrorCode};
use crate::inbound::http::freights::{
    CargoBody, CreateFreightRequestBody, FreightBody, JoinFreightRequestBody,
    JoinFreightResponseBody, LeaveFreightResponseBody, LocationBody, PackageBody, ParticipantBody,
    SubmitPaymentRequestBody, UpdateStatusRequestBody,
};
use crate::inbound::http::notifications::NotificationBody;
use crate::inbound::http::reviews::{AddReviewRequestBody, ReviewBody};
use crate::inbound::http::users::{LoginRequestBody, RegisterRequestBody, UserBody};

/// Public OpenAPI surface.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::freights::list_freights,
        crate::inbound::http::freights::create_freight,
        crate::inbound::http::freights::get_freight,
        crate::inbound::http::freights::accept_freight,
        crate::inbound::http::freights::update_status,
        crate::inbound::http::freights::join_freight,
        crate::inbound::http::freights::leave_freight,
        crate::inbound::http::freights::mark_package_delivered,
        crate::inbound::http::freights::submit_payment,
        crate::inbound::http::freights::confirm_payment,
        crate::inbound::http::reviews::list_reviews,
        crate::inbound::http::reviews::add_review,
        crate::inbound::http::notifications::list_notifications,
        crate::inbound::http::notifications::mark_notification_read,
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::health::live,
        crate::inbound::http::health::ready,
    ),
    components(schemas(
        FreightBody,
        PackageBody,
        LocationBody,
        CargoBody,
        ParticipantBody,
        CreateFreightRequestBody,
        UpdateStatusRequestBody,
        JoinFreightRequestBody,
        JoinFreightResponseBody,
        LeaveFreightResponseBody,
        SubmitPaymentRequestBody,
        ReviewBody,
        AddReviewRequestBody,
        NotificationBody,
        UserBody,
        RegisterRequestBody,
        LoginRequestBody,
        DomainError,
        ErrorCode,
    )),
    tags(
        (name = "freights", description = "Freight lifecycle, sharing, and payments"),
        (name = "reviews", description = "Post-delivery ratings"),
        (name = "notifications", description = "Per-user notification log"),
        (name = "users", description = "Registration, login, and the session user"),
        (name = "health", description = "Probes"),
    )
)]
pub struct ApiDoc;
