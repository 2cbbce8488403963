//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod freights;
pub mod health;
pub mod notifications;
pub mod reviews;
pub mod schemas;
pub mod session;
pub mod state;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every REST endpoint on the given service config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(freights::list_freights)
        .service(freights::create_freight)
        .service(freights::get_freight)
        .service(freights::accept_freight)
        .service(freights::update_status)
        .service(freights::join_freight)
        .service(freights::leave_freight)
        .service(freights::mark_package_delivered)
        .service(freights::submit_payment)
        .service(freights::confirm_payment)
        .service(reviews::list_reviews)
        .service(reviews::add_review)
        .service(notifications::list_notifications)
        .service(notifications::mark_notification_read)
        .service(users::register)
        .service(users::login)
        .service(users::logout)
        .service(users::current_user)
        .service(health::live)
        .service(health::ready);
}
