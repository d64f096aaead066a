#![forbid(unsafe_code)]

//! HTTP surface for the fitlog exercise tracker.
//!
//! Routes are registered through [`configure`] so the server binary and
//! the integration tests build the exact same application.

pub mod error;
pub mod routes;

use actix_web::web;

/// Register all routes on an actix application
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(routes::landing)
        .service(routes::create_user)
        .service(routes::list_users)
        .service(routes::add_exercise)
        .service(routes::get_logs);
}
