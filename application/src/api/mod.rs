//! REST API definitions.

pub mod dashboard;
pub mod documents;
pub mod leases;
pub mod maintenance;
pub mod notifications;
pub mod payments;
pub mod properties;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

/// Builds the [`Router`] of the REST API.
///
/// The [`Service`] and [`JwtDecodingKey`] extensions must be layered on top
/// by the caller.
///
/// [`JwtDecodingKey`]: crate::JwtDecodingKey
/// [`Service`]: crate::Service
#[must_use]
pub fn router() -> Router {
    Router::new()
        .route("/dashboard", get(dashboard::show))
        .route("/dashboard/refresh", post(dashboard::refresh))
        .route(
            "/properties",
            get(properties::list).post(properties::create),
        )
        .route(
            "/properties/:id",
            get(properties::show)
                .put(properties::update)
                .delete(properties::remove),
        )
        .route("/leases", get(leases::list).post(leases::create))
        .route(
            "/leases/:id",
            get(leases::show).put(leases::update).delete(leases::remove),
        )
        .route(
            "/maintenance",
            get(maintenance::list).post(maintenance::create),
        )
        .route(
            "/maintenance/:id",
            get(maintenance::show).put(maintenance::update),
        )
        .route("/payments", get(payments::list).post(payments::create))
        .route(
            "/payments/:id",
            get(payments::show).put(payments::update),
        )
        .route(
            "/documents",
            get(documents::list).post(documents::create),
        )
        .route("/documents/:id", delete(documents::remove))
        .route("/notifications", get(notifications::list))
        .route(
            "/notifications/:id/read",
            put(notifications::mark_read),
        )
        .route(
            "/notifications/mark-all-read",
            post(notifications::mark_all_read),
        )
}
