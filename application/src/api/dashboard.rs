//! Dashboard endpoints.

use axum::{Extension, Json};
use serde::Serialize;
use service::{command, query, read, Command as _, Query as _};

use crate::{define_error, error::AsError, Auth, Error, Service};

/// `GET /dashboard` responder.
///
/// # Errors
///
/// See [`query::dashboard::ExecutionError`].
pub async fn show(
    Extension(service): Extension<Service>,
    Auth(principal): Auth,
) -> Result<Json<read::dashboard::Aggregate>, Error> {
    service
        .execute(query::Dashboard(principal))
        .await
        .map(Json)
        .map_err(AsError::into_error)
}

/// `POST /dashboard/refresh` responder.
pub async fn refresh(
    Extension(service): Extension<Service>,
    Auth(principal): Auth,
) -> Json<Refreshed> {
    _ = service
        .execute(command::RefreshDashboard { principal })
        .await;
    Json(Refreshed {
        message: "Dashboard cache cleared",
    })
}

/// Response body of `POST /dashboard/refresh`.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Refreshed {
    /// Confirmation message.
    message: &'static str,
}

impl AsError for query::dashboard::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UnauthorizedRole(e) => e.try_as_error(),
            Self::ProfileNotExists(_) => {
                Some(DashboardError::ProfileNotFound.into())
            }
        }
    }
}

define_error! {
    enum DashboardError {
        #[code = "PROFILE_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Profile not found"]
        ProfileNotFound,
    }
}
