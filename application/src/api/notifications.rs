//! [`Notification`] endpoints.

use axum::{extract::Path, Extension, Json};
use serde::Serialize;
use service::{
    command,
    domain::{notification, Notification},
    query, scope, Command as _, Query as _,
};

use crate::{define_error, error::AsError, Auth, Error, Service};

/// `GET /notifications` responder.
///
/// Returns the newest notifications of the caller, capped the same way the
/// dashboard feed is.
///
/// # Errors
///
/// If the caller's role has no notification scope, or the store fails.
pub async fn list(
    Extension(service): Extension<Service>,
    Auth(principal): Auth,
) -> Result<Json<Vec<Notification>>, Error> {
    let scope =
        scope::notifications(&principal).map_err(AsError::into_error)?;
    service
        .execute(query::notifications::List::by(scope))
        .await
        .map(Json)
        .map_err(AsError::into_error)
}

/// `PUT /notifications/:id/read` responder.
///
/// # Errors
///
/// If the [`Notification`] is absent, or addressed to another user.
pub async fn mark_read(
    Extension(service): Extension<Service>,
    Auth(principal): Auth,
    Path(id): Path<notification::Id>,
) -> Result<Json<Notification>, Error> {
    service
        .execute(command::MarkNotificationRead { principal, id })
        .await
        .map(Json)
        .map_err(AsError::into_error)
}

/// `POST /notifications/mark-all-read` responder.
///
/// # Errors
///
/// If the store fails.
pub async fn mark_all_read(
    Extension(service): Extension<Service>,
    Auth(principal): Auth,
) -> Result<Json<MarkedAllRead>, Error> {
    service
        .execute(command::MarkAllNotificationsRead { principal })
        .await
        .map(|marked| Json(MarkedAllRead { marked }))
        .map_err(AsError::into_error)
}

/// Response body of `POST /notifications/mark-all-read`.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct MarkedAllRead {
    /// Number of notifications transitioned into the read state.
    marked: u64,
}

impl AsError for command::mark_notification_read::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotificationNotExists(_) => {
                Some(NotificationError::NotFound.into())
            }
            Self::NotAddressee(_) => {
                Some(NotificationError::AccessDenied.into())
            }
        }
    }
}

impl AsError for command::mark_all_notifications_read::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

define_error! {
    enum NotificationError {
        #[code = "NOTIFICATION_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Notification not found"]
        NotFound,

        #[code = "ACCESS_DENIED"]
        #[status = FORBIDDEN]
        #[message = "Access denied"]
        AccessDenied,
    }
}
