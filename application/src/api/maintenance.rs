//! Maintenance [`Request`] endpoints.
//!
//! [`Request`]: maintenance::Request

use axum::{extract::Path, Extension, Json};
use serde::Deserialize;
use service::{
    command,
    domain::{maintenance, property, user},
    query, scope, Command as _, Query as _,
};

use crate::{define_error, error::AsError, Auth, Error, Service};

/// `GET /maintenance` responder.
///
/// # Errors
///
/// If the caller's role has no maintenance scope, or the store fails.
pub async fn list(
    Extension(service): Extension<Service>,
    Auth(principal): Auth,
) -> Result<Json<Vec<maintenance::Request>>, Error> {
    let scope = scope::maintenance_requests(&principal)
        .map_err(AsError::into_error)?;
    service
        .execute(query::maintenance::List::by(scope))
        .await
        .map(Json)
        .map_err(AsError::into_error)
}

/// `GET /maintenance/:id` responder.
///
/// # Errors
///
/// If the [`Request`] is absent, or the caller is not a party to it.
///
/// [`Request`]: maintenance::Request
pub async fn show(
    Extension(service): Extension<Service>,
    Auth(principal): Auth,
    Path(id): Path<maintenance::Id>,
) -> Result<Json<maintenance::Request>, Error> {
    let request = service
        .execute(query::maintenance::ById::by(id))
        .await
        .map_err(AsError::into_error)?
        .ok_or_else(|| Error::from(MaintenanceError::NotFound))?;

    let allowed = match principal.role {
        user::Role::Landlord => request.landlord_id == principal.id,
        user::Role::Tenant => request.tenant_id == Some(principal.id),
        user::Role::Contractor => false,
    };
    if !allowed {
        return Err(MaintenanceError::AccessDenied.into());
    }

    Ok(Json(request))
}

/// Request body of `POST /maintenance`.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    /// ID of the property the request is raised against.
    pub property_id: property::Id,

    /// Short title.
    pub title: maintenance::Title,

    /// Detailed description.
    pub description: maintenance::Description,

    /// Priority of the issue.
    #[serde(default = "CreateRequest::default_priority")]
    pub priority: maintenance::Priority,
}

impl CreateRequest {
    /// Priority a request is raised with unless stated otherwise.
    fn default_priority() -> maintenance::Priority {
        maintenance::Priority::Medium
    }
}

/// `POST /maintenance` responder.
///
/// # Errors
///
/// If the property is absent, or the caller may not raise requests against
/// it.
pub async fn create(
    Extension(service): Extension<Service>,
    Auth(principal): Auth,
    Json(body): Json<CreateRequest>,
) -> Result<(http::StatusCode, Json<maintenance::Request>), Error> {
    let CreateRequest {
        property_id,
        title,
        description,
        priority,
    } = body;

    service
        .execute(command::CreateMaintenanceRequest {
            principal,
            property_id,
            title,
            description,
            priority,
        })
        .await
        .map(|r| (http::StatusCode::CREATED, Json(r)))
        .map_err(AsError::into_error)
}

/// Request body of `PUT /maintenance/:id`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateRequest {
    /// New short title.
    pub title: Option<maintenance::Title>,

    /// New detailed description.
    pub description: Option<maintenance::Description>,

    /// New priority.
    pub priority: Option<maintenance::Priority>,

    /// New status.
    pub status: Option<maintenance::Status>,
}

/// `PUT /maintenance/:id` responder.
///
/// # Errors
///
/// If the [`Request`] is absent, or the caller is not a party to it.
///
/// [`Request`]: maintenance::Request
pub async fn update(
    Extension(service): Extension<Service>,
    Auth(principal): Auth,
    Path(id): Path<maintenance::Id>,
    Json(body): Json<UpdateRequest>,
) -> Result<Json<maintenance::Request>, Error> {
    let UpdateRequest {
        title,
        description,
        priority,
        status,
    } = body;

    service
        .execute(command::UpdateMaintenanceRequest {
            principal,
            id,
            title,
            description,
            priority,
            status,
        })
        .await
        .map(Json)
        .map_err(AsError::into_error)
}

impl AsError for command::create_maintenance_request::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => {
                Some(MaintenanceError::PropertyNotFound.into())
            }
            Self::NoActiveLease(_) => {
                Some(MaintenanceError::NoActiveLease.into())
            }
            Self::NotOwner(_) => Some(MaintenanceError::AccessDenied.into()),
            Self::UnauthorizedRole(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::update_maintenance_request::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::RequestNotExists(_) => Some(MaintenanceError::NotFound.into()),
            Self::NotParticipant(_) => {
                Some(MaintenanceError::AccessDenied.into())
            }
        }
    }
}

define_error! {
    enum MaintenanceError {
        #[code = "MAINTENANCE_REQUEST_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Maintenance request not found"]
        NotFound,

        #[code = "PROPERTY_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Property not found"]
        PropertyNotFound,

        #[code = "NO_ACTIVE_LEASE"]
        #[status = FORBIDDEN]
        #[message = "No active lease for this property"]
        NoActiveLease,

        #[code = "ACCESS_DENIED"]
        #[status = FORBIDDEN]
        #[message = "Access denied"]
        AccessDenied,
    }
}
