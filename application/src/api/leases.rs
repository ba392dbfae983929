//! [`Lease`] endpoints.

use axum::{extract::Path, Extension, Json};
use common::Money;
use serde::Deserialize;
use service::{
    command,
    domain::{lease, property, user, Lease},
    query, scope, Command as _, Query as _,
};

use crate::{define_error, error::AsError, Auth, Error, Service};

/// `GET /leases` responder.
///
/// # Errors
///
/// If the caller's role has no lease scope, or the store fails.
pub async fn list(
    Extension(service): Extension<Service>,
    Auth(principal): Auth,
) -> Result<Json<Vec<Lease>>, Error> {
    let scope = scope::leases(&principal).map_err(AsError::into_error)?;
    service
        .execute(query::leases::List::by(scope))
        .await
        .map(Json)
        .map_err(AsError::into_error)
}

/// `GET /leases/:id` responder.
///
/// # Errors
///
/// If the [`Lease`] is absent, or the caller is not a party to it.
pub async fn show(
    Extension(service): Extension<Service>,
    Auth(principal): Auth,
    Path(id): Path<lease::Id>,
) -> Result<Json<Lease>, Error> {
    let lease = service
        .execute(query::leases::ById::by(id))
        .await
        .map_err(AsError::into_error)?
        .ok_or_else(|| Error::from(LeaseError::NotFound))?;

    let allowed = match principal.role {
        user::Role::Landlord => lease.landlord_id == principal.id,
        user::Role::Tenant => lease.tenant_id == principal.id,
        user::Role::Contractor => false,
    };
    if !allowed {
        return Err(LeaseError::AccessDenied.into());
    }

    Ok(Json(lease))
}

/// Request body of `POST /leases`.
#[derive(Debug, Deserialize)]
pub struct CreateLease {
    /// ID of the property to grant the lease over.
    pub property_id: property::Id,

    /// ID of the tenant to hold the lease.
    pub tenant_id: user::Id,

    /// Start of the lease.
    pub start_date: lease::StartDateTime,

    /// End of the lease.
    pub end_date: lease::EndDateTime,

    /// Monthly rent.
    pub monthly_rent: Money,

    /// Security deposit.
    #[serde(default)]
    pub security_deposit: Option<Money>,

    /// Initial status.
    #[serde(default = "CreateLease::default_status")]
    pub status: lease::Status,
}

impl CreateLease {
    /// Status a lease is created in unless stated otherwise.
    fn default_status() -> lease::Status {
        lease::Status::Active
    }
}

/// `POST /leases` responder.
///
/// # Errors
///
/// If the caller is not the landlord of the property, or the store fails.
pub async fn create(
    Extension(service): Extension<Service>,
    Auth(principal): Auth,
    Json(body): Json<CreateLease>,
) -> Result<(http::StatusCode, Json<Lease>), Error> {
    let CreateLease {
        property_id,
        tenant_id,
        start_date,
        end_date,
        monthly_rent,
        security_deposit,
        status,
    } = body;

    service
        .execute(command::CreateLease {
            principal,
            property_id,
            tenant_id,
            start_date,
            end_date,
            monthly_rent,
            security_deposit,
            status,
        })
        .await
        .map(|l| (http::StatusCode::CREATED, Json(l)))
        .map_err(AsError::into_error)
}

/// Request body of `PUT /leases/:id`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateLease {
    /// New tenant to hold the lease.
    pub tenant_id: Option<user::Id>,

    /// New start of the lease.
    pub start_date: Option<lease::StartDateTime>,

    /// New end of the lease.
    pub end_date: Option<lease::EndDateTime>,

    /// New monthly rent.
    pub monthly_rent: Option<Money>,

    /// New security deposit.
    pub security_deposit: Option<Money>,

    /// New status.
    pub status: Option<lease::Status>,
}

/// `PUT /leases/:id` responder.
///
/// # Errors
///
/// If the [`Lease`] is absent, or is granted by another landlord.
pub async fn update(
    Extension(service): Extension<Service>,
    Auth(principal): Auth,
    Path(id): Path<lease::Id>,
    Json(body): Json<UpdateLease>,
) -> Result<Json<Lease>, Error> {
    let UpdateLease {
        tenant_id,
        start_date,
        end_date,
        monthly_rent,
        security_deposit,
        status,
    } = body;

    service
        .execute(command::UpdateLease {
            principal,
            id,
            tenant_id,
            start_date,
            end_date,
            monthly_rent,
            security_deposit,
            status,
        })
        .await
        .map(Json)
        .map_err(AsError::into_error)
}

/// `DELETE /leases/:id` responder.
///
/// # Errors
///
/// If the [`Lease`] is absent, or is granted by another landlord.
pub async fn remove(
    Extension(service): Extension<Service>,
    Auth(principal): Auth,
    Path(id): Path<lease::Id>,
) -> Result<http::StatusCode, Error> {
    service
        .execute(command::DeleteLease { principal, id })
        .await
        .map(|()| http::StatusCode::NO_CONTENT)
        .map_err(AsError::into_error)
}

impl AsError for command::create_lease::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotLandlord(_) => Some(LeaseError::OnlyLandlord.into()),
            Self::PropertyNotExists(_) => {
                Some(LeaseError::PropertyNotFound.into())
            }
            Self::NotOwner(_) => Some(LeaseError::AccessDenied.into()),
        }
    }
}

impl AsError for command::update_lease::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::LeaseNotExists(_) => Some(LeaseError::NotFound.into()),
            Self::NotOwner(_) => Some(LeaseError::AccessDenied.into()),
        }
    }
}

impl AsError for command::delete_lease::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::LeaseNotExists(_) => Some(LeaseError::NotFound.into()),
            Self::NotOwner(_) => Some(LeaseError::AccessDenied.into()),
        }
    }
}

define_error! {
    enum LeaseError {
        #[code = "LEASE_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Lease not found"]
        NotFound,

        #[code = "PROPERTY_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Property not found"]
        PropertyNotFound,

        #[code = "ACCESS_DENIED"]
        #[status = FORBIDDEN]
        #[message = "Access denied"]
        AccessDenied,

        #[code = "ONLY_LANDLORD"]
        #[status = FORBIDDEN]
        #[message = "Only landlords can create leases"]
        OnlyLandlord,
    }
}
