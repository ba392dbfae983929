//! [`Property`] endpoints.

use axum::{extract::Path, Extension, Json};
use rust_decimal::Decimal;
use serde::Deserialize;
use service::{
    command,
    domain::{property, user, Property},
    query, scope, Command as _, Query as _,
};

use crate::{define_error, error::AsError, Auth, Error, Service};

/// `GET /properties` responder.
///
/// # Errors
///
/// If the caller's role has no property scope, or the store fails.
pub async fn list(
    Extension(service): Extension<Service>,
    Auth(principal): Auth,
) -> Result<Json<Vec<Property>>, Error> {
    let scope =
        scope::properties(&principal).map_err(AsError::into_error)?;
    service
        .execute(query::properties::List::by(scope))
        .await
        .map(Json)
        .map_err(AsError::into_error)
}

/// `GET /properties/:id` responder.
///
/// # Errors
///
/// If the [`Property`] is absent, or the caller may not see it.
pub async fn show(
    Extension(service): Extension<Service>,
    Auth(principal): Auth,
    Path(id): Path<property::Id>,
) -> Result<Json<Property>, Error> {
    let property = service
        .execute(query::properties::ById::by(id))
        .await
        .map_err(AsError::into_error)?
        .ok_or_else(|| Error::from(PropertyError::NotFound))?;

    let allowed = match principal.role {
        user::Role::Landlord => property.landlord_id == principal.id,
        user::Role::Tenant => *service
            .execute(query::leases::Holding::by((id, principal.id)))
            .await
            .map_err(AsError::into_error)?,
        user::Role::Contractor => false,
    };
    if !allowed {
        return Err(PropertyError::AccessDenied.into());
    }

    Ok(Json(property))
}

/// Request body of `POST /properties`.
#[derive(Debug, Deserialize)]
pub struct CreateProperty {
    /// Street address.
    pub address: property::Address,

    /// City.
    pub city: property::City,

    /// State.
    pub state: property::State,

    /// Postal code.
    pub zip_code: property::ZipCode,

    /// Unit number within the building.
    #[serde(default)]
    pub unit_number: Option<property::UnitNumber>,

    /// Kind of the property.
    #[serde(default)]
    pub kind: Option<property::Kind>,

    /// Number of bedrooms.
    #[serde(default)]
    pub bedrooms: Option<u16>,

    /// Number of bathrooms.
    #[serde(default)]
    pub bathrooms: Option<Decimal>,

    /// Interior area in square feet.
    #[serde(default)]
    pub square_feet: Option<u32>,

    /// Free-form description.
    #[serde(default)]
    pub description: Option<property::Description>,
}

/// `POST /properties` responder.
///
/// # Errors
///
/// If the caller is not a landlord, or the store fails.
pub async fn create(
    Extension(service): Extension<Service>,
    Auth(principal): Auth,
    Json(body): Json<CreateProperty>,
) -> Result<(http::StatusCode, Json<Property>), Error> {
    let CreateProperty {
        address,
        city,
        state,
        zip_code,
        unit_number,
        kind,
        bedrooms,
        bathrooms,
        square_feet,
        description,
    } = body;

    service
        .execute(command::CreateProperty {
            principal,
            address,
            city,
            state,
            zip_code,
            unit_number,
            kind,
            bedrooms,
            bathrooms,
            square_feet,
            description,
        })
        .await
        .map(|p| (http::StatusCode::CREATED, Json(p)))
        .map_err(AsError::into_error)
}

/// Request body of `PUT /properties/:id`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateProperty {
    /// New street address.
    pub address: Option<property::Address>,

    /// New city.
    pub city: Option<property::City>,

    /// New state.
    pub state: Option<property::State>,

    /// New postal code.
    pub zip_code: Option<property::ZipCode>,

    /// New unit number.
    pub unit_number: Option<property::UnitNumber>,

    /// New kind.
    pub kind: Option<property::Kind>,

    /// New number of bedrooms.
    pub bedrooms: Option<u16>,

    /// New number of bathrooms.
    pub bathrooms: Option<Decimal>,

    /// New interior area in square feet.
    pub square_feet: Option<u32>,

    /// New free-form description.
    pub description: Option<property::Description>,
}

/// `PUT /properties/:id` responder.
///
/// # Errors
///
/// If the [`Property`] is absent, or belongs to another landlord.
pub async fn update(
    Extension(service): Extension<Service>,
    Auth(principal): Auth,
    Path(id): Path<property::Id>,
    Json(body): Json<UpdateProperty>,
) -> Result<Json<Property>, Error> {
    let UpdateProperty {
        address,
        city,
        state,
        zip_code,
        unit_number,
        kind,
        bedrooms,
        bathrooms,
        square_feet,
        description,
    } = body;

    service
        .execute(command::UpdateProperty {
            principal,
            id,
            address,
            city,
            state,
            zip_code,
            unit_number,
            kind,
            bedrooms,
            bathrooms,
            square_feet,
            description,
        })
        .await
        .map(Json)
        .map_err(AsError::into_error)
}

/// `DELETE /properties/:id` responder.
///
/// # Errors
///
/// If the [`Property`] is absent, or belongs to another landlord.
pub async fn remove(
    Extension(service): Extension<Service>,
    Auth(principal): Auth,
    Path(id): Path<property::Id>,
) -> Result<http::StatusCode, Error> {
    service
        .execute(command::DeleteProperty { principal, id })
        .await
        .map(|()| http::StatusCode::NO_CONTENT)
        .map_err(AsError::into_error)
}

impl AsError for command::create_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotLandlord(_) => Some(PropertyError::OnlyLandlord.into()),
        }
    }
}

impl AsError for command::update_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => Some(PropertyError::NotFound.into()),
            Self::NotOwner(_) => Some(PropertyError::AccessDenied.into()),
        }
    }
}

impl AsError for command::delete_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => Some(PropertyError::NotFound.into()),
            Self::NotOwner(_) => Some(PropertyError::AccessDenied.into()),
        }
    }
}

define_error! {
    enum PropertyError {
        #[code = "PROPERTY_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Property not found"]
        NotFound,

        #[code = "ACCESS_DENIED"]
        #[status = FORBIDDEN]
        #[message = "Access denied"]
        AccessDenied,

        #[code = "ONLY_LANDLORD"]
        #[status = FORBIDDEN]
        #[message = "Only landlords can create properties"]
        OnlyLandlord,
    }
}
