//! [`Command`] for updating a [`Property`].

use common::operations::{By, Evict, Select, Update};
use derive_more::{Display, Error, From};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::{property, user::Principal, Property},
    infra::{cache, database, Cache, Database},
    invalidate::Invalidation,
    Service,
};

use super::Command;

/// [`Command`] for updating a [`Property`].
///
/// Only the fields provided as [`Some`] are rewritten.
#[derive(Clone, Debug)]
pub struct UpdateProperty {
    /// [`Principal`] performing this [`Command`].
    pub principal: Principal,

    /// ID of the [`Property`] to update.
    pub id: property::Id,

    /// New [`Address`] of the [`Property`].
    ///
    /// [`Address`]: property::Address
    pub address: Option<property::Address>,

    /// New [`City`] of the [`Property`].
    ///
    /// [`City`]: property::City
    pub city: Option<property::City>,

    /// New [`State`] of the [`Property`].
    ///
    /// [`State`]: property::State
    pub state: Option<property::State>,

    /// New [`ZipCode`] of the [`Property`].
    ///
    /// [`ZipCode`]: property::ZipCode
    pub zip_code: Option<property::ZipCode>,

    /// New [`UnitNumber`] of the [`Property`].
    ///
    /// [`UnitNumber`]: property::UnitNumber
    pub unit_number: Option<property::UnitNumber>,

    /// New [`Kind`] of the [`Property`].
    ///
    /// [`Kind`]: property::Kind
    pub kind: Option<property::Kind>,

    /// New number of bedrooms of the [`Property`].
    pub bedrooms: Option<u16>,

    /// New number of bathrooms of the [`Property`].
    pub bathrooms: Option<Decimal>,

    /// New interior area of the [`Property`], in square feet.
    pub square_feet: Option<u32>,

    /// New [`Description`] of the [`Property`].
    ///
    /// [`Description`]: property::Description
    pub description: Option<property::Description>,
}

impl<Db, Cs> Command<UpdateProperty> for Service<Db, Cs>
where
    Db: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<Update<Property>, Ok = (), Err = Traced<database::Error>>,
    Cs: Cache<Evict<cache::KeyPrefix>, Ok = u64, Err = Traced<cache::Error>>,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateProperty {
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
        } = cmd;

        let before = self
            .database()
            .execute(Select(By::<Option<Property>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(id))
            .map_err(tracerr::wrap!())?;

        if before.landlord_id != principal.id {
            return Err(tracerr::new!(E::NotOwner(id)));
        }

        let mut property = before.clone();
        if let Some(address) = address {
            property.address = address;
        }
        if let Some(city) = city {
            property.city = city;
        }
        if let Some(state) = state {
            property.state = state;
        }
        if let Some(zip_code) = zip_code {
            property.zip_code = zip_code;
        }
        if let Some(unit_number) = unit_number {
            property.unit_number = Some(unit_number);
        }
        if let Some(kind) = kind {
            property.kind = Some(kind);
        }
        if let Some(bedrooms) = bedrooms {
            property.bedrooms = Some(bedrooms);
        }
        if let Some(bathrooms) = bathrooms {
            property.bathrooms = Some(bathrooms);
        }
        if let Some(square_feet) = square_feet {
            property.square_feet = Some(square_feet);
        }
        if let Some(description) = description {
            property.description = Some(description);
        }

        self.database()
            .execute(Update(property.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.invalidate_dashboards(Invalidation::of_updated(
            &before, &property,
        ))
        .await;

        Ok(property)
    }
}

/// Error of [`UpdateProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Property`] doesn't exist.
    #[display("`Property(id: {_0})` does not exist")]
    #[from(ignore)]
    PropertyNotExists(#[error(not(source))] property::Id),

    /// Performing [`Principal`] doesn't own the [`Property`].
    #[display("`Property(id: {_0})` belongs to another landlord")]
    #[from(ignore)]
    NotOwner(#[error(not(source))] property::Id),
}
