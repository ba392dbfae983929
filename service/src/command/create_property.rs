//! [`Command`] for creating a new [`Property`].

use common::operations::{Evict, Insert};
use derive_more::{Display, Error, From};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::{
        property,
        user::{Principal, Role},
        Property,
    },
    infra::{cache, database, Cache, Database},
    invalidate::Invalidation,
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Property`].
#[derive(Clone, Debug)]
pub struct CreateProperty {
    /// [`Principal`] performing this [`Command`].
    pub principal: Principal,

    /// [`Address`] of the new [`Property`].
    ///
    /// [`Address`]: property::Address
    pub address: property::Address,

    /// [`City`] of the new [`Property`].
    ///
    /// [`City`]: property::City
    pub city: property::City,

    /// [`State`] of the new [`Property`].
    ///
    /// [`State`]: property::State
    pub state: property::State,

    /// [`ZipCode`] of the new [`Property`].
    ///
    /// [`ZipCode`]: property::ZipCode
    pub zip_code: property::ZipCode,

    /// [`UnitNumber`] of the new [`Property`].
    ///
    /// [`UnitNumber`]: property::UnitNumber
    pub unit_number: Option<property::UnitNumber>,

    /// [`Kind`] of the new [`Property`].
    ///
    /// [`Kind`]: property::Kind
    pub kind: Option<property::Kind>,

    /// Number of bedrooms of the new [`Property`].
    pub bedrooms: Option<u16>,

    /// Number of bathrooms of the new [`Property`].
    pub bathrooms: Option<Decimal>,

    /// Interior area of the new [`Property`], in square feet.
    pub square_feet: Option<u32>,

    /// [`Description`] of the new [`Property`].
    ///
    /// [`Description`]: property::Description
    pub description: Option<property::Description>,
}

impl<Db, Cs> Command<CreateProperty> for Service<Db, Cs>
where
    Db: Database<Insert<Property>, Ok = (), Err = Traced<database::Error>>,
    Cs: Cache<Evict<cache::KeyPrefix>, Ok = u64, Err = Traced<cache::Error>>,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateProperty {
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
        } = cmd;

        if principal.role != Role::Landlord {
            return Err(tracerr::new!(E::NotLandlord(principal.role)));
        }

        let property = Property {
            id: property::Id::new(),
            landlord_id: principal.id,
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
            created_at: property::CreationDateTime::now(),
        };

        self.database()
            .execute(Insert(property.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.invalidate_dashboards(Invalidation::of_created(&property))
            .await;

        Ok(property)
    }
}

/// Error of [`CreateProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Performing [`Principal`] is not a landlord.
    #[display("`{_0}` role cannot create properties")]
    #[from(ignore)]
    NotLandlord(#[error(not(source))] Role),
}
