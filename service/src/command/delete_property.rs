//! [`Command`] for deleting a [`Property`].

use common::operations::{By, Delete, Evict, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{property, user::Principal, Property},
    infra::{cache, database, Cache, Database},
    invalidate::Invalidation,
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Property`].
///
/// Cascades over the property's leases, maintenance requests and documents
/// on the store level.
#[derive(Clone, Copy, Debug)]
pub struct DeleteProperty {
    /// [`Principal`] performing this [`Command`].
    pub principal: Principal,

    /// ID of the [`Property`] to delete.
    pub id: property::Id,
}

impl<Db, Cs> Command<DeleteProperty> for Service<Db, Cs>
where
    Db: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Property, property::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        >,
    Cs: Cache<Evict<cache::KeyPrefix>, Ok = u64, Err = Traced<cache::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteProperty { principal, id } = cmd;

        let property = self
            .database()
            .execute(Select(By::<Option<Property>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(id))
            .map_err(tracerr::wrap!())?;

        if property.landlord_id != principal.id {
            return Err(tracerr::new!(E::NotOwner(id)));
        }

        self.database()
            .execute(Delete(By::<Property, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.invalidate_dashboards(Invalidation::of_deleted(&property))
            .await;

        Ok(())
    }
}

/// Error of [`DeleteProperty`] [`Command`] execution.
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
