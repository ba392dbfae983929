//! [`Command`] for deleting a [`Lease`].

use common::operations::{By, Delete, Evict, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{lease, user::Principal, Lease},
    infra::{cache, database, Cache, Database},
    invalidate::Invalidation,
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Lease`].
#[derive(Clone, Copy, Debug)]
pub struct DeleteLease {
    /// [`Principal`] performing this [`Command`].
    pub principal: Principal,

    /// ID of the [`Lease`] to delete.
    pub id: lease::Id,
}

impl<Db, Cs> Command<DeleteLease> for Service<Db, Cs>
where
    Db: Database<
            Select<By<Option<Lease>, lease::Id>>,
            Ok = Option<Lease>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Lease, lease::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        >,
    Cs: Cache<Evict<cache::KeyPrefix>, Ok = u64, Err = Traced<cache::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteLease) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteLease { principal, id } = cmd;

        let lease = self
            .database()
            .execute(Select(By::<Option<Lease>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::LeaseNotExists(id))
            .map_err(tracerr::wrap!())?;

        if lease.landlord_id != principal.id {
            return Err(tracerr::new!(E::NotOwner(id)));
        }

        self.database()
            .execute(Delete(By::<Lease, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.invalidate_dashboards(Invalidation::of_deleted(&lease))
            .await;

        Ok(())
    }
}

/// Error of [`DeleteLease`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Lease`] doesn't exist.
    #[display("`Lease(id: {_0})` does not exist")]
    #[from(ignore)]
    LeaseNotExists(#[error(not(source))] lease::Id),

    /// Performing [`Principal`] doesn't own the [`Lease`].
    #[display("`Lease(id: {_0})` is granted by another landlord")]
    #[from(ignore)]
    NotOwner(#[error(not(source))] lease::Id),
}
