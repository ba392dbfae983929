//! [`Command`] for updating a [`Lease`].

use common::{
    operations::{By, Evict, Select, Update},
    Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{lease, user, user::Principal, Lease},
    infra::{cache, database, Cache, Database},
    invalidate::Invalidation,
    Service,
};

use super::Command;

/// [`Command`] for updating a [`Lease`].
///
/// Only the fields provided as [`Some`] are rewritten. Rewriting the
/// `tenant_id` hands the [`Lease`] over to another tenant, and both the old
/// and the new one get their dashboards refreshed.
#[derive(Clone, Debug)]
pub struct UpdateLease {
    /// [`Principal`] performing this [`Command`].
    pub principal: Principal,

    /// ID of the [`Lease`] to update.
    pub id: lease::Id,

    /// New tenant [`User`] to hold the [`Lease`].
    ///
    /// [`User`]: crate::domain::User
    pub tenant_id: Option<user::Id>,

    /// New start [`DateTime`] of the [`Lease`].
    ///
    /// [`DateTime`]: common::DateTime
    pub start_date: Option<lease::StartDateTime>,

    /// New end [`DateTime`] of the [`Lease`].
    ///
    /// [`DateTime`]: common::DateTime
    pub end_date: Option<lease::EndDateTime>,

    /// New monthly rent due under the [`Lease`].
    pub monthly_rent: Option<Money>,

    /// New security deposit held under the [`Lease`].
    pub security_deposit: Option<Money>,

    /// New [`Status`] of the [`Lease`].
    ///
    /// [`Status`]: lease::Status
    pub status: Option<lease::Status>,
}

impl<Db, Cs> Command<UpdateLease> for Service<Db, Cs>
where
    Db: Database<
            Select<By<Option<Lease>, lease::Id>>,
            Ok = Option<Lease>,
            Err = Traced<database::Error>,
        > + Database<Update<Lease>, Ok = (), Err = Traced<database::Error>>,
    Cs: Cache<Evict<cache::KeyPrefix>, Ok = u64, Err = Traced<cache::Error>>,
{
    type Ok = Lease;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateLease) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateLease {
            principal,
            id,
            tenant_id,
            start_date,
            end_date,
            monthly_rent,
            security_deposit,
            status,
        } = cmd;

        let before = self
            .database()
            .execute(Select(By::<Option<Lease>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::LeaseNotExists(id))
            .map_err(tracerr::wrap!())?;

        if before.landlord_id != principal.id {
            return Err(tracerr::new!(E::NotOwner(id)));
        }

        let mut lease = before.clone();
        if let Some(tenant_id) = tenant_id {
            lease.tenant_id = tenant_id;
        }
        if let Some(start_date) = start_date {
            lease.start_date = start_date;
        }
        if let Some(end_date) = end_date {
            lease.end_date = end_date;
        }
        if let Some(monthly_rent) = monthly_rent {
            lease.monthly_rent = monthly_rent;
        }
        if let Some(security_deposit) = security_deposit {
            lease.security_deposit = Some(security_deposit);
        }
        if let Some(status) = status {
            lease.status = status;
        }

        self.database()
            .execute(Update(lease.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.invalidate_dashboards(Invalidation::of_updated(&before, &lease))
            .await;

        Ok(lease)
    }
}

/// Error of [`UpdateLease`] [`Command`] execution.
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
