//! [`Command`] for recording a new [`Payment`].

use common::{
    operations::{By, Evict, Insert, Select},
    Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        lease, payment,
        user::{Principal, Role},
        Lease, Payment,
    },
    infra::{cache, database, Cache, Database},
    invalidate::Invalidation,
    Service,
};

use super::Command;

/// [`Command`] for recording a new [`Payment`] under a [`Lease`].
///
/// Allowed to either party of the [`Lease`]; the owning actor ids are
/// copied from the [`Lease`], never taken from the caller.
#[derive(Clone, Debug)]
pub struct RecordPayment {
    /// [`Principal`] performing this [`Command`].
    pub principal: Principal,

    /// ID of the [`Lease`] the [`Payment`] is made under.
    pub lease_id: lease::Id,

    /// Amount of the new [`Payment`].
    pub amount: Money,

    /// [`DateTime`] the new [`Payment`] is (or is to be) settled at.
    ///
    /// [`DateTime`]: common::DateTime
    pub payment_date: payment::SettlementDateTime,

    /// [`DateTime`] the new [`Payment`] is due at.
    ///
    /// [`DateTime`]: common::DateTime
    pub due_date: payment::DueDateTime,

    /// Initial [`Status`] of the new [`Payment`].
    ///
    /// [`Status`]: payment::Status
    pub status: payment::Status,

    /// [`Method`] the new [`Payment`] is made with.
    ///
    /// [`Method`]: payment::Method
    pub method: Option<payment::Method>,
}

impl<Db, Cs> Command<RecordPayment> for Service<Db, Cs>
where
    Db: Database<
            Select<By<Option<Lease>, lease::Id>>,
            Ok = Option<Lease>,
            Err = Traced<database::Error>,
        > + Database<Insert<Payment>, Ok = (), Err = Traced<database::Error>>,
    Cs: Cache<Evict<cache::KeyPrefix>, Ok = u64, Err = Traced<cache::Error>>,
{
    type Ok = Payment;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RecordPayment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RecordPayment {
            principal,
            lease_id,
            amount,
            payment_date,
            due_date,
            status,
            method,
        } = cmd;

        let lease = self
            .database()
            .execute(Select(By::<Option<Lease>, _>::new(lease_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::LeaseNotExists(lease_id))
            .map_err(tracerr::wrap!())?;

        let is_party = match principal.role {
            Role::Landlord => lease.landlord_id == principal.id,
            Role::Tenant => lease.tenant_id == principal.id,
            Role::Contractor => false,
        };
        if !is_party {
            return Err(tracerr::new!(E::NotParticipant(lease_id)));
        }

        let payment = Payment {
            id: payment::Id::new(),
            lease_id,
            landlord_id: lease.landlord_id,
            tenant_id: lease.tenant_id,
            amount,
            payment_date,
            due_date,
            status,
            method,
            created_at: payment::CreationDateTime::now(),
        };

        self.database()
            .execute(Insert(payment.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.invalidate_dashboards(Invalidation::of_created(&payment))
            .await;

        Ok(payment)
    }
}

/// Error of [`RecordPayment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Lease`] doesn't exist.
    #[display("`Lease(id: {_0})` does not exist")]
    #[from(ignore)]
    LeaseNotExists(#[error(not(source))] lease::Id),

    /// Performing [`Principal`] is not a party to the [`Lease`].
    #[display("`Lease(id: {_0})` involves another party")]
    #[from(ignore)]
    NotParticipant(#[error(not(source))] lease::Id),
}
