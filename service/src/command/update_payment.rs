//! [`Command`] for updating a [`Payment`].

use common::{
    operations::{By, Evict, Select, Update},
    Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        payment,
        user::{Principal, Role},
        Payment,
    },
    infra::{cache, database, Cache, Database},
    invalidate::Invalidation,
    Service,
};

use super::Command;

/// [`Command`] for updating a [`Payment`].
///
/// Only the fields provided as [`Some`] are rewritten. Allowed to either
/// party of the [`Payment`].
#[derive(Clone, Debug)]
pub struct UpdatePayment {
    /// [`Principal`] performing this [`Command`].
    pub principal: Principal,

    /// ID of the [`Payment`] to update.
    pub id: payment::Id,

    /// New amount of the [`Payment`].
    pub amount: Option<Money>,

    /// New settlement [`DateTime`] of the [`Payment`].
    ///
    /// [`DateTime`]: common::DateTime
    pub payment_date: Option<payment::SettlementDateTime>,

    /// New due [`DateTime`] of the [`Payment`].
    ///
    /// [`DateTime`]: common::DateTime
    pub due_date: Option<payment::DueDateTime>,

    /// New [`Status`] of the [`Payment`].
    ///
    /// [`Status`]: payment::Status
    pub status: Option<payment::Status>,

    /// New [`Method`] of the [`Payment`].
    ///
    /// [`Method`]: payment::Method
    pub method: Option<payment::Method>,
}

impl<Db, Cs> Command<UpdatePayment> for Service<Db, Cs>
where
    Db: Database<
            Select<By<Option<Payment>, payment::Id>>,
            Ok = Option<Payment>,
            Err = Traced<database::Error>,
        > + Database<Update<Payment>, Ok = (), Err = Traced<database::Error>>,
    Cs: Cache<Evict<cache::KeyPrefix>, Ok = u64, Err = Traced<cache::Error>>,
{
    type Ok = Payment;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdatePayment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdatePayment {
            principal,
            id,
            amount,
            payment_date,
            due_date,
            status,
            method,
        } = cmd;

        let before = self
            .database()
            .execute(Select(By::<Option<Payment>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PaymentNotExists(id))
            .map_err(tracerr::wrap!())?;

        let is_party = match principal.role {
            Role::Landlord => before.landlord_id == principal.id,
            Role::Tenant => before.tenant_id == principal.id,
            Role::Contractor => false,
        };
        if !is_party {
            return Err(tracerr::new!(E::NotParticipant(id)));
        }

        let mut payment = before.clone();
        if let Some(amount) = amount {
            payment.amount = amount;
        }
        if let Some(payment_date) = payment_date {
            payment.payment_date = payment_date;
        }
        if let Some(due_date) = due_date {
            payment.due_date = due_date;
        }
        if let Some(status) = status {
            payment.status = status;
        }
        if let Some(method) = method {
            payment.method = Some(method);
        }

        self.database()
            .execute(Update(payment.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.invalidate_dashboards(Invalidation::of_updated(
            &before, &payment,
        ))
        .await;

        Ok(payment)
    }
}

/// Error of [`UpdatePayment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Payment`] doesn't exist.
    #[display("`Payment(id: {_0})` does not exist")]
    #[from(ignore)]
    PaymentNotExists(#[error(not(source))] payment::Id),

    /// Performing [`Principal`] is not a party to the [`Payment`].
    #[display("`Payment(id: {_0})` involves another party")]
    #[from(ignore)]
    NotParticipant(#[error(not(source))] payment::Id),
}
