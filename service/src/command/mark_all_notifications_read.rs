//! [`Command`] for marking every [`Notification`] of a user as read.

use common::operations::{Evict, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Notification;
use crate::{
    domain::{notification, user::Principal},
    infra::{cache, database, Cache, Database},
    invalidate::Invalidation,
    Service,
};

use super::Command;

/// [`Command`] for marking every unread [`Notification`] of the caller as
/// read.
#[derive(Clone, Copy, Debug)]
pub struct MarkAllNotificationsRead {
    /// [`Principal`] performing this [`Command`].
    pub principal: Principal,
}

impl<Db, Cs> Command<MarkAllNotificationsRead> for Service<Db, Cs>
where
    Db: Database<
        Update<notification::ReadAll>,
        Ok = u64,
        Err = Traced<database::Error>,
    >,
    Cs: Cache<Evict<cache::KeyPrefix>, Ok = u64, Err = Traced<cache::Error>>,
{
    type Ok = u64;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: MarkAllNotificationsRead,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let MarkAllNotificationsRead { principal } = cmd;

        let marked = self
            .database()
            .execute(Update(notification::ReadAll(principal.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.invalidate_dashboards(Invalidation::of_actor(principal.id))
            .await;

        Ok(marked)
    }
}

/// Error of [`MarkAllNotificationsRead`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}
