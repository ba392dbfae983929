//! [`Command`] for marking a [`Notification`] as read.

use common::operations::{By, Evict, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{notification, user::Principal, Notification},
    infra::{cache, database, Cache, Database},
    invalidate::Invalidation,
    Service,
};

use super::Command;

/// [`Command`] for marking a single [`Notification`] as read.
#[derive(Clone, Copy, Debug)]
pub struct MarkNotificationRead {
    /// [`Principal`] performing this [`Command`].
    pub principal: Principal,

    /// ID of the [`Notification`] to mark.
    pub id: notification::Id,
}

impl<Db, Cs> Command<MarkNotificationRead> for Service<Db, Cs>
where
    Db: Database<
            Select<By<Option<Notification>, notification::Id>>,
            Ok = Option<Notification>,
            Err = Traced<database::Error>,
        > + Database<
            Update<Notification>,
            Ok = (),
            Err = Traced<database::Error>,
        >,
    Cs: Cache<Evict<cache::KeyPrefix>, Ok = u64, Err = Traced<cache::Error>>,
{
    type Ok = Notification;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: MarkNotificationRead,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let MarkNotificationRead { principal, id } = cmd;

        let before = self
            .database()
            .execute(Select(By::<Option<Notification>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NotificationNotExists(id))
            .map_err(tracerr::wrap!())?;

        if before.user_id != principal.id {
            return Err(tracerr::new!(E::NotAddressee(id)));
        }

        if before.read {
            return Ok(before);
        }

        let mut notification = before.clone();
        notification.read = true;

        self.database()
            .execute(Update(notification.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.invalidate_dashboards(Invalidation::of_updated(
            &before,
            &notification,
        ))
        .await;

        Ok(notification)
    }
}

/// Error of [`MarkNotificationRead`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Notification`] doesn't exist.
    #[display("`Notification(id: {_0})` does not exist")]
    #[from(ignore)]
    NotificationNotExists(#[error(not(source))] notification::Id),

    /// [`Notification`] is addressed to another user.
    #[display("`Notification(id: {_0})` is addressed to another user")]
    #[from(ignore)]
    NotAddressee(#[error(not(source))] notification::Id),
}
