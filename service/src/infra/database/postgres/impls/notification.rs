//! [`Notification`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{notification, Notification},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read, scope,
};

/// Columns of the `notifications` table, in restoration order.
const COLUMNS: &str = "\
    id, user_id, title, message, kind, read, created_at";

/// Restores a [`Notification`] from the provided [`Row`].
fn from_row(row: &Row) -> Notification {
    Notification {
        id: row.get("id"),
        user_id: row.get("user_id"),
        title: row.get("title"),
        message: row.get("message"),
        kind: row.get("kind"),
        read: row.get("read"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Vec<Notification>, scope::Notifications>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Notification>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Notification>, scope::Notifications>>,
    ) -> Result<Self::Ok, Self::Err> {
        let scope::Notifications::AddressedTo(user_id) = by.into_inner();

        let limit = i64::try_from(read::dashboard::NOTIFICATIONS_LIMIT)
            .expect("limit fits");

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM notifications \
             WHERE user_id = $1::UUID \
             ORDER BY created_at DESC \
             LIMIT $2::INT8",
        );
        Ok(self
            .query(&sql, &[&user_id, &limit])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Option<Notification>, notification::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Notification>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Notification>, notification::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: notification::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM notifications \
             WHERE id = $1::UUID \
             LIMIT 1",
        );
        Ok(self
            .query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| from_row(&row)))
    }
}

impl<C> Database<Insert<Notification>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Update<Notification>,
        Ok = (),
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(notification): Insert<Notification>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(notification))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Notification>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(notification): Update<Notification>,
    ) -> Result<Self::Ok, Self::Err> {
        let Notification {
            id,
            user_id,
            title,
            message,
            kind,
            read,
            created_at,
        } = notification;

        const SQL: &str = "\
            INSERT INTO notifications (\
                id, user_id, title, message, kind, read, created_at \
            ) VALUES (\
                $1::UUID, $2::UUID, $3::VARCHAR, $4::TEXT, $5::INT2, \
                $6::BOOL, $7::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET read = EXCLUDED.read";
        self.exec(
            SQL,
            &[&id, &user_id, &title, &message, &kind, &read, &created_at],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Update<notification::ReadAll>> for Postgres<C>
where
    C: Connection,
{
    type Ok = u64;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(read_all): Update<notification::ReadAll>,
    ) -> Result<Self::Ok, Self::Err> {
        let notification::ReadAll(user_id) = read_all;

        const SQL: &str = "\
            UPDATE notifications \
            SET read = TRUE \
            WHERE user_id = $1::UUID \
              AND read = FALSE";
        self.exec(SQL, &[&user_id])
            .await
            .map_err(tracerr::wrap!())
    }
}
