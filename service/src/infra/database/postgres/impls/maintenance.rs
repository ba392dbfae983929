//! Maintenance [`Request`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::maintenance::{self, Request},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    scope,
};

/// Columns of the `maintenance_requests` table, in restoration order.
const COLUMNS: &str = "\
    id, property_id, landlord_id, tenant_id, title, description, priority, \
    status, created_at";

/// Restores a [`Request`] from the provided [`Row`].
fn from_row(row: &Row) -> Request {
    Request {
        id: row.get("id"),
        property_id: row.get("property_id"),
        landlord_id: row.get("landlord_id"),
        tenant_id: row.get("tenant_id"),
        title: row.get("title"),
        description: row.get("description"),
        priority: row.get("priority"),
        status: row.get("status"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Vec<Request>, scope::MaintenanceRequests>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Request>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Request>, scope::MaintenanceRequests>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (column, user_id) = match by.into_inner() {
            scope::MaintenanceRequests::ManagedBy(id) => ("landlord_id", id),
            scope::MaintenanceRequests::ReportedBy(id) => ("tenant_id", id),
        };

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM maintenance_requests \
             WHERE {column} = $1::UUID \
             ORDER BY created_at DESC",
        );
        Ok(self
            .query(&sql, &[&user_id])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Option<Request>, maintenance::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Request>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Request>, maintenance::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: maintenance::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM maintenance_requests \
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

impl<C> Database<Insert<Request>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Request>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(request): Insert<Request>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(request))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Request>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(request): Update<Request>,
    ) -> Result<Self::Ok, Self::Err> {
        let Request {
            id,
            property_id,
            landlord_id,
            tenant_id,
            title,
            description,
            priority,
            status,
            created_at,
        } = request;

        const SQL: &str = "\
            INSERT INTO maintenance_requests (\
                id, property_id, landlord_id, tenant_id, \
                title, description, priority, status, created_at \
            ) VALUES (\
                $1::UUID, $2::UUID, $3::UUID, $4::UUID, \
                $5::VARCHAR, $6::TEXT, $7::INT2, $8::INT2, $9::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET title = EXCLUDED.title, \
                description = EXCLUDED.description, \
                priority = EXCLUDED.priority, \
                status = EXCLUDED.status";
        self.exec(
            SQL,
            &[
                &id,
                &property_id,
                &landlord_id,
                &tenant_id,
                &title,
                &description,
                &priority,
                &status,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
