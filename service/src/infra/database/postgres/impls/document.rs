//! [`Document`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{document, Document},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read, scope,
};

/// Columns of the `documents` table, in restoration order.
const COLUMNS: &str = "\
    id, property_id, lease_id, uploaded_by, file_name, file_path, file_size, \
    mime_type, created_at";

/// Restores a [`Document`] from the provided [`Row`].
fn from_row(row: &Row) -> Document {
    Document {
        id: row.get("id"),
        property_id: row.get("property_id"),
        lease_id: row.get("lease_id"),
        uploaded_by: row.get("uploaded_by"),
        file_name: row.get("file_name"),
        file_path: row.get("file_path"),
        file_size: row
            .get::<_, Option<i64>>("file_size")
            .map(u64::try_from)
            .transpose()
            .expect("`file_size` overflow"),
        mime_type: row.get("mime_type"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Vec<Document>, scope::Documents>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Document>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Document>, scope::Documents>>,
    ) -> Result<Self::Ok, Self::Err> {
        let rows = match by.into_inner() {
            scope::Documents::OnPropertiesOwnedBy(landlord_id) => {
                const SQL: &str = "\
                    SELECT DISTINCT documents.* \
                    FROM documents \
                    JOIN properties \
                      ON properties.id = documents.property_id \
                    WHERE properties.landlord_id = $1::UUID";
                self.query(SQL, &[&landlord_id]).await
            }
            scope::Documents::OnLeasesHeldBy(tenant_id) => {
                const SQL: &str = "\
                    SELECT DISTINCT documents.* \
                    FROM documents \
                    JOIN leases ON leases.id = documents.lease_id \
                    WHERE leases.tenant_id = $1::UUID";
                self.query(SQL, &[&tenant_id]).await
            }
        }
        .map_err(tracerr::wrap!())?;

        Ok(rows.iter().map(from_row).collect())
    }
}

impl<C> Database<Select<By<Vec<Document>, read::document::OfProperties>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Document>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Document>, read::document::OfProperties>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::document::OfProperties(ids) = by.into_inner();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM documents \
             WHERE property_id = ANY($1::UUID[]) \
             ORDER BY created_at DESC",
        );
        Ok(self
            .query(&sql, &[&ids])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Vec<Document>, read::document::OfLeases>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Document>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Document>, read::document::OfLeases>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::document::OfLeases(ids) = by.into_inner();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM documents \
             WHERE lease_id = ANY($1::UUID[]) \
             ORDER BY created_at DESC",
        );
        Ok(self
            .query(&sql, &[&ids])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Option<Document>, document::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Document>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Document>, document::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: document::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM documents \
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

impl<C> Database<Insert<Document>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(document): Insert<Document>,
    ) -> Result<Self::Ok, Self::Err> {
        let Document {
            id,
            property_id,
            lease_id,
            uploaded_by,
            file_name,
            file_path,
            file_size,
            mime_type,
            created_at,
        } = document;

        let file_size = file_size.map(|v| {
            i64::try_from(v).expect("`file_size` overflow")
        });

        const SQL: &str = "\
            INSERT INTO documents (\
                id, property_id, lease_id, uploaded_by, \
                file_name, file_path, file_size, mime_type, created_at \
            ) VALUES (\
                $1::UUID, $2::UUID, $3::UUID, $4::UUID, \
                $5::VARCHAR, $6::TEXT, $7::INT8, $8::VARCHAR, \
                $9::TIMESTAMPTZ \
            )";
        self.exec(
            SQL,
            &[
                &id,
                &property_id,
                &lease_id,
                &uploaded_by,
                &file_name,
                &file_path,
                &file_size,
                &mime_type,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Document, document::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Document, document::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: document::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM documents \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
