//! [`Property`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{property, Property},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    scope,
};

/// Columns of the `properties` table, in restoration order.
const COLUMNS: &str = "\
    id, landlord_id, address, city, state, zip_code, unit_number, kind, \
    bedrooms, bathrooms, square_feet, description, created_at";

/// Restores a [`Property`] from the provided [`Row`].
fn from_row(row: &Row) -> Property {
    Property {
        id: row.get("id"),
        landlord_id: row.get("landlord_id"),
        address: row.get("address"),
        city: row.get("city"),
        state: row.get("state"),
        zip_code: row.get("zip_code"),
        unit_number: row.get("unit_number"),
        kind: row.get("kind"),
        bedrooms: row
            .get::<_, Option<i32>>("bedrooms")
            .map(u16::try_from)
            .transpose()
            .expect("`bedrooms` overflow"),
        bathrooms: row.get("bathrooms"),
        square_feet: row
            .get::<_, Option<i32>>("square_feet")
            .map(u32::try_from)
            .transpose()
            .expect("`square_feet` overflow"),
        description: row.get("description"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Vec<Property>, scope::Properties>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Property>, scope::Properties>>,
    ) -> Result<Self::Ok, Self::Err> {
        let rows = match by.into_inner() {
            scope::Properties::OwnedBy(landlord_id) => {
                let sql = format!(
                    "SELECT {COLUMNS} \
                     FROM properties \
                     WHERE landlord_id = $1::UUID \
                     ORDER BY created_at DESC",
                );
                self.query(&sql, &[&landlord_id]).await
            }
            scope::Properties::LeasedBy(tenant_id) => {
                // `DISTINCT` keeps a property leased twice to the same
                // tenant down to a single row.
                const SQL: &str = "\
                    SELECT DISTINCT properties.* \
                    FROM properties \
                    JOIN leases ON leases.property_id = properties.id \
                    WHERE leases.tenant_id = $1::UUID";
                self.query(SQL, &[&tenant_id]).await
            }
        }
        .map_err(tracerr::wrap!())?;

        Ok(rows.iter().map(from_row).collect())
    }
}

impl<C> Database<Select<By<Option<Property>, property::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: property::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM properties \
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

impl<C> Database<Insert<Property>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Property>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(property): Insert<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(property))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Property>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(property): Update<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        let Property {
            id,
            landlord_id,
            address,
            city,
            state,
            zip_code,
            unit_number,
            kind,
            bedrooms,
            bathrooms,
            square_feet,
            description,
            created_at,
        } = property;

        let bedrooms = bedrooms.map(i32::from);
        let square_feet = square_feet.map(|v| {
            i32::try_from(v).expect("`square_feet` overflow")
        });

        const SQL: &str = "\
            INSERT INTO properties (\
                id, landlord_id, \
                address, city, state, zip_code, unit_number, \
                kind, bedrooms, bathrooms, square_feet, description, \
                created_at \
            ) VALUES (\
                $1::UUID, $2::UUID, \
                $3::VARCHAR, $4::VARCHAR, $5::VARCHAR, $6::VARCHAR, \
                $7::VARCHAR, \
                $8::INT2, $9::INT4, $10::NUMERIC, $11::INT4, $12::TEXT, \
                $13::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET address = EXCLUDED.address, \
                city = EXCLUDED.city, \
                state = EXCLUDED.state, \
                zip_code = EXCLUDED.zip_code, \
                unit_number = EXCLUDED.unit_number, \
                kind = EXCLUDED.kind, \
                bedrooms = EXCLUDED.bedrooms, \
                bathrooms = EXCLUDED.bathrooms, \
                square_feet = EXCLUDED.square_feet, \
                description = EXCLUDED.description";
        self.exec(
            SQL,
            &[
                &id,
                &landlord_id,
                &address,
                &city,
                &state,
                &zip_code,
                &unit_number,
                &kind,
                &bedrooms,
                &bathrooms,
                &square_feet,
                &description,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Property, property::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Property, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: property::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM properties \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
