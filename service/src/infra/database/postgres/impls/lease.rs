//! [`Lease`]-related [`Database`] implementations.

use common::{
    operations::{By, Delete, Insert, Select, Update},
    Money,
};
use rust_decimal::Decimal;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{lease, property, user, Lease},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read, scope,
};

/// Columns of the `leases` table, in restoration order.
const COLUMNS: &str = "\
    id, property_id, landlord_id, tenant_id, start_date, end_date, \
    monthly_rent, monthly_rent_currency, \
    security_deposit, security_deposit_currency, \
    status, created_at";

/// Restores a [`Lease`] from the provided [`Row`].
fn from_row(row: &Row) -> Lease {
    Lease {
        id: row.get("id"),
        property_id: row.get("property_id"),
        landlord_id: row.get("landlord_id"),
        tenant_id: row.get("tenant_id"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        monthly_rent: Money {
            amount: row.get("monthly_rent"),
            currency: row.get("monthly_rent_currency"),
        },
        security_deposit: row
            .get::<_, Option<Decimal>>("security_deposit")
            .map(|amount| Money {
                amount,
                currency: row.get("security_deposit_currency"),
            }),
        status: row.get("status"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Vec<Lease>, scope::Leases>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Lease>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Lease>, scope::Leases>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (column, user_id) = match by.into_inner() {
            scope::Leases::GrantedBy(id) => ("landlord_id", id),
            scope::Leases::HeldBy(id) => ("tenant_id", id),
        };

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM leases \
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

impl<C> Database<Select<By<Option<Lease>, lease::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Lease>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Lease>, lease::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: lease::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM leases \
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

impl<C> Database<Select<By<read::lease::HoldsLease, (property::Id, user::Id)>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::lease::HoldsLease;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::lease::HoldsLease, (property::Id, user::Id)>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let (property_id, tenant_id) = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM leases \
            WHERE property_id = $1::UUID \
              AND tenant_id = $2::UUID \
            LIMIT 1";
        self.query_opt(SQL, &[&property_id, &tenant_id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| read::lease::HoldsLease(row.is_some()))
    }
}

impl<C>
    Database<Select<By<read::lease::HoldsActiveLease, (property::Id, user::Id)>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::lease::HoldsActiveLease;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::lease::HoldsActiveLease, (property::Id, user::Id)>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let (property_id, tenant_id) = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM leases \
            WHERE property_id = $1::UUID \
              AND tenant_id = $2::UUID \
              AND status = $3::INT2 \
            LIMIT 1";
        self.query_opt(SQL, &[&property_id, &tenant_id, &lease::Status::Active])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| read::lease::HoldsActiveLease(row.is_some()))
    }
}

impl<C> Database<Insert<Lease>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Lease>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(lease): Insert<Lease>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(lease)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Lease>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(lease): Update<Lease>,
    ) -> Result<Self::Ok, Self::Err> {
        let Lease {
            id,
            property_id,
            landlord_id,
            tenant_id,
            start_date,
            end_date,
            monthly_rent,
            security_deposit,
            status,
            created_at,
        } = lease;

        let (deposit, deposit_currency) = security_deposit
            .map_or((None, None), |m| (Some(m.amount), Some(m.currency)));

        const SQL: &str = "\
            INSERT INTO leases (\
                id, property_id, landlord_id, tenant_id, \
                start_date, end_date, \
                monthly_rent, monthly_rent_currency, \
                security_deposit, security_deposit_currency, \
                status, created_at \
            ) VALUES (\
                $1::UUID, $2::UUID, $3::UUID, $4::UUID, \
                $5::TIMESTAMPTZ, $6::TIMESTAMPTZ, \
                $7::NUMERIC, $8::INT2, \
                $9::NUMERIC, $10::INT2, \
                $11::INT2, $12::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET tenant_id = EXCLUDED.tenant_id, \
                start_date = EXCLUDED.start_date, \
                end_date = EXCLUDED.end_date, \
                monthly_rent = EXCLUDED.monthly_rent, \
                monthly_rent_currency = EXCLUDED.monthly_rent_currency, \
                security_deposit = EXCLUDED.security_deposit, \
                security_deposit_currency = \
                    EXCLUDED.security_deposit_currency, \
                status = EXCLUDED.status";
        self.exec(
            SQL,
            &[
                &id,
                &property_id,
                &landlord_id,
                &tenant_id,
                &start_date,
                &end_date,
                &monthly_rent.amount,
                &monthly_rent.currency,
                &deposit,
                &deposit_currency,
                &status,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Lease, lease::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Lease, lease::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: lease::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM leases \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
