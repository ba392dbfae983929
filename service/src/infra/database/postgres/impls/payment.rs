//! [`Payment`]-related [`Database`] implementations.

use common::{
    operations::{By, Insert, Select, Update},
    Money,
};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{payment, Payment},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    scope,
};

/// Columns of the `payments` table, in restoration order.
const COLUMNS: &str = "\
    id, lease_id, landlord_id, tenant_id, amount, amount_currency, \
    payment_date, due_date, status, method, created_at";

/// Restores a [`Payment`] from the provided [`Row`].
fn from_row(row: &Row) -> Payment {
    Payment {
        id: row.get("id"),
        lease_id: row.get("lease_id"),
        landlord_id: row.get("landlord_id"),
        tenant_id: row.get("tenant_id"),
        amount: Money {
            amount: row.get("amount"),
            currency: row.get("amount_currency"),
        },
        payment_date: row.get("payment_date"),
        due_date: row.get("due_date"),
        status: row.get("status"),
        method: row.get("method"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Vec<Payment>, scope::Payments>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Payment>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Payment>, scope::Payments>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (column, user_id) = match by.into_inner() {
            scope::Payments::CollectedBy(id) => ("landlord_id", id),
            scope::Payments::OwedBy(id) => ("tenant_id", id),
        };

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM payments \
             WHERE {column} = $1::UUID \
             ORDER BY payment_date DESC",
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

impl<C> Database<Select<By<Option<Payment>, payment::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Payment>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Payment>, payment::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: payment::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM payments \
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

impl<C> Database<Insert<Payment>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Payment>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(payment): Insert<Payment>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(payment))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Payment>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(payment): Update<Payment>,
    ) -> Result<Self::Ok, Self::Err> {
        let Payment {
            id,
            lease_id,
            landlord_id,
            tenant_id,
            amount,
            payment_date,
            due_date,
            status,
            method,
            created_at,
        } = payment;

        const SQL: &str = "\
            INSERT INTO payments (\
                id, lease_id, landlord_id, tenant_id, \
                amount, amount_currency, \
                payment_date, due_date, status, method, created_at \
            ) VALUES (\
                $1::UUID, $2::UUID, $3::UUID, $4::UUID, \
                $5::NUMERIC, $6::INT2, \
                $7::TIMESTAMPTZ, $8::TIMESTAMPTZ, $9::INT2, $10::INT2, \
                $11::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET amount = EXCLUDED.amount, \
                amount_currency = EXCLUDED.amount_currency, \
                payment_date = EXCLUDED.payment_date, \
                due_date = EXCLUDED.due_date, \
                status = EXCLUDED.status, \
                method = EXCLUDED.method";
        self.exec(
            SQL,
            &[
                &id,
                &lease_id,
                &landlord_id,
                &tenant_id,
                &amount.amount,
                &amount.currency,
                &payment_date,
                &due_date,
                &status,
                &method,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
