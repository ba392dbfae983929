//! Dashboard read model.

use common::DateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    lease, maintenance, payment, Document, Lease, Notification, Payment,
    Property, User,
};

/// Maximum number of [`Notification`]s a dashboard carries, newest first.
pub const NOTIFICATIONS_LIMIT: usize = 50;

/// Role-scoped dashboard view of a single [`User`].
///
/// Assembled on a cache miss and stored serialized; a cache hit returns the
/// deserialized value verbatim, [`Stats`] included. [`Stats`] are never
/// recomputed from the cached sub-collections.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Aggregate {
    /// Profile of the [`User`] this dashboard belongs to.
    pub profile: User,

    /// [`Property`]s visible to the [`User`].
    pub properties: Vec<Property>,

    /// [`Lease`]s visible to the [`User`].
    pub leases: Vec<Lease>,

    /// Maintenance [`Request`]s visible to the [`User`].
    ///
    /// [`Request`]: maintenance::Request
    pub maintenance_requests: Vec<maintenance::Request>,

    /// [`Document`]s visible to the [`User`].
    pub documents: Vec<Document>,

    /// [`Payment`]s visible to the [`User`].
    pub payments: Vec<Payment>,

    /// Newest [`Notification`]s of the [`User`], capped at
    /// [`NOTIFICATIONS_LIMIT`].
    pub notifications: Vec<Notification>,

    /// [`Stats`] derived from the collections above.
    pub stats: Stats,
}

impl Aggregate {
    /// Serializes this [`Aggregate`] into its cached representation.
    ///
    /// # Errors
    ///
    /// If this [`Aggregate`] cannot be serialized.
    pub fn to_cached(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Deserializes an [`Aggregate`] from its cached representation.
    ///
    /// # Errors
    ///
    /// If the `bytes` don't hold a serialized [`Aggregate`].
    pub fn from_cached(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// Counters derived from an [`Aggregate`]'s collections.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Stats {
    /// Number of visible [`Property`]s.
    pub total_properties: u32,

    /// Number of visible [`Lease`]s in the [`Active`] status.
    ///
    /// [`Active`]: lease::Status::Active
    pub active_leases: u32,

    /// Number of visible [`Payment`]s in the [`Pending`] status.
    ///
    /// [`Pending`]: payment::Status::Pending
    pub pending_payments: u32,

    /// Number of visible maintenance [`Request`]s in the [`Pending`] status.
    ///
    /// [`Pending`]: maintenance::Status::Pending
    /// [`Request`]: maintenance::Request
    pub pending_maintenance: u32,

    /// Sum of the visible [`Paid`] [`Payment`] amounts settled in the
    /// current calendar month.
    ///
    /// [`Paid`]: payment::Status::Paid
    pub total_payments_this_month: Decimal,

    /// Number of unread [`Notification`]s among the carried (capped) ones,
    /// not over the full history.
    pub unread_notifications: u32,
}

impl Stats {
    /// Computes [`Stats`] over the freshly fetched collections.
    ///
    /// `now` anchors the current calendar month for the payment sum.
    #[expect(clippy::missing_panics_doc, reason = "counts fit `u32`")]
    #[must_use]
    pub fn compute(
        properties: &[Property],
        leases: &[Lease],
        maintenance_requests: &[maintenance::Request],
        payments: &[Payment],
        notifications: &[Notification],
        now: DateTime,
    ) -> Self {
        /// Converts a collection count into a [`Stats`] counter.
        fn count(n: usize) -> u32 {
            u32::try_from(n).expect("count overflow")
        }

        Self {
            total_properties: count(properties.len()),
            active_leases: count(
                leases
                    .iter()
                    .filter(|l| l.status == lease::Status::Active)
                    .count(),
            ),
            pending_payments: count(
                payments
                    .iter()
                    .filter(|p| p.status == payment::Status::Pending)
                    .count(),
            ),
            pending_maintenance: count(
                maintenance_requests
                    .iter()
                    .filter(|m| m.status == maintenance::Status::Pending)
                    .count(),
            ),
            total_payments_this_month: payments
                .iter()
                .filter(|p| {
                    p.status == payment::Status::Paid
                        && p.payment_date.same_calendar_month(&now)
                })
                .map(|p| p.amount.amount)
                .sum(),
            unread_notifications: count(
                notifications.iter().filter(|n| !n.read).count(),
            ),
        }
    }
}

#[cfg(test)]
mod spec {
    use common::{money::Currency, DateTime, Money};
    use rust_decimal::Decimal;

    use crate::domain::{lease, payment, property, user};

    use super::Stats;

    fn payment(
        amount: &str,
        status: payment::Status,
        settled_at: &str,
    ) -> payment::Payment {
        payment::Payment {
            id: payment::Id::new(),
            lease_id: lease::Id::new(),
            landlord_id: user::Id::new(),
            tenant_id: user::Id::new(),
            amount: Money {
                amount: amount.parse().unwrap(),
                currency: Currency::Usd,
            },
            payment_date: DateTime::from_rfc3339(settled_at)
                .unwrap()
                .coerce(),
            due_date: DateTime::from_rfc3339(settled_at).unwrap().coerce(),
            status,
            method: None,
            created_at: DateTime::UNIX_EPOCH.coerce(),
        }
    }

    fn property(landlord_id: user::Id) -> property::Property {
        property::Property {
            id: property::Id::new(),
            landlord_id,
            address: "12 Main St".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            zip_code: "62704".into(),
            unit_number: None,
            kind: Some(property::Kind::House),
            bedrooms: Some(3),
            bathrooms: None,
            square_feet: Some(1400),
            description: None,
            created_at: DateTime::UNIX_EPOCH.coerce(),
        }
    }

    #[test]
    fn sums_only_paid_payments_of_the_current_month() {
        let now = DateTime::from_rfc3339("2025-08-06T12:00:00Z").unwrap();
        let payments = [
            payment("100", payment::Status::Paid, "2025-08-02T09:00:00Z"),
            payment("50", payment::Status::Pending, "2025-08-03T09:00:00Z"),
            payment("30", payment::Status::Paid, "2025-07-28T09:00:00Z"),
        ];

        let stats = Stats::compute(&[], &[], &[], &payments, &[], now);

        assert_eq!(
            stats.total_payments_this_month,
            Decimal::from(100),
        );
        assert_eq!(stats.pending_payments, 1);
    }

    #[test]
    fn same_month_of_previous_year_does_not_count() {
        let now = DateTime::from_rfc3339("2025-08-06T12:00:00Z").unwrap();
        let payments = [
            payment("75", payment::Status::Paid, "2024-08-15T09:00:00Z"),
        ];

        let stats = Stats::compute(&[], &[], &[], &payments, &[], now);

        assert_eq!(stats.total_payments_this_month, Decimal::ZERO);
    }

    #[test]
    fn counts_are_per_status() {
        let landlord = user::Id::new();
        let tenant = user::Id::new();
        let now = DateTime::from_rfc3339("2025-08-06T12:00:00Z").unwrap();

        let properties = [property(landlord), property(landlord)];
        let mut active = lease::Lease {
            id: lease::Id::new(),
            property_id: properties[0].id,
            landlord_id: landlord,
            tenant_id: tenant,
            start_date: DateTime::UNIX_EPOCH.coerce(),
            end_date: DateTime::UNIX_EPOCH.coerce(),
            monthly_rent: "1200USD".parse().unwrap(),
            security_deposit: None,
            status: lease::Status::Active,
            created_at: DateTime::UNIX_EPOCH.coerce(),
        };
        let leases = {
            let mut expired = active.clone();
            expired.id = lease::Id::new();
            expired.status = lease::Status::Expired;
            active.id = lease::Id::new();
            [active.clone(), expired]
        };

        let stats = Stats::compute(&properties, &leases, &[], &[], &[], now);

        assert_eq!(stats.total_properties, 2);
        assert_eq!(stats.active_leases, 1);
        assert_eq!(stats.pending_maintenance, 0);
    }
}
