//! [`Payment`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{lease, user};

/// Rent payment made (or due) under a [`Lease`].
///
/// [`Lease`]: super::Lease
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Payment {
    /// ID of this [`Payment`].
    pub id: Id,

    /// ID of the [`Lease`] this [`Payment`] is made under.
    ///
    /// [`Lease`]: super::Lease
    pub lease_id: lease::Id,

    /// ID of the landlord [`User`] collecting this [`Payment`].
    ///
    /// Copied from the [`Lease`] at creation, immutable afterwards.
    ///
    /// [`Lease`]: super::Lease
    /// [`User`]: super::User
    pub landlord_id: user::Id,

    /// ID of the tenant [`User`] owing this [`Payment`].
    ///
    /// Copied from the [`Lease`] at creation, immutable afterwards.
    ///
    /// [`Lease`]: super::Lease
    /// [`User`]: super::User
    pub tenant_id: user::Id,

    /// Amount of this [`Payment`].
    pub amount: Money,

    /// [`DateTime`] when this [`Payment`] was (or is to be) settled.
    pub payment_date: SettlementDateTime,

    /// [`DateTime`] when this [`Payment`] is due.
    pub due_date: DueDateTime,

    /// Current [`Status`] of this [`Payment`].
    pub status: Status,

    /// [`Method`] this [`Payment`] was made with.
    pub method: Option<Method>,

    /// [`DateTime`] when this [`Payment`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Payment`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

define_kind! {
    #[doc = "Status of a [`Payment`]."]
    enum Status {
        #[doc = "Expected, not settled yet."]
        Pending = 1,

        #[doc = "Settled in full."]
        Paid = 2,

        #[doc = "Settled after its due date."]
        Late = 3,

        #[doc = "Attempted and rejected."]
        Failed = 4,

        #[doc = "Settled and returned."]
        Refunded = 5,
    }
}

define_kind! {
    #[doc = "Method a [`Payment`] is made with."]
    enum Method {
        #[doc = "Credit or debit card."]
        Card = 1,

        #[doc = "Direct bank transfer."]
        BankTransfer = 2,

        #[doc = "Paper check."]
        Check = 3,

        #[doc = "Cash handed over in person."]
        Cash = 4,
    }
}

/// [`DateTime`] when a [`Payment`] was (or is to be) settled.
pub type SettlementDateTime = DateTimeOf<(Payment, unit::Settlement)>;

/// [`DateTime`] when a [`Payment`] is due.
pub type DueDateTime = DateTimeOf<(Payment, unit::Due)>;

/// [`DateTime`] when a [`Payment`] was created.
pub type CreationDateTime = DateTimeOf<(Payment, unit::Creation)>;
