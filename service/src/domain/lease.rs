//! [`Lease`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{property, user};

/// Rental agreement between a landlord and a tenant over a [`Property`].
///
/// [`Property`]: super::Property
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Lease {
    /// ID of this [`Lease`].
    pub id: Id,

    /// ID of the [`Property`] this [`Lease`] is granted over.
    ///
    /// [`Property`]: super::Property
    pub property_id: property::Id,

    /// ID of the landlord [`User`] granting this [`Lease`].
    ///
    /// Immutable after creation.
    ///
    /// [`User`]: super::User
    pub landlord_id: user::Id,

    /// ID of the tenant [`User`] holding this [`Lease`].
    ///
    /// [`User`]: super::User
    pub tenant_id: user::Id,

    /// [`DateTime`] when this [`Lease`] starts.
    pub start_date: StartDateTime,

    /// [`DateTime`] when this [`Lease`] ends.
    pub end_date: EndDateTime,

    /// Monthly rent due under this [`Lease`].
    pub monthly_rent: Money,

    /// Security deposit held under this [`Lease`].
    pub security_deposit: Option<Money>,

    /// Current [`Status`] of this [`Lease`].
    pub status: Status,

    /// [`DateTime`] when this [`Lease`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Lease`].
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
    #[doc = "Status of a [`Lease`]."]
    enum Status {
        #[doc = "Signed, but not in force yet."]
        Pending = 1,

        #[doc = "In force."]
        Active = 2,

        #[doc = "Ran out its end date."]
        Expired = 3,

        #[doc = "Ended early by either party."]
        Terminated = 4,
    }
}

/// [`DateTime`] when a [`Lease`] starts.
pub type StartDateTime = DateTimeOf<(Lease, unit::PeriodStart)>;

/// [`DateTime`] when a [`Lease`] ends.
pub type EndDateTime = DateTimeOf<(Lease, unit::PeriodEnd)>;

/// [`DateTime`] when a [`Lease`] was created.
pub type CreationDateTime = DateTimeOf<(Lease, unit::Creation)>;
