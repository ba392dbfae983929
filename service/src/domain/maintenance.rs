//! Maintenance [`Request`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{property, user};

/// Maintenance request raised against a [`Property`].
///
/// Raised either by the tenant living there, or by the landlord directly (in
/// which case it carries no tenant).
///
/// [`Property`]: super::Property
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Request {
    /// ID of this [`Request`].
    pub id: Id,

    /// ID of the [`Property`] this [`Request`] is raised against.
    ///
    /// [`Property`]: super::Property
    pub property_id: property::Id,

    /// ID of the landlord [`User`] responsible for this [`Request`].
    ///
    /// Immutable after creation.
    ///
    /// [`User`]: super::User
    pub landlord_id: user::Id,

    /// ID of the tenant [`User`] who reported this [`Request`].
    ///
    /// [`None`] for landlord-initiated requests.
    ///
    /// [`User`]: super::User
    pub tenant_id: Option<user::Id>,

    /// Short [`Title`] of this [`Request`].
    pub title: Title,

    /// Detailed [`Description`] of the issue.
    pub description: Description,

    /// [`Priority`] of this [`Request`].
    pub priority: Priority,

    /// Current [`Status`] of this [`Request`].
    pub status: Status,

    /// [`DateTime`] when this [`Request`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a maintenance [`Request`].
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
    #[doc = "Priority of a maintenance [`Request`]."]
    enum Priority {
        #[doc = "Can wait for the next scheduled visit."]
        Low = 1,

        #[doc = "Should be handled within days."]
        Medium = 2,

        #[doc = "Should be handled as soon as possible."]
        High = 3,

        #[doc = "Requires immediate attention."]
        Emergency = 4,
    }
}

define_kind! {
    #[doc = "Status of a maintenance [`Request`]."]
    enum Status {
        #[doc = "Reported, not picked up yet."]
        Pending = 1,

        #[doc = "Being worked on."]
        InProgress = 2,

        #[doc = "Work finished."]
        Completed = 3,

        #[doc = "Withdrawn or rejected."]
        Cancelled = 4,
    }
}

/// Short title of a maintenance [`Request`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[from(&str, String)]
pub struct Title(String);

/// Detailed description of a maintenance [`Request`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[from(&str, String)]
pub struct Description(String);

/// [`DateTime`] when a maintenance [`Request`] was created.
pub type CreationDateTime = DateTimeOf<(Request, unit::Creation)>;
