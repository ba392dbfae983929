//! [`Notification`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user;

/// In-app notification addressed to a single [`User`].
///
/// [`User`]: super::User
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Notification {
    /// ID of this [`Notification`].
    pub id: Id,

    /// ID of the [`User`] this [`Notification`] is addressed to.
    ///
    /// [`User`]: super::User
    pub user_id: user::Id,

    /// Short [`Title`] of this [`Notification`].
    pub title: Title,

    /// [`Message`] body of this [`Notification`].
    pub message: Message,

    /// [`Kind`] of the event this [`Notification`] describes.
    pub kind: Kind,

    /// Whether the addressee has read this [`Notification`].
    pub read: bool,

    /// [`DateTime`] when this [`Notification`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Notification`].
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
    #[doc = "Kind of the event a [`Notification`] describes."]
    enum Kind {
        #[doc = "Payment recorded, due or late."]
        Payment = 1,

        #[doc = "Maintenance request raised or progressed."]
        Maintenance = 2,

        #[doc = "Lease created or changed."]
        Lease = 3,

        #[doc = "Direct message received."]
        Message = 4,

        #[doc = "Platform-level announcement."]
        System = 5,
    }
}

/// Bulk transition of every [`Notification`] of a [`User`] into the read
/// state.
///
/// [`User`]: super::User
#[derive(Clone, Copy, Debug)]
pub struct ReadAll(pub user::Id);

/// Short title of a [`Notification`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[from(&str, String)]
pub struct Title(String);

/// Body of a [`Notification`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[from(&str, String)]
pub struct Message(String);

/// [`DateTime`] when a [`Notification`] was created.
pub type CreationDateTime = DateTimeOf<(Notification, unit::Creation)>;
