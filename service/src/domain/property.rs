//! [`Property`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user;

/// Rental property listed by a landlord.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Property {
    /// ID of this [`Property`].
    pub id: Id,

    /// ID of the landlord [`User`] owning this [`Property`].
    ///
    /// Immutable after creation.
    ///
    /// [`User`]: super::User
    pub landlord_id: user::Id,

    /// Street [`Address`] of this [`Property`].
    pub address: Address,

    /// [`City`] this [`Property`] is located in.
    pub city: City,

    /// [`State`] this [`Property`] is located in.
    pub state: State,

    /// [`ZipCode`] of this [`Property`].
    pub zip_code: ZipCode,

    /// [`UnitNumber`] within the building, if any.
    pub unit_number: Option<UnitNumber>,

    /// [`Kind`] of this [`Property`].
    pub kind: Option<Kind>,

    /// Number of bedrooms.
    pub bedrooms: Option<u16>,

    /// Number of bathrooms (half-bathrooms count as `0.5`).
    pub bathrooms: Option<Decimal>,

    /// Interior area in square feet.
    pub square_feet: Option<u32>,

    /// Free-form [`Description`] of this [`Property`].
    pub description: Option<Description>,

    /// [`DateTime`] when this [`Property`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Property`].
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
    Ord,
    PartialEq,
    PartialOrd,
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
    #[doc = "Kind of a [`Property`]."]
    enum Kind {
        #[doc = "A unit in a multi-unit residential building."]
        Apartment = 1,

        #[doc = "A standalone house."]
        House = 2,

        #[doc = "An individually owned unit."]
        Condo = 3,

        #[doc = "A multi-floor attached home."]
        Townhouse = 4,
    }
}

/// Street address of a [`Property`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[from(&str, String)]
pub struct Address(String);

/// City a [`Property`] is located in.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[from(&str, String)]
pub struct City(String);

/// State a [`Property`] is located in.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[from(&str, String)]
pub struct State(String);

/// Postal code of a [`Property`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[from(&str, String)]
pub struct ZipCode(String);

/// Unit number of a [`Property`] within its building.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[from(&str, String)]
pub struct UnitNumber(String);

/// Free-form description of a [`Property`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[from(&str, String)]
pub struct Description(String);

/// [`DateTime`] when a [`Property`] was created.
pub type CreationDateTime = DateTimeOf<(Property, unit::Creation)>;
