//! [`Document`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{lease, property, user};

/// Metadata of an uploaded file attached to a [`Property`] and/or a
/// [`Lease`].
///
/// The file contents live in external blob storage; only the metadata is
/// kept here.
///
/// [`Lease`]: super::Lease
/// [`Property`]: super::Property
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Document {
    /// ID of this [`Document`].
    pub id: Id,

    /// ID of the [`Property`] this [`Document`] is attached to.
    ///
    /// [`Property`]: super::Property
    pub property_id: Option<property::Id>,

    /// ID of the [`Lease`] this [`Document`] is attached to.
    ///
    /// [`Lease`]: super::Lease
    pub lease_id: Option<lease::Id>,

    /// ID of the [`User`] who uploaded this [`Document`].
    ///
    /// [`User`]: super::User
    pub uploaded_by: user::Id,

    /// Original [`FileName`] of this [`Document`].
    pub file_name: FileName,

    /// [`FilePath`] of this [`Document`] in the blob storage.
    pub file_path: FilePath,

    /// Size of this [`Document`] in bytes.
    pub file_size: Option<u64>,

    /// MIME type of this [`Document`].
    pub mime_type: Option<MimeType>,

    /// [`DateTime`] when this [`Document`] was uploaded.
    pub created_at: CreationDateTime,
}

/// ID of a [`Document`].
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

/// Original file name of a [`Document`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[from(&str, String)]
pub struct FileName(String);

/// Location of a [`Document`] in the blob storage.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[from(&str, String)]
pub struct FilePath(String);

/// MIME type of a [`Document`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[from(&str, String)]
pub struct MimeType(String);

/// [`DateTime`] when a [`Document`] was uploaded.
pub type CreationDateTime = DateTimeOf<(Document, unit::Creation)>;
