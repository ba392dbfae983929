//! [`Query`] collection related to [`Document`] entities.

use common::operations::By;

use crate::{
    domain::{document, Document},
    scope,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries the [`Document`] list visible through a [`scope::Documents`]
/// filter.
pub type List = DatabaseQuery<By<Vec<Document>, scope::Documents>>;

/// Queries a single [`Document`] by its [`document::Id`].
pub type ById = DatabaseQuery<By<Option<Document>, document::Id>>;
