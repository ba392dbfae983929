//! [`Query`] collection related to [`Property`] entities.

use common::operations::By;

use crate::{
    domain::{property, Property},
    scope,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries the [`Property`] list visible through a [`scope::Properties`]
/// filter.
pub type List = DatabaseQuery<By<Vec<Property>, scope::Properties>>;

/// Queries a single [`Property`] by its [`property::Id`].
pub type ById = DatabaseQuery<By<Option<Property>, property::Id>>;
