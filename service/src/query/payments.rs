//! [`Query`] collection related to [`Payment`] entities.

use common::operations::By;

use crate::{
    domain::{payment, Payment},
    scope,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries the [`Payment`] list visible through a [`scope::Payments`]
/// filter.
pub type List = DatabaseQuery<By<Vec<Payment>, scope::Payments>>;

/// Queries a single [`Payment`] by its [`payment::Id`].
pub type ById = DatabaseQuery<By<Option<Payment>, payment::Id>>;
