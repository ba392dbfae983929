//! [`Query`] collection related to [`Lease`] entities.

use common::operations::By;

use crate::{
    domain::{lease, property, user, Lease},
    read, scope,
};
#[cfg(doc)]
use crate::{
    domain::{Property, User},
    Query,
};

use super::DatabaseQuery;

/// Queries the [`Lease`] list visible through a [`scope::Leases`] filter.
pub type List = DatabaseQuery<By<Vec<Lease>, scope::Leases>>;

/// Queries a single [`Lease`] by its [`lease::Id`].
pub type ById = DatabaseQuery<By<Option<Lease>, lease::Id>>;

/// Queries whether a [`User`] holds any [`Lease`] on a [`Property`].
pub type Holding =
    DatabaseQuery<By<read::lease::HoldsLease, (property::Id, user::Id)>>;

/// Queries whether a [`User`] holds an active [`Lease`] on a [`Property`].
pub type HoldingActive =
    DatabaseQuery<By<read::lease::HoldsActiveLease, (property::Id, user::Id)>>;
