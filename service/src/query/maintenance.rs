//! [`Query`] collection related to maintenance [`Request`] entities.

use common::operations::By;

use crate::{domain::maintenance, scope};
#[cfg(doc)]
use crate::{domain::maintenance::Request, Query};

use super::DatabaseQuery;

/// Queries the maintenance [`Request`] list visible through a
/// [`scope::MaintenanceRequests`] filter.
pub type List = DatabaseQuery<
    By<Vec<maintenance::Request>, scope::MaintenanceRequests>,
>;

/// Queries a single maintenance [`Request`] by its [`maintenance::Id`].
pub type ById =
    DatabaseQuery<By<Option<maintenance::Request>, maintenance::Id>>;
