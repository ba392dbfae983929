//! [`Query`] collection related to [`Notification`] entities.

use common::operations::By;

use crate::{
    domain::{notification, Notification},
    scope,
};
#[cfg(doc)]
use crate::{read::dashboard::NOTIFICATIONS_LIMIT, Query};

use super::DatabaseQuery;

/// Queries the newest [`Notification`]s visible through a
/// [`scope::Notifications`] filter, capped at [`NOTIFICATIONS_LIMIT`].
pub type List = DatabaseQuery<By<Vec<Notification>, scope::Notifications>>;

/// Queries a single [`Notification`] by its [`notification::Id`].
pub type ById = DatabaseQuery<By<Option<Notification>, notification::Id>>;
