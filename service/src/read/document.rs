//! [`Document`]-related read definitions.

use crate::domain::{lease, property};
#[cfg(doc)]
use crate::domain::{Document, Lease, Property};

/// Selector of [`Document`]s attached to any of the given [`Property`]s.
///
/// An empty id set selects nothing without touching the store.
#[derive(Clone, Debug, Default)]
pub struct OfProperties(pub Vec<property::Id>);

/// Selector of [`Document`]s attached to any of the given [`Lease`]s.
///
/// An empty id set selects nothing without touching the store.
#[derive(Clone, Debug, Default)]
pub struct OfLeases(pub Vec<lease::Id>);
