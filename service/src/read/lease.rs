//! [`Lease`]-related read definitions.

use derive_more::Deref;

#[cfg(doc)]
use crate::domain::{Lease, Property, User};

/// Indicator whether a [`User`] holds any [`Lease`] on a [`Property`].
#[derive(Clone, Copy, Debug, Deref, Eq, Hash, PartialEq)]
pub struct HoldsLease(pub bool);

impl PartialEq<bool> for HoldsLease {
    fn eq(&self, other: &bool) -> bool {
        self.0 == *other
    }
}

/// Indicator whether a [`User`] holds an active [`Lease`] on a [`Property`].
#[derive(Clone, Copy, Debug, Deref, Eq, Hash, PartialEq)]
pub struct HoldsActiveLease(pub bool);

impl PartialEq<bool> for HoldsActiveLease {
    fn eq(&self, other: &bool) -> bool {
        self.0 == *other
    }
}
