//! Aggregate cache implementations.
//!
//! The cache is an optimization, never a dependency: callers treat every
//! operation as fallible and degrade to the [`Database`] when it fails.
//!
//! [`Database`]: crate::infra::Database

pub mod memory;

use std::time::Duration;

use derive_more::{AsRef, Display, Error as StdError, Into};

use crate::domain::user;
#[cfg(doc)]
use crate::read::dashboard::Aggregate;

pub use self::memory::Memory;

/// Cache operation.
pub use common::Handler as Cache;

/// Key of a cached value.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Into, PartialEq)]
#[as_ref(str, String)]
pub struct Key(String);

impl Key {
    /// Returns the [`Key`] of the given user's cached dashboard
    /// [`Aggregate`].
    #[must_use]
    pub fn dashboard(user_id: user::Id) -> Self {
        Self(format!("dashboard:{user_id}"))
    }
}

/// Prefix matching a family of [`Key`]s.
///
/// Evicting by prefix rather than by exact [`Key`] keeps eviction correct if
/// dashboard keys ever grow sharded suffixes.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct KeyPrefix(String);

impl KeyPrefix {
    /// Returns the [`KeyPrefix`] covering every cached dashboard [`Key`] of
    /// the given user.
    #[must_use]
    pub fn dashboard(user_id: user::Id) -> Self {
        Self(format!("dashboard:{user_id}"))
    }

    /// Checks whether the given [`Key`] falls under this [`KeyPrefix`].
    #[must_use]
    pub fn covers(&self, key: impl AsRef<str>) -> bool {
        key.as_ref().starts_with(&self.0)
    }
}

/// Value to be cached under a [`Key`] for a bounded time.
#[derive(Clone, Debug)]
pub struct Entry {
    /// [`Key`] to cache the value under.
    pub key: Key,

    /// Serialized value itself.
    pub value: Vec<u8>,

    /// Time the value stays readable after insertion.
    pub ttl: Duration,
}

/// Marker selecting every [`Entry`] whose TTL has run out.
#[derive(Clone, Copy, Debug)]
pub struct Expired;

/// [`Cache`] error.
#[derive(Debug, Display, StdError)]
pub enum Error {
    /// Cache backend cannot be reached.
    #[display("cache backend unavailable: {_0}")]
    Unavailable(#[error(not(source))] String),
}
