//! In-process [`Memory`] cache.

use std::{collections::HashMap, sync::Arc};

use common::operations::{By, Evict, Insert, Select};
use tokio::{sync::RwLock, time::Instant};
use tracerr::Traced;

use super::{Cache, Entry, Error, Expired, Key, KeyPrefix};

/// In-process [`Cache`] keeping entries in a [`HashMap`] with per-entry
/// deadlines.
///
/// An entry past its deadline is invisible to readers immediately; its
/// memory is reclaimed either by an [`Evict`] of [`Expired`] (the sweep
/// task does this periodically) or by being overwritten.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// Cached entries.
    entries: Arc<RwLock<HashMap<String, StoredEntry>>>,
}

impl Memory {
    /// Creates a new empty [`Memory`] cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Value stored in a [`Memory`] cache.
#[derive(Clone, Debug)]
struct StoredEntry {
    /// Serialized value.
    value: Vec<u8>,

    /// [`Instant`] the value stops being readable at.
    deadline: Instant,
}

impl Cache<Select<By<Option<Vec<u8>>, Key>>> for Memory {
    type Ok = Option<Vec<u8>>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Vec<u8>>, Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        let key: Key = by.into_inner();

        let entries = self.entries.read().await;
        Ok(entries
            .get::<str>(key.as_ref())
            .filter(|e| e.deadline > Instant::now())
            .map(|e| e.value.clone()))
    }
}

impl Cache<Insert<Entry>> for Memory {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Insert(entry): Insert<Entry>,
    ) -> Result<Self::Ok, Self::Err> {
        let Entry { key, value, ttl } = entry;

        let stored = StoredEntry {
            value,
            deadline: Instant::now() + ttl,
        };

        let mut entries = self.entries.write().await;
        _ = entries.insert(key.into(), stored);

        Ok(())
    }
}

impl Cache<Evict<KeyPrefix>> for Memory {
    type Ok = u64;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Evict(prefix): Evict<KeyPrefix>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut entries = self.entries.write().await;

        let before = entries.len();
        entries.retain(|key, _| !prefix.covers(key));

        Ok((before - entries.len()) as u64)
    }
}

impl Cache<Evict<Expired>> for Memory {
    type Ok = u64;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Evict(Expired): Evict<Expired>,
    ) -> Result<Self::Ok, Self::Err> {
        let now = Instant::now();

        let mut entries = self.entries.write().await;

        let before = entries.len();
        entries.retain(|_, e| e.deadline > now);

        Ok((before - entries.len()) as u64)
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::operations::{By, Evict, Insert, Select};
    use tokio::time;

    use crate::{
        domain::user,
        infra::cache::{Cache as _, Entry, Expired, Key, KeyPrefix},
    };

    use super::Memory;

    fn entry(user_id: user::Id, ttl: Duration) -> Entry {
        Entry {
            key: Key::dashboard(user_id),
            value: br#"{"cached":true}"#.to_vec(),
            ttl,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn entry_expires_after_its_ttl() {
        let cache = Memory::new();
        let user_id = user::Id::new();

        cache
            .execute(Insert(entry(user_id, Duration::from_secs(300))))
            .await
            .unwrap();

        let hit = cache
            .execute(Select(By::new(Key::dashboard(user_id))))
            .await
            .unwrap();
        assert!(hit.is_some());

        time::advance(Duration::from_secs(301)).await;

        let miss = cache
            .execute(Select(By::new(Key::dashboard(user_id))))
            .await
            .unwrap();
        assert!(miss.is_none());

        let swept = cache.execute(Evict(Expired)).await.unwrap();
        assert_eq!(swept, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn eviction_by_prefix_spares_other_users() {
        let cache = Memory::new();
        let evicted_user = user::Id::new();
        let spared_user = user::Id::new();

        for id in [evicted_user, spared_user] {
            cache
                .execute(Insert(entry(id, Duration::from_secs(300))))
                .await
                .unwrap();
        }

        let evicted = cache
            .execute(Evict(KeyPrefix::dashboard(evicted_user)))
            .await
            .unwrap();
        assert_eq!(evicted, 1);

        let spared = cache
            .execute(Select(By::new(Key::dashboard(spared_user))))
            .await
            .unwrap();
        assert!(spared.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn eviction_of_absent_key_is_a_no_op() {
        let cache = Memory::new();

        let evicted = cache
            .execute(Evict(KeyPrefix::dashboard(user::Id::new())))
            .await
            .unwrap();

        assert_eq!(evicted, 0);
    }
}
