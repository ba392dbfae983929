//! Dashboard cache invalidation.
//!
//! Every mutation of an owned entity kind funnels through here: the mutated
//! entity names the actors whose cached dashboards it appears on (its
//! [`Observers`]), and the coordinator evicts each of their key prefixes.
//! No command talks to the cache directly.

use std::collections::BTreeSet;

use common::operations::Evict;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        maintenance, user, Document, Lease, Notification, Payment, Property,
    },
    infra::{cache, Cache},
    Service,
};

/// Extraction of the actor ids able to observe an entity on their
/// dashboards.
///
/// Implemented once per entity kind; the implementations together form the
/// invalidation policy table.
pub trait Observers {
    /// Collects the observing actor ids into `out`.
    fn observers(&self, out: &mut BTreeSet<user::Id>);
}

impl Observers for Property {
    fn observers(&self, out: &mut BTreeSet<user::Id>) {
        _ = out.insert(self.landlord_id);
    }
}

impl Observers for Lease {
    fn observers(&self, out: &mut BTreeSet<user::Id>) {
        _ = out.insert(self.landlord_id);
        _ = out.insert(self.tenant_id);
    }
}

impl Observers for maintenance::Request {
    fn observers(&self, out: &mut BTreeSet<user::Id>) {
        _ = out.insert(self.landlord_id);
        // Landlord-initiated requests carry no tenant.
        if let Some(tenant_id) = self.tenant_id {
            _ = out.insert(tenant_id);
        }
    }
}

impl Observers for Payment {
    fn observers(&self, out: &mut BTreeSet<user::Id>) {
        _ = out.insert(self.landlord_id);
        _ = out.insert(self.tenant_id);
    }
}

impl Observers for Document {
    fn observers(&self, out: &mut BTreeSet<user::Id>) {
        // Documents are keyed to their uploader only. Other actors who can
        // reach the document through its property or lease keep their cached
        // dashboards until the TTL runs out.
        _ = out.insert(self.uploaded_by);
    }
}

impl Observers for Notification {
    fn observers(&self, out: &mut BTreeSet<user::Id>) {
        _ = out.insert(self.user_id);
    }
}

/// Set of actor ids whose cached dashboards a mutation made stale.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Invalidation(BTreeSet<user::Id>);

impl Invalidation {
    /// Collects the [`Invalidation`] of creating the given entity.
    #[must_use]
    pub fn of_created<E: Observers>(entity: &E) -> Self {
        let mut ids = BTreeSet::new();
        entity.observers(&mut ids);
        Self(ids)
    }

    /// Collects the [`Invalidation`] of updating an entity.
    ///
    /// Takes the union over both versions: an update may rewrite an owning
    /// actor id, and then both the old and the new owner hold a stale entry.
    #[must_use]
    pub fn of_updated<E: Observers>(before: &E, after: &E) -> Self {
        let mut ids = BTreeSet::new();
        before.observers(&mut ids);
        after.observers(&mut ids);
        Self(ids)
    }

    /// Collects the [`Invalidation`] of deleting the given entity.
    #[must_use]
    pub fn of_deleted<E: Observers>(entity: &E) -> Self {
        Self::of_created(entity)
    }

    /// [`Invalidation`] of the single given actor.
    ///
    /// For mutations phrased in terms of an actor rather than a loaded
    /// entity (bulk notification reads, explicit dashboard refreshes).
    #[must_use]
    pub fn of_actor(user_id: user::Id) -> Self {
        Self([user_id].into_iter().collect())
    }

    /// Extends this [`Invalidation`] with the observers of one more mutated
    /// entity.
    #[must_use]
    pub fn and<E: Observers>(mut self, entity: &E) -> Self {
        entity.observers(&mut self.0);
        self
    }

    /// Returns the affected actor ids, ascending.
    pub fn actor_ids(&self) -> impl Iterator<Item = user::Id> + '_ {
        self.0.iter().copied()
    }
}

impl<Db, Cs> Service<Db, Cs> {
    /// Evicts the cached dashboard of every actor in the given
    /// [`Invalidation`].
    ///
    /// Runs after the store commit of the triggering mutation, and must be
    /// awaited before the mutation's result is returned. Eviction of an
    /// absent key is a no-op, and a failing cache never fails the mutation
    /// that has already committed: failures are logged and swallowed.
    pub(crate) async fn invalidate_dashboards(&self, invalidation: Invalidation)
    where
        Cs: Cache<
            Evict<cache::KeyPrefix>,
            Ok = u64,
            Err = Traced<cache::Error>,
        >,
    {
        for user_id in invalidation.actor_ids() {
            let prefix = cache::KeyPrefix::dashboard(user_id);
            match self.cache().execute(Evict(prefix)).await {
                Ok(evicted) => {
                    log::debug!(
                        "evicted {evicted} cached dashboard(s) of `User(id: \
                         {user_id})`",
                    );
                }
                Err(e) => {
                    log::warn!(
                        "failed to evict cached dashboard of `User(id: \
                         {user_id})`: {e}",
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use std::collections::BTreeSet;

    use common::{DateTime, Money};

    use crate::domain::{document, lease, maintenance, property, user};

    use super::{Invalidation, Observers as _};

    fn lease(landlord_id: user::Id, tenant_id: user::Id) -> lease::Lease {
        lease::Lease {
            id: lease::Id::new(),
            property_id: property::Id::new(),
            landlord_id,
            tenant_id,
            start_date: DateTime::UNIX_EPOCH.coerce(),
            end_date: DateTime::UNIX_EPOCH.coerce(),
            monthly_rent: "1200USD".parse::<Money>().unwrap(),
            security_deposit: None,
            status: lease::Status::Active,
            created_at: DateTime::UNIX_EPOCH.coerce(),
        }
    }

    #[test]
    fn lease_invalidates_both_parties() {
        let landlord = user::Id::new();
        let tenant = user::Id::new();

        let invalidation = Invalidation::of_created(&lease(landlord, tenant));

        assert_eq!(
            invalidation.actor_ids().collect::<BTreeSet<_>>(),
            [landlord, tenant].into_iter().collect(),
        );
    }

    #[test]
    fn update_unions_old_and_new_owners() {
        let landlord = user::Id::new();
        let old_tenant = user::Id::new();
        let new_tenant = user::Id::new();

        let before = lease(landlord, old_tenant);
        let mut after = before.clone();
        after.tenant_id = new_tenant;

        let invalidation = Invalidation::of_updated(&before, &after);

        assert_eq!(
            invalidation.actor_ids().collect::<BTreeSet<_>>(),
            [landlord, old_tenant, new_tenant].into_iter().collect(),
        );
    }

    #[test]
    fn landlord_initiated_request_skips_absent_tenant() {
        let landlord = user::Id::new();
        let request = maintenance::Request {
            id: maintenance::Id::new(),
            property_id: property::Id::new(),
            landlord_id: landlord,
            tenant_id: None,
            title: "Repaint hallway".into(),
            description: "Scuffed walls on the 2nd floor".into(),
            priority: maintenance::Priority::Low,
            status: maintenance::Status::Pending,
            created_at: DateTime::UNIX_EPOCH.coerce(),
        };

        let mut ids = BTreeSet::new();
        request.observers(&mut ids);

        assert_eq!(ids, [landlord].into_iter().collect());
    }

    #[test]
    fn document_invalidates_uploader_only() {
        let uploader = user::Id::new();
        let document = document::Document {
            id: document::Id::new(),
            property_id: Some(property::Id::new()),
            lease_id: Some(lease::Id::new()),
            uploaded_by: uploader,
            file_name: "lease.pdf".into(),
            file_path: "documents/lease.pdf".into(),
            file_size: Some(1024),
            mime_type: Some("application/pdf".into()),
            created_at: DateTime::UNIX_EPOCH.coerce(),
        };

        let mut ids = BTreeSet::new();
        document.observers(&mut ids);

        assert_eq!(ids, [uploader].into_iter().collect());
    }
}
