//! [`Dashboard`] [`Query`] definitions.

use common::{
    operations::{By, Insert, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use futures::try_join;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        maintenance, user, Document, Lease, Notification, Payment, Principal,
        Property, User,
    },
    infra::{cache, database, Cache, Database},
    read::{
        self,
        dashboard::{Aggregate, Stats},
    },
    scope, Service,
};

use super::Query;

/// [`Query`] of a [`Principal`]'s dashboard [`Aggregate`].
///
/// Serves the cached [`Aggregate`] when one is present and deserializes;
/// otherwise rebuilds it from the store through the [`Principal`]'s scope
/// predicates, derives the [`Stats`], and caches the result with a TTL.
/// A broken cache backend only costs the rebuild: the read itself never
/// fails because of it.
#[derive(Clone, Copy, Debug)]
pub struct Dashboard(pub Principal);

impl<Db, Cs> Query<Dashboard> for Service<Db, Cs>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Property>, scope::Properties>>,
            Ok = Vec<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Lease>, scope::Leases>>,
            Ok = Vec<Lease>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<maintenance::Request>, scope::MaintenanceRequests>>,
            Ok = Vec<maintenance::Request>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Payment>, scope::Payments>>,
            Ok = Vec<Payment>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Document>, read::document::OfProperties>>,
            Ok = Vec<Document>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Document>, read::document::OfLeases>>,
            Ok = Vec<Document>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Notification>, scope::Notifications>>,
            Ok = Vec<Notification>,
            Err = Traced<database::Error>,
        >,
    Cs: Cache<
            Select<By<Option<Vec<u8>>, cache::Key>>,
            Ok = Option<Vec<u8>>,
            Err = Traced<cache::Error>,
        > + Cache<Insert<cache::Entry>, Ok = (), Err = Traced<cache::Error>>,
{
    type Ok = Aggregate;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        Dashboard(principal): Dashboard,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        // Every scope resolves before any cache or store read: an
        // unauthorized role never reaches either.
        let properties_scope = scope::properties(&principal)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        let leases_scope =
            scope::leases(&principal).map_err(tracerr::from_and_wrap!(=> E))?;
        let maintenance_scope = scope::maintenance_requests(&principal)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        let payments_scope = scope::payments(&principal)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        let documents_scope = scope::documents(&principal)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        let notifications_scope = scope::notifications(&principal)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let key = cache::Key::dashboard(principal.id);

        match self.cache().execute(Select(By::new(key.clone()))).await {
            Ok(Some(bytes)) => match Aggregate::from_cached(&bytes) {
                Ok(aggregate) => return Ok(aggregate),
                Err(e) => {
                    log::warn!(
                        "discarding undeserializable cached dashboard \
                         `{key}`: {e}",
                    );
                }
            },
            Ok(None) => {}
            Err(e) => {
                log::warn!("dashboard cache unavailable on `{key}`: {e}");
            }
        }

        // The scoped fetches touch disjoint predicates, so they run
        // concurrently and join before any stats derivation: partial
        // results are never served.
        let (
            profile,
            properties,
            leases,
            maintenance_requests,
            payments,
            notifications,
        ) = try_join!(
            async {
                self.database()
                    .execute(Select(By::<Option<User>, _>::new(principal.id)))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))
            },
            async {
                self.database()
                    .execute(Select(By::<Vec<Property>, _>::new(
                        properties_scope,
                    )))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))
            },
            async {
                self.database()
                    .execute(Select(By::<Vec<Lease>, _>::new(leases_scope)))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))
            },
            async {
                self.database()
                    .execute(Select(By::<Vec<maintenance::Request>, _>::new(
                        maintenance_scope,
                    )))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))
            },
            async {
                self.database()
                    .execute(Select(By::<Vec<Payment>, _>::new(
                        payments_scope,
                    )))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))
            },
            async {
                self.database()
                    .execute(Select(By::<Vec<Notification>, _>::new(
                        notifications_scope,
                    )))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))
            },
        )?;

        let profile = profile
            .ok_or(E::ProfileNotExists(principal.id))
            .map_err(tracerr::wrap!())?;

        // Documents are reached through the ids fetched above. An empty id
        // set yields an empty list without a store round trip.
        let documents = match documents_scope {
            scope::Documents::OnPropertiesOwnedBy(_) => {
                let ids = properties.iter().map(|p| p.id).collect();
                self.database()
                    .execute(Select(By::<Vec<Document>, _>::new(
                        read::document::OfProperties(ids),
                    )))
                    .await
            }
            scope::Documents::OnLeasesHeldBy(_) => {
                let ids = leases.iter().map(|l| l.id).collect();
                self.database()
                    .execute(Select(By::<Vec<Document>, _>::new(
                        read::document::OfLeases(ids),
                    )))
                    .await
            }
        }
        .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let stats = Stats::compute(
            &properties,
            &leases,
            &maintenance_requests,
            &payments,
            &notifications,
            DateTime::now(),
        );

        let aggregate = Aggregate {
            profile,
            properties,
            leases,
            maintenance_requests,
            documents,
            payments,
            notifications,
            stats,
        };

        // Populating the cache is best-effort.
        match aggregate.to_cached() {
            Ok(value) => {
                let entry = cache::Entry {
                    key,
                    value,
                    ttl: self.config().dashboard_cache_ttl,
                };
                if let Err(e) = self.cache().execute(Insert(entry)).await {
                    log::warn!(
                        "failed to cache dashboard of `User(id: {})`: {e}",
                        principal.id,
                    );
                }
            }
            Err(e) => {
                log::warn!(
                    "failed to serialize dashboard of `User(id: {})`: {e}",
                    principal.id,
                );
            }
        }

        Ok(aggregate)
    }
}

/// Error of [`Dashboard`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Principal`]'s role has no dashboard.
    #[display("{_0}")]
    UnauthorizedRole(scope::UnauthorizedRole),

    /// [`User`] profile doesn't exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    ProfileNotExists(#[error(not(source))] user::Id),
}
