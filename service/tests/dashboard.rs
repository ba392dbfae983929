//! Dashboard aggregation and cache coherence tests, run against an
//! in-memory store speaking the same operation seam as the real database.

use std::{
    collections::{BTreeSet, HashMap},
    sync::Arc,
    time::Duration,
};

use common::{
    operations::{By, Delete, Insert, Select, Update},
    DateTime, Money,
};
use rust_decimal::Decimal;
use service::{
    command::{self, Command as _},
    domain::{
        document, lease, maintenance, notification, payment, property, user,
        Document, Lease, Notification, Payment, Principal, Property, User,
    },
    infra::{
        cache::{Cache as _, Key, Memory},
        database, Database,
    },
    query::{self, Query as _},
    read, scope, Service,
};
use tokio::sync::RwLock;
use tracerr::Traced;

/// In-memory [`Database`] implementation.
#[derive(Clone, Debug, Default)]
struct InMemory {
    users: Arc<RwLock<HashMap<user::Id, User>>>,
    properties: Arc<RwLock<HashMap<property::Id, Property>>>,
    leases: Arc<RwLock<HashMap<lease::Id, Lease>>>,
    maintenance: Arc<RwLock<HashMap<maintenance::Id, maintenance::Request>>>,
    payments: Arc<RwLock<HashMap<payment::Id, Payment>>>,
    documents: Arc<RwLock<HashMap<document::Id, Document>>>,
    notifications: Arc<RwLock<HashMap<notification::Id, Notification>>>,
}

type DbError = Traced<database::Error>;

impl Database<Select<By<Option<User>, user::Id>>> for InMemory {
    type Ok = Option<User>;
    type Err = DbError;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.users.read().await.get(&by.into_inner()).cloned())
    }
}

impl Database<Insert<User>> for InMemory {
    type Ok = ();
    type Err = DbError;

    async fn execute(
        &self,
        Insert(user): Insert<User>,
    ) -> Result<Self::Ok, Self::Err> {
        let _ = self.users.write().await.insert(user.id, user);
        Ok(())
    }
}

impl Database<Select<By<Vec<Property>, scope::Properties>>> for InMemory {
    type Ok = Vec<Property>;
    type Err = DbError;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Property>, scope::Properties>>,
    ) -> Result<Self::Ok, Self::Err> {
        let properties = self.properties.read().await;
        Ok(match by.into_inner() {
            scope::Properties::OwnedBy(landlord_id) => properties
                .values()
                .filter(|p| p.landlord_id == landlord_id)
                .cloned()
                .collect(),
            scope::Properties::LeasedBy(tenant_id) => {
                let ids = self
                    .leases
                    .read()
                    .await
                    .values()
                    .filter(|l| l.tenant_id == tenant_id)
                    .map(|l| l.property_id)
                    .collect::<BTreeSet<_>>();
                ids.into_iter()
                    .filter_map(|id| properties.get(&id).cloned())
                    .collect()
            }
        })
    }
}

impl Database<Select<By<Option<Property>, property::Id>>> for InMemory {
    type Ok = Option<Property>;
    type Err = DbError;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.properties.read().await.get(&by.into_inner()).cloned())
    }
}

impl Database<Insert<Property>> for InMemory {
    type Ok = ();
    type Err = DbError;

    async fn execute(
        &self,
        Insert(property): Insert<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        let _ = self
            .properties
            .write()
            .await
            .insert(property.id, property);
        Ok(())
    }
}

impl Database<Update<Property>> for InMemory {
    type Ok = ();
    type Err = DbError;

    async fn execute(
        &self,
        Update(property): Update<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Insert(property)).await
    }
}

impl Database<Delete<By<Property, property::Id>>> for InMemory {
    type Ok = ();
    type Err = DbError;

    async fn execute(
        &self,
        Delete(by): Delete<By<Property, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let _ = self.properties.write().await.remove(&by.into_inner());
        Ok(())
    }
}

impl Database<Select<By<Vec<Lease>, scope::Leases>>> for InMemory {
    type Ok = Vec<Lease>;
    type Err = DbError;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Lease>, scope::Leases>>,
    ) -> Result<Self::Ok, Self::Err> {
        let leases = self.leases.read().await;
        Ok(match by.into_inner() {
            scope::Leases::GrantedBy(id) => leases
                .values()
                .filter(|l| l.landlord_id == id)
                .cloned()
                .collect(),
            scope::Leases::HeldBy(id) => leases
                .values()
                .filter(|l| l.tenant_id == id)
                .cloned()
                .collect(),
        })
    }
}

impl Database<Select<By<Option<Lease>, lease::Id>>> for InMemory {
    type Ok = Option<Lease>;
    type Err = DbError;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Lease>, lease::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.leases.read().await.get(&by.into_inner()).cloned())
    }
}

impl
    Database<
        Select<By<read::lease::HoldsActiveLease, (property::Id, user::Id)>>,
    > for InMemory
{
    type Ok = read::lease::HoldsActiveLease;
    type Err = DbError;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::lease::HoldsActiveLease, (property::Id, user::Id)>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let (property_id, tenant_id) = by.into_inner();
        Ok(read::lease::HoldsActiveLease(
            self.leases.read().await.values().any(|l| {
                l.property_id == property_id
                    && l.tenant_id == tenant_id
                    && l.status == lease::Status::Active
            }),
        ))
    }
}

impl Database<Insert<Lease>> for InMemory {
    type Ok = ();
    type Err = DbError;

    async fn execute(
        &self,
        Insert(lease): Insert<Lease>,
    ) -> Result<Self::Ok, Self::Err> {
        let _ = self.leases.write().await.insert(lease.id, lease);
        Ok(())
    }
}

impl Database<Update<Lease>> for InMemory {
    type Ok = ();
    type Err = DbError;

    async fn execute(
        &self,
        Update(lease): Update<Lease>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Insert(lease)).await
    }
}

impl Database<Delete<By<Lease, lease::Id>>> for InMemory {
    type Ok = ();
    type Err = DbError;

    async fn execute(
        &self,
        Delete(by): Delete<By<Lease, lease::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let _ = self.leases.write().await.remove(&by.into_inner());
        Ok(())
    }
}

impl Database<Select<By<Vec<maintenance::Request>, scope::MaintenanceRequests>>>
    for InMemory
{
    type Ok = Vec<maintenance::Request>;
    type Err = DbError;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<maintenance::Request>, scope::MaintenanceRequests>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let requests = self.maintenance.read().await;
        Ok(match by.into_inner() {
            scope::MaintenanceRequests::ManagedBy(id) => requests
                .values()
                .filter(|m| m.landlord_id == id)
                .cloned()
                .collect(),
            scope::MaintenanceRequests::ReportedBy(id) => requests
                .values()
                .filter(|m| m.tenant_id == Some(id))
                .cloned()
                .collect(),
        })
    }
}

impl Database<Select<By<Option<maintenance::Request>, maintenance::Id>>>
    for InMemory
{
    type Ok = Option<maintenance::Request>;
    type Err = DbError;

    async fn execute(
        &self,
        Select(by): Select<By<Option<maintenance::Request>, maintenance::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.maintenance.read().await.get(&by.into_inner()).cloned())
    }
}

impl Database<Insert<maintenance::Request>> for InMemory {
    type Ok = ();
    type Err = DbError;

    async fn execute(
        &self,
        Insert(request): Insert<maintenance::Request>,
    ) -> Result<Self::Ok, Self::Err> {
        let _ = self.maintenance.write().await.insert(request.id, request);
        Ok(())
    }
}

impl Database<Update<maintenance::Request>> for InMemory {
    type Ok = ();
    type Err = DbError;

    async fn execute(
        &self,
        Update(request): Update<maintenance::Request>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Insert(request)).await
    }
}

impl Database<Select<By<Vec<Payment>, scope::Payments>>> for InMemory {
    type Ok = Vec<Payment>;
    type Err = DbError;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Payment>, scope::Payments>>,
    ) -> Result<Self::Ok, Self::Err> {
        let payments = self.payments.read().await;
        Ok(match by.into_inner() {
            scope::Payments::CollectedBy(id) => payments
                .values()
                .filter(|p| p.landlord_id == id)
                .cloned()
                .collect(),
            scope::Payments::OwedBy(id) => payments
                .values()
                .filter(|p| p.tenant_id == id)
                .cloned()
                .collect(),
        })
    }
}

impl Database<Select<By<Option<Payment>, payment::Id>>> for InMemory {
    type Ok = Option<Payment>;
    type Err = DbError;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Payment>, payment::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.payments.read().await.get(&by.into_inner()).cloned())
    }
}

impl Database<Insert<Payment>> for InMemory {
    type Ok = ();
    type Err = DbError;

    async fn execute(
        &self,
        Insert(payment): Insert<Payment>,
    ) -> Result<Self::Ok, Self::Err> {
        let _ = self.payments.write().await.insert(payment.id, payment);
        Ok(())
    }
}

impl Database<Update<Payment>> for InMemory {
    type Ok = ();
    type Err = DbError;

    async fn execute(
        &self,
        Update(payment): Update<Payment>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Insert(payment)).await
    }
}

impl Database<Select<By<Vec<Document>, read::document::OfProperties>>>
    for InMemory
{
    type Ok = Vec<Document>;
    type Err = DbError;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Document>, read::document::OfProperties>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::document::OfProperties(ids) = by.into_inner();
        Ok(self
            .documents
            .read()
            .await
            .values()
            .filter(|d| d.property_id.is_some_and(|id| ids.contains(&id)))
            .cloned()
            .collect())
    }
}

impl Database<Select<By<Vec<Document>, read::document::OfLeases>>>
    for InMemory
{
    type Ok = Vec<Document>;
    type Err = DbError;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Document>, read::document::OfLeases>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::document::OfLeases(ids) = by.into_inner();
        Ok(self
            .documents
            .read()
            .await
            .values()
            .filter(|d| d.lease_id.is_some_and(|id| ids.contains(&id)))
            .cloned()
            .collect())
    }
}

impl Database<Select<By<Option<Document>, document::Id>>> for InMemory {
    type Ok = Option<Document>;
    type Err = DbError;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Document>, document::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.documents.read().await.get(&by.into_inner()).cloned())
    }
}

impl Database<Insert<Document>> for InMemory {
    type Ok = ();
    type Err = DbError;

    async fn execute(
        &self,
        Insert(document): Insert<Document>,
    ) -> Result<Self::Ok, Self::Err> {
        let _ = self.documents.write().await.insert(document.id, document);
        Ok(())
    }
}

impl Database<Delete<By<Document, document::Id>>> for InMemory {
    type Ok = ();
    type Err = DbError;

    async fn execute(
        &self,
        Delete(by): Delete<By<Document, document::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let _ = self.documents.write().await.remove(&by.into_inner());
        Ok(())
    }
}

impl Database<Select<By<Vec<Notification>, scope::Notifications>>>
    for InMemory
{
    type Ok = Vec<Notification>;
    type Err = DbError;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Notification>, scope::Notifications>>,
    ) -> Result<Self::Ok, Self::Err> {
        let scope::Notifications::AddressedTo(user_id) = by.into_inner();
        let mut notifications = self
            .notifications
            .read()
            .await
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect::<Vec<_>>();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notifications.truncate(read::dashboard::NOTIFICATIONS_LIMIT);
        Ok(notifications)
    }
}

impl Database<Select<By<Option<Notification>, notification::Id>>>
    for InMemory
{
    type Ok = Option<Notification>;
    type Err = DbError;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Notification>, notification::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .notifications
            .read()
            .await
            .get(&by.into_inner())
            .cloned())
    }
}

impl Database<Insert<Notification>> for InMemory {
    type Ok = ();
    type Err = DbError;

    async fn execute(
        &self,
        Insert(notification): Insert<Notification>,
    ) -> Result<Self::Ok, Self::Err> {
        let _ = self
            .notifications
            .write()
            .await
            .insert(notification.id, notification);
        Ok(())
    }
}

impl Database<Update<Notification>> for InMemory {
    type Ok = ();
    type Err = DbError;

    async fn execute(
        &self,
        Update(notification): Update<Notification>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Insert(notification)).await
    }
}

impl Database<Update<notification::ReadAll>> for InMemory {
    type Ok = u64;
    type Err = DbError;

    async fn execute(
        &self,
        Update(read_all): Update<notification::ReadAll>,
    ) -> Result<Self::Ok, Self::Err> {
        let notification::ReadAll(user_id) = read_all;
        let mut notifications = self.notifications.write().await;
        let mut marked = 0;
        for n in notifications.values_mut() {
            if n.user_id == user_id && !n.read {
                n.read = true;
                marked += 1;
            }
        }
        Ok(marked)
    }
}

/// Test environment around a [`Service`] over the in-memory store.
struct Env {
    service: Service<InMemory, Memory>,
    store: InMemory,
    cache: Memory,
}

fn env() -> Env {
    let store = InMemory::default();
    let cache = Memory::new();
    let (service, _bg) = Service::new(
        service::Config::default(),
        store.clone(),
        cache.clone(),
    );
    Env {
        service,
        store,
        cache,
    }
}

impl Env {
    async fn seed_user(&self, role: user::Role) -> Principal {
        let id = user::Id::new();
        let user = User {
            id,
            email: user::Email::new(format!("{id}@example.com")).unwrap(),
            full_name: None,
            phone: None,
            role,
            avatar_url: None,
            created_at: DateTime::now().coerce(),
        };
        self.store.execute(Insert(user)).await.unwrap();
        Principal { id, role }
    }

    async fn seed_property(&self, landlord: Principal) -> Property {
        let property = Property {
            id: property::Id::new(),
            landlord_id: landlord.id,
            address: "12 Main St".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            zip_code: "62704".into(),
            unit_number: None,
            kind: Some(property::Kind::House),
            bedrooms: Some(3),
            bathrooms: Some(Decimal::new(15, 1)),
            square_feet: Some(1400),
            description: None,
            created_at: DateTime::now().coerce(),
        };
        self.store
            .execute(Insert(property.clone()))
            .await
            .unwrap();
        property
    }

    async fn seed_lease(
        &self,
        property: &Property,
        tenant: Principal,
        status: lease::Status,
    ) -> Lease {
        let lease = Lease {
            id: lease::Id::new(),
            property_id: property.id,
            landlord_id: property.landlord_id,
            tenant_id: tenant.id,
            start_date: DateTime::now().coerce(),
            end_date: DateTime::now().coerce(),
            monthly_rent: money("1200"),
            security_deposit: None,
            status,
            created_at: DateTime::now().coerce(),
        };
        self.store.execute(Insert(lease.clone())).await.unwrap();
        lease
    }

    async fn dashboard(&self, principal: Principal) -> read::dashboard::Aggregate {
        self.service
            .execute(query::Dashboard(principal))
            .await
            .unwrap()
    }

    async fn cached(&self, principal: Principal) -> Option<Vec<u8>> {
        self.cache
            .execute(Select(By::new(Key::dashboard(principal.id))))
            .await
            .unwrap()
    }
}

fn money(amount: &str) -> Money {
    format!("{amount}USD").parse().unwrap()
}

#[tokio::test]
async fn landlord_sees_only_owned_properties() {
    let env = env();
    let landlord_a = env.seed_user(user::Role::Landlord).await;
    let landlord_b = env.seed_user(user::Role::Landlord).await;
    let property_a = env.seed_property(landlord_a).await;
    let _property_b = env.seed_property(landlord_b).await;

    let dashboard = env.dashboard(landlord_a).await;

    assert_eq!(
        dashboard.properties.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![property_a.id],
    );
    assert_eq!(dashboard.stats.total_properties, 1);
}

#[tokio::test]
async fn tenant_sees_leased_property_without_duplicates() {
    let env = env();
    let landlord = env.seed_user(user::Role::Landlord).await;
    let tenant = env.seed_user(user::Role::Tenant).await;
    let property = env.seed_property(landlord).await;

    // Two leases over the same property (e.g. a renewal).
    let _past = env
        .seed_lease(&property, tenant, lease::Status::Expired)
        .await;
    let _current = env
        .seed_lease(&property, tenant, lease::Status::Active)
        .await;

    let dashboard = env.dashboard(tenant).await;

    assert_eq!(
        dashboard.properties.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![property.id],
    );
    assert_eq!(dashboard.leases.len(), 2);
    assert_eq!(dashboard.stats.active_leases, 1);
}

#[tokio::test]
async fn contractor_has_no_dashboard() {
    let env = env();
    let contractor = env.seed_user(user::Role::Contractor).await;

    let result = env.service.execute(query::Dashboard(contractor)).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn payment_creation_invalidates_both_parties_and_spares_others() {
    let env = env();
    let landlord = env.seed_user(user::Role::Landlord).await;
    let tenant = env.seed_user(user::Role::Tenant).await;
    let bystander = env.seed_user(user::Role::Landlord).await;
    let property = env.seed_property(landlord).await;
    let lease = env
        .seed_lease(&property, tenant, lease::Status::Active)
        .await;

    // Warm all three cache entries.
    let _ = env.dashboard(landlord).await;
    let _ = env.dashboard(tenant).await;
    let _ = env.dashboard(bystander).await;
    assert!(env.cached(landlord).await.is_some());
    assert!(env.cached(tenant).await.is_some());
    assert!(env.cached(bystander).await.is_some());

    let payment = env
        .service
        .execute(command::RecordPayment {
            principal: tenant,
            lease_id: lease.id,
            amount: money("100"),
            payment_date: DateTime::now().coerce(),
            due_date: DateTime::now().coerce(),
            status: payment::Status::Paid,
            method: Some(payment::Method::Card),
        })
        .await
        .unwrap();

    // Both parties lost their entries; the bystander kept theirs.
    assert!(env.cached(landlord).await.is_none());
    assert!(env.cached(tenant).await.is_none());
    assert!(env.cached(bystander).await.is_some());

    let landlord_dashboard = env.dashboard(landlord).await;
    let tenant_dashboard = env.dashboard(tenant).await;
    assert!(landlord_dashboard
        .payments
        .iter()
        .any(|p| p.id == payment.id));
    assert!(tenant_dashboard.payments.iter().any(|p| p.id == payment.id));
    assert_eq!(
        landlord_dashboard.stats.total_payments_this_month,
        Decimal::from(100),
    );
}

#[tokio::test]
async fn cached_dashboard_is_served_verbatim() {
    let env = env();
    let landlord = env.seed_user(user::Role::Landlord).await;
    let _property = env.seed_property(landlord).await;

    let first = env.dashboard(landlord).await;
    let second = env.dashboard(landlord).await;

    // The second read is a cache hit deserialized from bytes, stats
    // included.
    assert_eq!(first, second);
}

#[tokio::test]
async fn aggregate_round_trips_through_its_cached_form() {
    let env = env();
    let landlord = env.seed_user(user::Role::Landlord).await;
    let tenant = env.seed_user(user::Role::Tenant).await;
    let property = env.seed_property(landlord).await;
    let lease = env
        .seed_lease(&property, tenant, lease::Status::Active)
        .await;
    env.store
        .execute(Insert(Payment {
            id: payment::Id::new(),
            lease_id: lease.id,
            landlord_id: landlord.id,
            tenant_id: tenant.id,
            amount: money("421.50"),
            payment_date: DateTime::now().coerce(),
            due_date: DateTime::now().coerce(),
            status: payment::Status::Paid,
            method: Some(payment::Method::BankTransfer),
        created_at: DateTime::now().coerce(),
        }))
        .await
        .unwrap();

    let aggregate = env.dashboard(landlord).await;

    let restored = read::dashboard::Aggregate::from_cached(
        &aggregate.to_cached().unwrap(),
    )
    .unwrap();
    assert_eq!(restored, aggregate);
}

#[tokio::test(start_paused = true)]
async fn expired_cache_entry_forces_a_rebuild() {
    let env = env();
    let landlord = env.seed_user(user::Role::Landlord).await;
    let tenant = env.seed_user(user::Role::Tenant).await;
    let property = env.seed_property(landlord).await;
    let lease = env
        .seed_lease(&property, tenant, lease::Status::Active)
        .await;

    let stale = env.dashboard(landlord).await;
    assert!(stale.payments.is_empty());

    // A write bypassing the invalidation coordinator: only the TTL can
    // flush it out.
    env.store
        .execute(Insert(Payment {
            id: payment::Id::new(),
            lease_id: lease.id,
            landlord_id: landlord.id,
            tenant_id: tenant.id,
            amount: money("100"),
            payment_date: DateTime::now().coerce(),
            due_date: DateTime::now().coerce(),
            status: payment::Status::Pending,
            method: None,
            created_at: DateTime::now().coerce(),
        }))
        .await
        .unwrap();

    // Within the TTL the stale aggregate is still served.
    assert!(env.dashboard(landlord).await.payments.is_empty());

    tokio::time::advance(Duration::from_secs(301)).await;

    assert!(env.cached(landlord).await.is_none());
    let fresh = env.dashboard(landlord).await;
    assert_eq!(fresh.payments.len(), 1);
    assert_eq!(fresh.stats.pending_payments, 1);
}

#[tokio::test]
async fn refresh_with_cold_cache_is_a_no_op() {
    let env = env();
    let landlord = env.seed_user(user::Role::Landlord).await;

    env.service
        .execute(command::RefreshDashboard {
            principal: landlord,
        })
        .await
        .unwrap();
    env.service
        .execute(command::RefreshDashboard {
            principal: landlord,
        })
        .await
        .unwrap();

    assert!(env.cached(landlord).await.is_none());
}

#[tokio::test]
async fn refresh_drops_only_the_callers_entry() {
    let env = env();
    let landlord = env.seed_user(user::Role::Landlord).await;
    let other = env.seed_user(user::Role::Landlord).await;

    let _ = env.dashboard(landlord).await;
    let _ = env.dashboard(other).await;

    env.service
        .execute(command::RefreshDashboard {
            principal: landlord,
        })
        .await
        .unwrap();

    assert!(env.cached(landlord).await.is_none());
    assert!(env.cached(other).await.is_some());
}

#[tokio::test]
async fn maintenance_flow_keeps_both_dashboards_coherent() {
    let env = env();
    let landlord = env.seed_user(user::Role::Landlord).await;
    let tenant = env.seed_user(user::Role::Tenant).await;
    let property = env.seed_property(landlord).await;
    let _lease = env
        .seed_lease(&property, tenant, lease::Status::Active)
        .await;

    let request = env
        .service
        .execute(command::CreateMaintenanceRequest {
            principal: tenant,
            property_id: property.id,
            title: "Leaking faucet".into(),
            description: "Kitchen sink drips overnight".into(),
            priority: maintenance::Priority::Medium,
        })
        .await
        .unwrap();
    assert_eq!(request.tenant_id, Some(tenant.id));
    assert_eq!(request.landlord_id, landlord.id);

    assert_eq!(env.dashboard(landlord).await.stats.pending_maintenance, 1);
    assert_eq!(env.dashboard(tenant).await.stats.pending_maintenance, 1);

    let _updated = env
        .service
        .execute(command::UpdateMaintenanceRequest {
            principal: landlord,
            id: request.id,
            title: None,
            description: None,
            priority: None,
            status: Some(maintenance::Status::Completed),
        })
        .await
        .unwrap();

    // The update invalidated both cached entries.
    assert!(env.cached(landlord).await.is_none());
    assert!(env.cached(tenant).await.is_none());
    assert_eq!(env.dashboard(landlord).await.stats.pending_maintenance, 0);
    assert_eq!(env.dashboard(tenant).await.stats.pending_maintenance, 0);
}

#[tokio::test]
async fn lease_handover_invalidates_old_and_new_tenant() {
    let env = env();
    let landlord = env.seed_user(user::Role::Landlord).await;
    let old_tenant = env.seed_user(user::Role::Tenant).await;
    let new_tenant = env.seed_user(user::Role::Tenant).await;
    let property = env.seed_property(landlord).await;
    let lease = env
        .seed_lease(&property, old_tenant, lease::Status::Active)
        .await;

    let _ = env.dashboard(old_tenant).await;
    let _ = env.dashboard(new_tenant).await;

    let _updated = env
        .service
        .execute(command::UpdateLease {
            principal: landlord,
            id: lease.id,
            tenant_id: Some(new_tenant.id),
            start_date: None,
            end_date: None,
            monthly_rent: None,
            security_deposit: None,
            status: None,
        })
        .await
        .unwrap();

    assert!(env.cached(old_tenant).await.is_none());
    assert!(env.cached(new_tenant).await.is_none());

    assert!(env.dashboard(old_tenant).await.leases.is_empty());
    assert_eq!(env.dashboard(new_tenant).await.leases.len(), 1);
}

#[tokio::test]
async fn document_upload_invalidates_the_uploader_only() {
    let env = env();
    let landlord = env.seed_user(user::Role::Landlord).await;
    let tenant = env.seed_user(user::Role::Tenant).await;
    let property = env.seed_property(landlord).await;
    let lease = env
        .seed_lease(&property, tenant, lease::Status::Active)
        .await;

    let _ = env.dashboard(landlord).await;
    let _ = env.dashboard(tenant).await;

    let _document = env
        .service
        .execute(command::UploadDocument {
            principal: landlord,
            property_id: Some(property.id),
            lease_id: Some(lease.id),
            file_name: "lease.pdf".into(),
            file_path: "documents/lease.pdf".into(),
            file_size: Some(1024),
            mime_type: Some("application/pdf".into()),
        })
        .await
        .unwrap();

    // Deliberately narrow: the tenant's entry survives until its TTL even
    // though the document is visible through their lease.
    assert!(env.cached(landlord).await.is_none());
    assert!(env.cached(tenant).await.is_some());
}

#[tokio::test]
async fn foreign_property_update_is_rejected() {
    let env = env();
    let landlord = env.seed_user(user::Role::Landlord).await;
    let intruder = env.seed_user(user::Role::Landlord).await;
    let property = env.seed_property(landlord).await;

    let result = env
        .service
        .execute(command::UpdateProperty {
            principal: intruder,
            id: property.id,
            address: Some("1 Evil Rd".into()),
            city: None,
            state: None,
            zip_code: None,
            unit_number: None,
            kind: None,
            bedrooms: None,
            bathrooms: None,
            square_feet: None,
            description: None,
        })
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn unread_stat_counts_the_capped_window_only() {
    let env = env();
    let landlord = env.seed_user(user::Role::Landlord).await;

    for i in 0..60 {
        env.store
            .execute(Insert(Notification {
                id: notification::Id::new(),
                user_id: landlord.id,
                title: "Rent received".into(),
                message: format!("Payment #{i} arrived").into(),
                kind: notification::Kind::Payment,
                read: false,
                created_at: DateTime::from_unix_timestamp(i).unwrap().coerce(),
            }))
            .await
            .unwrap();
    }

    let dashboard = env.dashboard(landlord).await;

    assert_eq!(
        dashboard.notifications.len(),
        read::dashboard::NOTIFICATIONS_LIMIT,
    );
    assert_eq!(dashboard.stats.unread_notifications, 50);
}

#[tokio::test]
async fn marking_all_notifications_read_resets_the_stat() {
    let env = env();
    let tenant = env.seed_user(user::Role::Tenant).await;

    for i in 0..3 {
        env.store
            .execute(Insert(Notification {
                id: notification::Id::new(),
                user_id: tenant.id,
                title: "Reminder".into(),
                message: format!("Rent due in {i} days").into(),
                kind: notification::Kind::Payment,
                read: false,
                created_at: DateTime::from_unix_timestamp(i).unwrap().coerce(),
            }))
            .await
            .unwrap();
    }
    assert_eq!(env.dashboard(tenant).await.stats.unread_notifications, 3);

    let marked = env
        .service
        .execute(command::MarkAllNotificationsRead { principal: tenant })
        .await
        .unwrap();
    assert_eq!(marked, 3);

    assert!(env.cached(tenant).await.is_none());
    assert_eq!(env.dashboard(tenant).await.stats.unread_notifications, 0);
}
