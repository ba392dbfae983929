//! Access scoping of entity reads.
//!
//! Every read of an owned entity kind goes through a predicate produced
//! here, so the rule "who may see which rows" exists in exactly one place.
//! Resolution is a pure function of the [`Principal`] and the entity kind:
//! identical inputs always produce the identical predicate, which lets tests
//! assert on the predicate itself instead of on live data.

use derive_more::{Display, Error};

use crate::domain::user::{self, Principal, Role};
#[cfg(doc)]
use crate::domain::{
    Document, Lease, Notification, Payment, Property, User,
    maintenance::Request,
};

/// Entity kinds subject to access scoping.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntityKind {
    /// [`Property`] entities.
    Property,

    /// [`Lease`] entities.
    Lease,

    /// Maintenance [`Request`] entities.
    MaintenanceRequest,

    /// [`Payment`] entities.
    Payment,

    /// [`Document`] entities.
    Document,

    /// [`Notification`] entities.
    Notification,
}

/// Row filter of [`Property`] reads.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Properties {
    /// Properties owned by the given landlord.
    OwnedBy(user::Id),

    /// Properties reachable through any [`Lease`] held by the given tenant,
    /// without duplicates (multiple leases over one property yield one row).
    LeasedBy(user::Id),
}

/// Row filter of [`Lease`] reads.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Leases {
    /// Leases granted by the given landlord.
    GrantedBy(user::Id),

    /// Leases held by the given tenant.
    HeldBy(user::Id),
}

/// Row filter of maintenance [`Request`] reads.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MaintenanceRequests {
    /// Requests against properties of the given landlord.
    ManagedBy(user::Id),

    /// Requests reported by the given tenant.
    ReportedBy(user::Id),
}

/// Row filter of [`Payment`] reads.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Payments {
    /// Payments collected by the given landlord.
    CollectedBy(user::Id),

    /// Payments owed by the given tenant.
    OwedBy(user::Id),
}

/// Row filter of [`Document`] reads.
///
/// Documents are reached through the property or lease they're attached to,
/// never through their uploader.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Documents {
    /// Documents attached to properties owned by the given landlord.
    OnPropertiesOwnedBy(user::Id),

    /// Documents attached to leases held by the given tenant.
    OnLeasesHeldBy(user::Id),
}

/// Row filter of [`Notification`] reads.
///
/// Notifications are addressed to a single [`User`], so both roles resolve
/// to the same filter.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Notifications {
    /// Notifications addressed to the given user.
    AddressedTo(user::Id),
}

/// Union of all the per-kind row filters, as resolved for one
/// [`EntityKind`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Predicate {
    /// [`Property`] filter.
    Properties(Properties),

    /// [`Lease`] filter.
    Leases(Leases),

    /// Maintenance [`Request`] filter.
    MaintenanceRequests(MaintenanceRequests),

    /// [`Payment`] filter.
    Payments(Payments),

    /// [`Document`] filter.
    Documents(Documents),

    /// [`Notification`] filter.
    Notifications(Notifications),
}

/// Resolves the row filter the given [`Principal`] reads the given
/// [`EntityKind`] through.
///
/// # Errors
///
/// With [`UnauthorizedRole`] if the [`Principal`]'s [`Role`] has no dashboard
/// access. No fallback to an unscoped (all rows) filter exists.
pub fn scope_query(
    principal: &Principal,
    kind: EntityKind,
) -> Result<Predicate, UnauthorizedRole> {
    Ok(match kind {
        EntityKind::Property => Predicate::Properties(properties(principal)?),
        EntityKind::Lease => Predicate::Leases(leases(principal)?),
        EntityKind::MaintenanceRequest => {
            Predicate::MaintenanceRequests(maintenance_requests(principal)?)
        }
        EntityKind::Payment => Predicate::Payments(payments(principal)?),
        EntityKind::Document => Predicate::Documents(documents(principal)?),
        EntityKind::Notification => {
            Predicate::Notifications(notifications(principal)?)
        }
    })
}

/// Resolves the [`Properties`] filter of the given [`Principal`].
///
/// # Errors
///
/// With [`UnauthorizedRole`] if the [`Principal`] has no dashboard access.
pub fn properties(
    principal: &Principal,
) -> Result<Properties, UnauthorizedRole> {
    match principal.role {
        Role::Landlord => Ok(Properties::OwnedBy(principal.id)),
        Role::Tenant => Ok(Properties::LeasedBy(principal.id)),
        Role::Contractor => Err(UnauthorizedRole(principal.role)),
    }
}

/// Resolves the [`Leases`] filter of the given [`Principal`].
///
/// # Errors
///
/// With [`UnauthorizedRole`] if the [`Principal`] has no dashboard access.
pub fn leases(principal: &Principal) -> Result<Leases, UnauthorizedRole> {
    match principal.role {
        Role::Landlord => Ok(Leases::GrantedBy(principal.id)),
        Role::Tenant => Ok(Leases::HeldBy(principal.id)),
        Role::Contractor => Err(UnauthorizedRole(principal.role)),
    }
}

/// Resolves the [`MaintenanceRequests`] filter of the given [`Principal`].
///
/// # Errors
///
/// With [`UnauthorizedRole`] if the [`Principal`] has no dashboard access.
pub fn maintenance_requests(
    principal: &Principal,
) -> Result<MaintenanceRequests, UnauthorizedRole> {
    match principal.role {
        Role::Landlord => Ok(MaintenanceRequests::ManagedBy(principal.id)),
        Role::Tenant => Ok(MaintenanceRequests::ReportedBy(principal.id)),
        Role::Contractor => Err(UnauthorizedRole(principal.role)),
    }
}

/// Resolves the [`Payments`] filter of the given [`Principal`].
///
/// # Errors
///
/// With [`UnauthorizedRole`] if the [`Principal`] has no dashboard access.
pub fn payments(principal: &Principal) -> Result<Payments, UnauthorizedRole> {
    match principal.role {
        Role::Landlord => Ok(Payments::CollectedBy(principal.id)),
        Role::Tenant => Ok(Payments::OwedBy(principal.id)),
        Role::Contractor => Err(UnauthorizedRole(principal.role)),
    }
}

/// Resolves the [`Documents`] filter of the given [`Principal`].
///
/// # Errors
///
/// With [`UnauthorizedRole`] if the [`Principal`] has no dashboard access.
pub fn documents(
    principal: &Principal,
) -> Result<Documents, UnauthorizedRole> {
    match principal.role {
        Role::Landlord => Ok(Documents::OnPropertiesOwnedBy(principal.id)),
        Role::Tenant => Ok(Documents::OnLeasesHeldBy(principal.id)),
        Role::Contractor => Err(UnauthorizedRole(principal.role)),
    }
}

/// Resolves the [`Notifications`] filter of the given [`Principal`].
///
/// # Errors
///
/// With [`UnauthorizedRole`] if the [`Principal`] has no dashboard access.
pub fn notifications(
    principal: &Principal,
) -> Result<Notifications, UnauthorizedRole> {
    match principal.role {
        Role::Landlord | Role::Tenant => {
            Ok(Notifications::AddressedTo(principal.id))
        }
        Role::Contractor => Err(UnauthorizedRole(principal.role)),
    }
}

/// [`Role`] having no dashboard access.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("`{_0}` role has no dashboard access")]
pub struct UnauthorizedRole(#[error(not(source))] pub Role);

#[cfg(test)]
mod spec {
    use crate::domain::user::{self, Principal, Role};

    use super::{
        scope_query, Documents, EntityKind, Leases, MaintenanceRequests,
        Notifications, Payments, Predicate, Properties,
    };

    fn landlord() -> Principal {
        Principal {
            id: user::Id::new(),
            role: Role::Landlord,
        }
    }

    fn tenant() -> Principal {
        Principal {
            id: user::Id::new(),
            role: Role::Tenant,
        }
    }

    #[test]
    fn landlord_scopes_by_ownership() {
        let p = landlord();

        assert_eq!(
            scope_query(&p, EntityKind::Property).unwrap(),
            Predicate::Properties(Properties::OwnedBy(p.id)),
        );
        assert_eq!(
            scope_query(&p, EntityKind::Lease).unwrap(),
            Predicate::Leases(Leases::GrantedBy(p.id)),
        );
        assert_eq!(
            scope_query(&p, EntityKind::MaintenanceRequest).unwrap(),
            Predicate::MaintenanceRequests(MaintenanceRequests::ManagedBy(
                p.id,
            )),
        );
        assert_eq!(
            scope_query(&p, EntityKind::Payment).unwrap(),
            Predicate::Payments(Payments::CollectedBy(p.id)),
        );
        assert_eq!(
            scope_query(&p, EntityKind::Document).unwrap(),
            Predicate::Documents(Documents::OnPropertiesOwnedBy(p.id)),
        );
    }

    #[test]
    fn tenant_scopes_through_leases() {
        let p = tenant();

        assert_eq!(
            scope_query(&p, EntityKind::Property).unwrap(),
            Predicate::Properties(Properties::LeasedBy(p.id)),
        );
        assert_eq!(
            scope_query(&p, EntityKind::Lease).unwrap(),
            Predicate::Leases(Leases::HeldBy(p.id)),
        );
        assert_eq!(
            scope_query(&p, EntityKind::Document).unwrap(),
            Predicate::Documents(Documents::OnLeasesHeldBy(p.id)),
        );
    }

    #[test]
    fn notifications_scope_ignores_role() {
        let l = landlord();
        let t = tenant();

        assert_eq!(
            scope_query(&l, EntityKind::Notification).unwrap(),
            Predicate::Notifications(Notifications::AddressedTo(l.id)),
        );
        assert_eq!(
            scope_query(&t, EntityKind::Notification).unwrap(),
            Predicate::Notifications(Notifications::AddressedTo(t.id)),
        );
    }

    #[test]
    fn unrecognized_role_is_rejected_for_every_kind() {
        let p = Principal {
            id: user::Id::new(),
            role: Role::Contractor,
        };

        for kind in [
            EntityKind::Property,
            EntityKind::Lease,
            EntityKind::MaintenanceRequest,
            EntityKind::Payment,
            EntityKind::Document,
            EntityKind::Notification,
        ] {
            assert!(scope_query(&p, kind).is_err());
        }
    }

    #[test]
    fn resolution_is_deterministic() {
        let p = landlord();

        assert_eq!(
            scope_query(&p, EntityKind::Payment).unwrap(),
            scope_query(&p, EntityKind::Payment).unwrap(),
        );
    }
}
