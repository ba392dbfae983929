//! [`Command`] for creating a new [`Lease`].

use common::{
    operations::{By, Evict, Insert, Select},
    Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        lease, notification, property, user,
        user::{Principal, Role},
        Lease, Notification, Property,
    },
    infra::{cache, database, Cache, Database},
    invalidate::Invalidation,
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Lease`] on an owned [`Property`],
/// notifying the tenant.
#[derive(Clone, Debug)]
pub struct CreateLease {
    /// [`Principal`] performing this [`Command`].
    pub principal: Principal,

    /// ID of the [`Property`] to grant the [`Lease`] over.
    pub property_id: property::Id,

    /// ID of the tenant [`User`] to hold the [`Lease`].
    ///
    /// [`User`]: crate::domain::User
    pub tenant_id: user::Id,

    /// [`DateTime`] the new [`Lease`] starts at.
    ///
    /// [`DateTime`]: common::DateTime
    pub start_date: lease::StartDateTime,

    /// [`DateTime`] the new [`Lease`] ends at.
    ///
    /// [`DateTime`]: common::DateTime
    pub end_date: lease::EndDateTime,

    /// Monthly rent due under the new [`Lease`].
    pub monthly_rent: Money,

    /// Security deposit held under the new [`Lease`].
    pub security_deposit: Option<Money>,

    /// Initial [`Status`] of the new [`Lease`].
    ///
    /// [`Status`]: lease::Status
    pub status: lease::Status,
}

impl<Db, Cs> Command<CreateLease> for Service<Db, Cs>
where
    Db: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<Insert<Lease>, Ok = (), Err = Traced<database::Error>>
        + Database<
            Insert<Notification>,
            Ok = (),
            Err = Traced<database::Error>,
        >,
    Cs: Cache<Evict<cache::KeyPrefix>, Ok = u64, Err = Traced<cache::Error>>,
{
    type Ok = Lease;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateLease) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateLease {
            principal,
            property_id,
            tenant_id,
            start_date,
            end_date,
            monthly_rent,
            security_deposit,
            status,
        } = cmd;

        if principal.role != Role::Landlord {
            return Err(tracerr::new!(E::NotLandlord(principal.role)));
        }

        let property = self
            .database()
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;

        if property.landlord_id != principal.id {
            return Err(tracerr::new!(E::NotOwner(property_id)));
        }

        let lease = Lease {
            id: lease::Id::new(),
            property_id,
            landlord_id: principal.id,
            tenant_id,
            start_date,
            end_date,
            monthly_rent,
            security_deposit,
            status,
            created_at: lease::CreationDateTime::now(),
        };

        self.database()
            .execute(Insert(lease.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let notification = Notification {
            id: notification::Id::new(),
            user_id: tenant_id,
            title: "New lease".into(),
            message: format!(
                "A lease on {} has been created for you",
                property.address,
            )
            .into(),
            kind: notification::Kind::Lease,
            read: false,
            created_at: notification::CreationDateTime::now(),
        };
        self.database()
            .execute(Insert(notification.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.invalidate_dashboards(
            Invalidation::of_created(&lease).and(&notification),
        )
        .await;

        Ok(lease)
    }
}

/// Error of [`CreateLease`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Performing [`Principal`] is not a landlord.
    #[display("`{_0}` role cannot create leases")]
    #[from(ignore)]
    NotLandlord(#[error(not(source))] Role),

    /// [`Property`] doesn't exist.
    #[display("`Property(id: {_0})` does not exist")]
    #[from(ignore)]
    PropertyNotExists(#[error(not(source))] property::Id),

    /// Performing [`Principal`] doesn't own the [`Property`].
    #[display("`Property(id: {_0})` belongs to another landlord")]
    #[from(ignore)]
    NotOwner(#[error(not(source))] property::Id),
}
