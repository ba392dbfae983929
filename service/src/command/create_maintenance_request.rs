//! [`Command`] for creating a new maintenance [`Request`].

use common::operations::{By, Evict, Insert, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        maintenance::{self, Request},
        property,
        user::{self, Principal, Role},
        Property,
    },
    infra::{cache, database, Cache, Database},
    invalidate::Invalidation,
    read, scope, Service,
};

use super::Command;

/// [`Command`] for creating a new maintenance [`Request`] against a
/// [`Property`].
///
/// A tenant must hold an active lease on the property; a landlord must own
/// it (and the resulting [`Request`] carries no tenant).
#[derive(Clone, Debug)]
pub struct CreateMaintenanceRequest {
    /// [`Principal`] performing this [`Command`].
    pub principal: Principal,

    /// ID of the [`Property`] the [`Request`] is raised against.
    pub property_id: property::Id,

    /// [`Title`] of the new [`Request`].
    ///
    /// [`Title`]: maintenance::Title
    pub title: maintenance::Title,

    /// [`Description`] of the new [`Request`].
    ///
    /// [`Description`]: maintenance::Description
    pub description: maintenance::Description,

    /// [`Priority`] of the new [`Request`].
    ///
    /// [`Priority`]: maintenance::Priority
    pub priority: maintenance::Priority,
}

impl<Db, Cs> Command<CreateMaintenanceRequest> for Service<Db, Cs>
where
    Db: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Select<
                By<read::lease::HoldsActiveLease, (property::Id, user::Id)>,
            >,
            Ok = read::lease::HoldsActiveLease,
            Err = Traced<database::Error>,
        > + Database<Insert<Request>, Ok = (), Err = Traced<database::Error>>,
    Cs: Cache<Evict<cache::KeyPrefix>, Ok = u64, Err = Traced<cache::Error>>,
{
    type Ok = Request;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateMaintenanceRequest,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateMaintenanceRequest {
            principal,
            property_id,
            title,
            description,
            priority,
        } = cmd;

        let property = self
            .database()
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;

        let tenant_id = match principal.role {
            Role::Tenant => {
                let holds = self
                    .database()
                    .execute(Select(By::<
                        read::lease::HoldsActiveLease,
                        _,
                    >::new((
                        property_id,
                        principal.id,
                    ))))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?;
                if !*holds {
                    return Err(tracerr::new!(E::NoActiveLease(property_id)));
                }
                Some(principal.id)
            }
            Role::Landlord => {
                if property.landlord_id != principal.id {
                    return Err(tracerr::new!(E::NotOwner(property_id)));
                }
                None
            }
            Role::Contractor => {
                return Err(tracerr::new!(E::UnauthorizedRole(
                    scope::UnauthorizedRole(principal.role),
                )));
            }
        };

        let request = Request {
            id: maintenance::Id::new(),
            property_id,
            landlord_id: property.landlord_id,
            tenant_id,
            title,
            description,
            priority,
            status: maintenance::Status::Pending,
            created_at: maintenance::CreationDateTime::now(),
        };

        self.database()
            .execute(Insert(request.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.invalidate_dashboards(Invalidation::of_created(&request))
            .await;

        Ok(request)
    }
}

/// Error of [`CreateMaintenanceRequest`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Property`] doesn't exist.
    #[display("`Property(id: {_0})` does not exist")]
    #[from(ignore)]
    PropertyNotExists(#[error(not(source))] property::Id),

    /// Tenant holds no active lease on the [`Property`].
    #[display("no active lease on `Property(id: {_0})`")]
    #[from(ignore)]
    NoActiveLease(#[error(not(source))] property::Id),

    /// Performing [`Principal`] doesn't own the [`Property`].
    #[display("`Property(id: {_0})` belongs to another landlord")]
    #[from(ignore)]
    NotOwner(#[error(not(source))] property::Id),

    /// Performing [`Principal`]'s role cannot raise maintenance requests.
    #[display("{_0}")]
    UnauthorizedRole(scope::UnauthorizedRole),
}
