//! [`Command`] for updating a maintenance [`Request`].

use common::operations::{By, Evict, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        maintenance::{self, Request},
        user::{Principal, Role},
    },
    infra::{cache, database, Cache, Database},
    invalidate::Invalidation,
    Service,
};

use super::Command;

/// [`Command`] for updating a maintenance [`Request`].
///
/// Only the fields provided as [`Some`] are rewritten. Allowed to the
/// responsible landlord and to the reporting tenant.
#[derive(Clone, Debug)]
pub struct UpdateMaintenanceRequest {
    /// [`Principal`] performing this [`Command`].
    pub principal: Principal,

    /// ID of the [`Request`] to update.
    pub id: maintenance::Id,

    /// New [`Title`] of the [`Request`].
    ///
    /// [`Title`]: maintenance::Title
    pub title: Option<maintenance::Title>,

    /// New [`Description`] of the [`Request`].
    ///
    /// [`Description`]: maintenance::Description
    pub description: Option<maintenance::Description>,

    /// New [`Priority`] of the [`Request`].
    ///
    /// [`Priority`]: maintenance::Priority
    pub priority: Option<maintenance::Priority>,

    /// New [`Status`] of the [`Request`].
    ///
    /// [`Status`]: maintenance::Status
    pub status: Option<maintenance::Status>,
}

impl<Db, Cs> Command<UpdateMaintenanceRequest> for Service<Db, Cs>
where
    Db: Database<
            Select<By<Option<Request>, maintenance::Id>>,
            Ok = Option<Request>,
            Err = Traced<database::Error>,
        > + Database<Update<Request>, Ok = (), Err = Traced<database::Error>>,
    Cs: Cache<Evict<cache::KeyPrefix>, Ok = u64, Err = Traced<cache::Error>>,
{
    type Ok = Request;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateMaintenanceRequest,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateMaintenanceRequest {
            principal,
            id,
            title,
            description,
            priority,
            status,
        } = cmd;

        let before = self
            .database()
            .execute(Select(By::<Option<Request>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RequestNotExists(id))
            .map_err(tracerr::wrap!())?;

        // A landlord-initiated request has no tenant, so a tenant caller
        // can never match it.
        let is_participant = match principal.role {
            Role::Landlord => before.landlord_id == principal.id,
            Role::Tenant => before.tenant_id == Some(principal.id),
            Role::Contractor => false,
        };
        if !is_participant {
            return Err(tracerr::new!(E::NotParticipant(id)));
        }

        let mut request = before.clone();
        if let Some(title) = title {
            request.title = title;
        }
        if let Some(description) = description {
            request.description = description;
        }
        if let Some(priority) = priority {
            request.priority = priority;
        }
        if let Some(status) = status {
            request.status = status;
        }

        self.database()
            .execute(Update(request.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.invalidate_dashboards(Invalidation::of_updated(
            &before, &request,
        ))
        .await;

        Ok(request)
    }
}

/// Error of [`UpdateMaintenanceRequest`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Request`] doesn't exist.
    #[display("`maintenance::Request(id: {_0})` does not exist")]
    #[from(ignore)]
    RequestNotExists(#[error(not(source))] maintenance::Id),

    /// Performing [`Principal`] is not a party to the [`Request`].
    #[display("`maintenance::Request(id: {_0})` involves another party")]
    #[from(ignore)]
    NotParticipant(#[error(not(source))] maintenance::Id),
}
