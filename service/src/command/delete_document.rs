//! [`Command`] for deleting a [`Document`].

use common::operations::{By, Delete, Evict, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{document, user::Principal, Document},
    infra::{cache, database, Cache, Database},
    invalidate::Invalidation,
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Document`]'s metadata.
///
/// Removal of the blob itself is the storage collaborator's concern.
#[derive(Clone, Copy, Debug)]
pub struct DeleteDocument {
    /// [`Principal`] performing this [`Command`].
    pub principal: Principal,

    /// ID of the [`Document`] to delete.
    pub id: document::Id,
}

impl<Db, Cs> Command<DeleteDocument> for Service<Db, Cs>
where
    Db: Database<
            Select<By<Option<Document>, document::Id>>,
            Ok = Option<Document>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Document, document::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        >,
    Cs: Cache<Evict<cache::KeyPrefix>, Ok = u64, Err = Traced<cache::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteDocument,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteDocument { principal, id } = cmd;

        let document = self
            .database()
            .execute(Select(By::<Option<Document>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::DocumentNotExists(id))
            .map_err(tracerr::wrap!())?;

        if document.uploaded_by != principal.id {
            return Err(tracerr::new!(E::NotUploader(id)));
        }

        self.database()
            .execute(Delete(By::<Document, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.invalidate_dashboards(Invalidation::of_deleted(&document))
            .await;

        Ok(())
    }
}

/// Error of [`DeleteDocument`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Document`] doesn't exist.
    #[display("`Document(id: {_0})` does not exist")]
    #[from(ignore)]
    DocumentNotExists(#[error(not(source))] document::Id),

    /// Performing [`Principal`] didn't upload the [`Document`].
    #[display("`Document(id: {_0})` was uploaded by another user")]
    #[from(ignore)]
    NotUploader(#[error(not(source))] document::Id),
}
