//! [`Command`] for registering an uploaded [`Document`].

use common::operations::{Evict, Insert};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        document, lease, property,
        user::{Principal, Role},
        Document,
    },
    infra::{cache, database, Cache, Database},
    invalidate::Invalidation,
    scope, Service,
};

use super::Command;

/// [`Command`] for registering an uploaded [`Document`].
///
/// The file itself is already placed into the blob storage by the transport
/// layer; this records its metadata and attachment points.
#[derive(Clone, Debug)]
pub struct UploadDocument {
    /// [`Principal`] performing this [`Command`].
    pub principal: Principal,

    /// ID of the [`Property`] to attach the [`Document`] to.
    ///
    /// [`Property`]: crate::domain::Property
    pub property_id: Option<property::Id>,

    /// ID of the [`Lease`] to attach the [`Document`] to.
    ///
    /// [`Lease`]: crate::domain::Lease
    pub lease_id: Option<lease::Id>,

    /// Original [`FileName`] of the [`Document`].
    ///
    /// [`FileName`]: document::FileName
    pub file_name: document::FileName,

    /// [`FilePath`] of the [`Document`] in the blob storage.
    ///
    /// [`FilePath`]: document::FilePath
    pub file_path: document::FilePath,

    /// Size of the [`Document`] in bytes.
    pub file_size: Option<u64>,

    /// MIME type of the [`Document`].
    pub mime_type: Option<document::MimeType>,
}

impl<Db, Cs> Command<UploadDocument> for Service<Db, Cs>
where
    Db: Database<Insert<Document>, Ok = (), Err = Traced<database::Error>>,
    Cs: Cache<Evict<cache::KeyPrefix>, Ok = u64, Err = Traced<cache::Error>>,
{
    type Ok = Document;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UploadDocument,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UploadDocument {
            principal,
            property_id,
            lease_id,
            file_name,
            file_path,
            file_size,
            mime_type,
        } = cmd;

        if let Role::Contractor = principal.role {
            return Err(tracerr::new!(E::UnauthorizedRole(
                scope::UnauthorizedRole(principal.role),
            )));
        }

        let document = Document {
            id: document::Id::new(),
            property_id,
            lease_id,
            uploaded_by: principal.id,
            file_name,
            file_path,
            file_size,
            mime_type,
            created_at: document::CreationDateTime::now(),
        };

        self.database()
            .execute(Insert(document.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.invalidate_dashboards(Invalidation::of_created(&document))
            .await;

        Ok(document)
    }
}

/// Error of [`UploadDocument`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Performing [`Principal`]'s role cannot upload documents.
    #[display("{_0}")]
    UnauthorizedRole(scope::UnauthorizedRole),
}
