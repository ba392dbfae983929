//! [`Document`] endpoints.

use axum::{extract::Path, Extension, Json};
use serde::Deserialize;
use service::{
    command,
    domain::{document, lease, property, Document},
    query, scope, Command as _, Query as _,
};

use crate::{define_error, error::AsError, Auth, Error, Service};

/// `GET /documents` responder.
///
/// # Errors
///
/// If the caller's role has no document scope, or the store fails.
pub async fn list(
    Extension(service): Extension<Service>,
    Auth(principal): Auth,
) -> Result<Json<Vec<Document>>, Error> {
    let scope = scope::documents(&principal).map_err(AsError::into_error)?;
    service
        .execute(query::documents::List::by(scope))
        .await
        .map(Json)
        .map_err(AsError::into_error)
}

/// Request body of `POST /documents`.
///
/// The file contents are uploaded to the blob storage separately; this only
/// registers the metadata.
#[derive(Debug, Deserialize)]
pub struct CreateDocument {
    /// ID of the property to attach the document to.
    #[serde(default)]
    pub property_id: Option<property::Id>,

    /// ID of the lease to attach the document to.
    #[serde(default)]
    pub lease_id: Option<lease::Id>,

    /// Original file name.
    pub file_name: document::FileName,

    /// Location in the blob storage.
    pub file_path: document::FilePath,

    /// Size in bytes.
    #[serde(default)]
    pub file_size: Option<u64>,

    /// MIME type.
    #[serde(default)]
    pub mime_type: Option<document::MimeType>,
}

/// `POST /documents` responder.
///
/// # Errors
///
/// If the caller's role cannot upload documents, or the store fails.
pub async fn create(
    Extension(service): Extension<Service>,
    Auth(principal): Auth,
    Json(body): Json<CreateDocument>,
) -> Result<(http::StatusCode, Json<Document>), Error> {
    let CreateDocument {
        property_id,
        lease_id,
        file_name,
        file_path,
        file_size,
        mime_type,
    } = body;

    service
        .execute(command::UploadDocument {
            principal,
            property_id,
            lease_id,
            file_name,
            file_path,
            file_size,
            mime_type,
        })
        .await
        .map(|d| (http::StatusCode::CREATED, Json(d)))
        .map_err(AsError::into_error)
}

/// `DELETE /documents/:id` responder.
///
/// # Errors
///
/// If the [`Document`] is absent, or was uploaded by another user.
pub async fn remove(
    Extension(service): Extension<Service>,
    Auth(principal): Auth,
    Path(id): Path<document::Id>,
) -> Result<http::StatusCode, Error> {
    service
        .execute(command::DeleteDocument { principal, id })
        .await
        .map(|()| http::StatusCode::NO_CONTENT)
        .map_err(AsError::into_error)
}

impl AsError for command::upload_document::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UnauthorizedRole(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::delete_document::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::DocumentNotExists(_) => Some(DocumentError::NotFound.into()),
            Self::NotUploader(_) => Some(DocumentError::AccessDenied.into()),
        }
    }
}

define_error! {
    enum DocumentError {
        #[code = "DOCUMENT_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Document not found"]
        NotFound,

        #[code = "ACCESS_DENIED"]
        #[status = FORBIDDEN]
        #[message = "Access denied"]
        AccessDenied,
    }
}
