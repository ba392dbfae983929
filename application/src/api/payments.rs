//! [`Payment`] endpoints.

use axum::{extract::Path, Extension, Json};
use common::Money;
use serde::Deserialize;
use service::{
    command,
    domain::{lease, payment, user, Payment},
    query, scope, Command as _, Query as _,
};

use crate::{define_error, error::AsError, Auth, Error, Service};

/// `GET /payments` responder.
///
/// # Errors
///
/// If the caller's role has no payment scope, or the store fails.
pub async fn list(
    Extension(service): Extension<Service>,
    Auth(principal): Auth,
) -> Result<Json<Vec<Payment>>, Error> {
    let scope = scope::payments(&principal).map_err(AsError::into_error)?;
    service
        .execute(query::payments::List::by(scope))
        .await
        .map(Json)
        .map_err(AsError::into_error)
}

/// `GET /payments/:id` responder.
///
/// # Errors
///
/// If the [`Payment`] is absent, or the caller is not a party to it.
pub async fn show(
    Extension(service): Extension<Service>,
    Auth(principal): Auth,
    Path(id): Path<payment::Id>,
) -> Result<Json<Payment>, Error> {
    let payment = service
        .execute(query::payments::ById::by(id))
        .await
        .map_err(AsError::into_error)?
        .ok_or_else(|| Error::from(PaymentError::NotFound))?;

    let allowed = match principal.role {
        user::Role::Landlord => payment.landlord_id == principal.id,
        user::Role::Tenant => payment.tenant_id == principal.id,
        user::Role::Contractor => false,
    };
    if !allowed {
        return Err(PaymentError::AccessDenied.into());
    }

    Ok(Json(payment))
}

/// Request body of `POST /payments`.
#[derive(Debug, Deserialize)]
pub struct CreatePayment {
    /// ID of the lease the payment is made under.
    pub lease_id: lease::Id,

    /// Amount of the payment.
    pub amount: Money,

    /// Settlement date of the payment.
    pub payment_date: payment::SettlementDateTime,

    /// Due date of the payment.
    pub due_date: payment::DueDateTime,

    /// Initial status.
    #[serde(default = "CreatePayment::default_status")]
    pub status: payment::Status,

    /// Method the payment is made with.
    #[serde(default)]
    pub method: Option<payment::Method>,
}

impl CreatePayment {
    /// Status a payment is recorded in unless stated otherwise.
    fn default_status() -> payment::Status {
        payment::Status::Pending
    }
}

/// `POST /payments` responder.
///
/// # Errors
///
/// If the lease is absent, or the caller is not a party to it.
pub async fn create(
    Extension(service): Extension<Service>,
    Auth(principal): Auth,
    Json(body): Json<CreatePayment>,
) -> Result<(http::StatusCode, Json<Payment>), Error> {
    let CreatePayment {
        lease_id,
        amount,
        payment_date,
        due_date,
        status,
        method,
    } = body;

    service
        .execute(command::RecordPayment {
            principal,
            lease_id,
            amount,
            payment_date,
            due_date,
            status,
            method,
        })
        .await
        .map(|p| (http::StatusCode::CREATED, Json(p)))
        .map_err(AsError::into_error)
}

/// Request body of `PUT /payments/:id`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdatePayment {
    /// New amount.
    pub amount: Option<Money>,

    /// New settlement date.
    pub payment_date: Option<payment::SettlementDateTime>,

    /// New due date.
    pub due_date: Option<payment::DueDateTime>,

    /// New status.
    pub status: Option<payment::Status>,

    /// New method.
    pub method: Option<payment::Method>,
}

/// `PUT /payments/:id` responder.
///
/// # Errors
///
/// If the [`Payment`] is absent, or the caller is not a party to it.
pub async fn update(
    Extension(service): Extension<Service>,
    Auth(principal): Auth,
    Path(id): Path<payment::Id>,
    Json(body): Json<UpdatePayment>,
) -> Result<Json<Payment>, Error> {
    let UpdatePayment {
        amount,
        payment_date,
        due_date,
        status,
        method,
    } = body;

    service
        .execute(command::UpdatePayment {
            principal,
            id,
            amount,
            payment_date,
            due_date,
            status,
            method,
        })
        .await
        .map(Json)
        .map_err(AsError::into_error)
}

impl AsError for command::record_payment::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::LeaseNotExists(_) => Some(PaymentError::LeaseNotFound.into()),
            Self::NotParticipant(_) => Some(PaymentError::AccessDenied.into()),
        }
    }
}

impl AsError for command::update_payment::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PaymentNotExists(_) => Some(PaymentError::NotFound.into()),
            Self::NotParticipant(_) => Some(PaymentError::AccessDenied.into()),
        }
    }
}

define_error! {
    enum PaymentError {
        #[code = "PAYMENT_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Payment not found"]
        NotFound,

        #[code = "LEASE_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Lease not found"]
        LeaseNotFound,

        #[code = "ACCESS_DENIED"]
        #[status = FORBIDDEN]
        #[message = "Access denied"]
        AccessDenied,
    }
}
