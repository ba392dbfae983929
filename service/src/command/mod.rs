//! [`Command`] definition.

pub mod create_lease;
pub mod create_maintenance_request;
pub mod create_property;
pub mod delete_document;
pub mod delete_lease;
pub mod delete_property;
pub mod mark_all_notifications_read;
pub mod mark_notification_read;
pub mod record_payment;
pub mod refresh_dashboard;
pub mod update_lease;
pub mod update_maintenance_request;
pub mod update_payment;
pub mod update_property;
pub mod upload_document;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_lease::CreateLease,
    create_maintenance_request::CreateMaintenanceRequest,
    create_property::CreateProperty, delete_document::DeleteDocument,
    delete_lease::DeleteLease, delete_property::DeleteProperty,
    mark_all_notifications_read::MarkAllNotificationsRead,
    mark_notification_read::MarkNotificationRead,
    record_payment::RecordPayment, refresh_dashboard::RefreshDashboard,
    update_lease::UpdateLease,
    update_maintenance_request::UpdateMaintenanceRequest,
    update_payment::UpdatePayment, update_property::UpdateProperty,
    upload_document::UploadDocument,
};
