//! Domain definitions.

pub mod document;
pub mod lease;
pub mod maintenance;
pub mod notification;
pub mod payment;
pub mod property;
pub mod user;

pub use self::{
    document::Document, lease::Lease, notification::Notification,
    payment::Payment, property::Property, user::Principal, user::User,
};
