//! Infrastructure layer.

pub mod cache;
pub mod database;

pub use self::{
    cache::{Cache, Memory},
    database::Database,
};
#[cfg(feature = "postgres")]
pub use self::database::{postgres, Postgres};
