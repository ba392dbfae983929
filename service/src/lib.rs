//! Service contains the business logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod invalidate;
pub mod query;
pub mod read;
pub mod scope;
pub mod task;

use std::{error::Error, time};

use common::operations::{By, Start};

#[cfg(doc)]
use self::{infra::Cache, read::dashboard::Aggregate};

pub use self::{command::Command, query::Query, task::Task};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Time a cached dashboard [`Aggregate`] stays served before a rebuild.
    pub dashboard_cache_ttl: time::Duration,

    /// [`task::SweepDashboardCache`] configuration.
    pub sweep_dashboard_cache: task::sweep_dashboard_cache::Config,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dashboard_cache_ttl: time::Duration::from_secs(300),
            sweep_dashboard_cache: task::sweep_dashboard_cache::Config {
                interval: time::Duration::from_secs(60),
            },
        }
    }
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db, Cs> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    ///
    /// [`Database`]: infra::Database
    database: Db,

    /// [`Cache`] of this [`Service`].
    cache: Cs,
}

impl<Db, Cs> Service<Db, Cs> {
    /// Creates a new [`Service`] with the provided parameters, along with
    /// the [`task::Background`] environment running its
    /// [`task::SweepDashboardCache`].
    pub fn new(
        config: Config,
        database: Db,
        cache: Cs,
    ) -> (Self, task::Background)
    where
        Self: Task<
                Start<
                    By<
                        task::SweepDashboardCache<Self>,
                        task::sweep_dashboard_cache::Config,
                    >,
                >,
                Ok = (),
                Err: Error,
            > + Clone
            + 'static,
    {
        let this = Service {
            config,
            database,
            cache,
        };

        let mut bg = task::Background::default();
        let svc = this.clone();
        bg.spawn(async move {
            svc.execute(Start(By::new(svc.config().sweep_dashboard_cache)))
                .await
        });

        (this, bg)
    }

    /// Returns [`Config`] of this [`Service`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the database of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }

    /// Returns the cache of this [`Service`].
    #[must_use]
    pub fn cache(&self) -> &Cs {
        &self.cache
    }
}
