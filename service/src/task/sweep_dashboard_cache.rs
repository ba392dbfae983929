//! [`SweepDashboardCache`] [`Task`].

use std::{convert::Infallible, error::Error, time};

use common::operations::{By, Evict, Perform, Start};
use tokio::time::interval;
use tracerr::Traced;
use tracing as log;

use crate::{
    infra::{
        cache::{self, Expired},
        Cache,
    },
    Service,
};

use super::Task;

/// Configuration for [`SweepDashboardCache`] [`Task`].
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Interval between cache sweeps.
    pub interval: time::Duration,
}

/// [`Task`] reclaiming the memory of expired cache entries.
///
/// Expired entries are already invisible to readers; this only frees what
/// they keep occupied.
#[derive(Clone, Copy, Debug)]
pub struct SweepDashboardCache<S> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Service`] instance.
    service: S,
}

impl<Db, Cs> Task<Start<By<SweepDashboardCache<Self>, Config>>>
    for Service<Db, Cs>
where
    SweepDashboardCache<Service<Db, Cs>>:
        Task<Perform<()>, Ok = (), Err: Error> + Send + Sync + 'static,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<SweepDashboardCache<Self>, Config>>,
    ) -> Result<Self::Ok, Self::Err> {
        let config = by.into_inner();
        let task = SweepDashboardCache {
            config,
            service: self.clone(),
        };

        let mut interval = interval(task.config.interval);
        loop {
            let _ = interval.tick().await;
            _ = task.execute(Perform(())).await.map_err(|e| {
                log::error!("`task::SweepDashboardCache` failed: {e}");
            });
        }
    }
}

impl<Db, Cs> Task<Perform<()>> for SweepDashboardCache<Service<Db, Cs>>
where
    Cs: Cache<Evict<Expired>, Ok = u64, Err = Traced<cache::Error>>,
{
    type Ok = ();
    type Err = ExecutionError;

    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        let swept = self
            .service
            .cache()
            .execute(Evict(Expired))
            .await
            .map_err(tracerr::wrap!())?;
        if swept > 0 {
            log::debug!("swept {swept} expired dashboard cache entries");
        }
        Ok(())
    }
}

/// Error of [`SweepDashboardCache`] execution.
pub type ExecutionError = Traced<cache::Error>;
