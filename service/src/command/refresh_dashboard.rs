//! [`Command`] for refreshing a user's cached dashboard.

use std::convert::Infallible;

use common::operations::Evict;
use tracerr::Traced;

use crate::{
    domain::user::Principal,
    infra::{cache, Cache},
    invalidate::Invalidation,
    Service,
};

use super::Command;

/// [`Command`] unconditionally dropping the caller's cached dashboard, so
/// the next read rebuilds it from the store.
///
/// Read-free, and always succeeds for an authenticated caller: a failing
/// cache backend is only logged.
#[derive(Clone, Copy, Debug)]
pub struct RefreshDashboard {
    /// [`Principal`] performing this [`Command`].
    pub principal: Principal,
}

impl<Db, Cs> Command<RefreshDashboard> for Service<Db, Cs>
where
    Cs: Cache<Evict<cache::KeyPrefix>, Ok = u64, Err = Traced<cache::Error>>,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        cmd: RefreshDashboard,
    ) -> Result<Self::Ok, Self::Err> {
        let RefreshDashboard { principal } = cmd;

        self.invalidate_dashboards(Invalidation::of_actor(principal.id))
            .await;

        Ok(())
    }
}
