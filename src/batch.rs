//! Rate-limited batch creation.
//!
//! [`create_all`] walks the batch strictly in order, waiting on a [`Pacer`]
//! grant before each remote call. Per-item failures are recorded on the
//! matching result and never abort the batch.

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use tracing::{debug, warn};

use crate::model::{SecretCreationResult, SecretDefinition};
use crate::store::SecretStore;

/// Create operations allowed per second when no rate is configured.
pub const DEFAULT_OPS_PER_SEC: u32 = 50;

/// Spaces grants evenly at `1/rate` seconds apart.
///
/// Burst depth is pinned to one, so the limiter never hands out a backlog of
/// grants after an idle stretch.
pub struct Pacer {
    limiter: DefaultDirectRateLimiter,
}

impl Pacer {
    pub fn new(ops_per_sec: u32) -> Self {
        let rate = NonZeroU32::new(ops_per_sec)
            .unwrap_or(NonZeroU32::new(DEFAULT_OPS_PER_SEC).unwrap());
        let quota = Quota::per_second(rate).allow_burst(NonZeroU32::new(1).unwrap());
        Self {
            limiter: RateLimiter::direct(quota),
        }
    }

    /// Waits until the next grant is due. The first grant is immediate.
    pub async fn acquire(&self) {
        self.limiter.until_ready().await;
    }
}

/// Creates every secret in `defs`, in order, under a fresh [`Pacer`].
///
/// Returns one result per definition at the same index. The pacer is scoped
/// to this call: concurrent invocations each pace themselves, so the
/// aggregate rate to the service is `ops_per_sec` times the number of
/// in-flight invocations.
pub async fn create_all(
    store: &dyn SecretStore,
    defs: &[SecretDefinition],
    ops_per_sec: u32,
) -> Vec<SecretCreationResult> {
    let pacer = Pacer::new(ops_per_sec);
    let mut results = Vec::with_capacity(defs.len());

    for (i, def) in defs.iter().enumerate() {
        pacer.acquire().await;
        debug!(index = i, secret = %def.name, "creating secret");

        match store.create(def).await {
            Ok(created) => results.push(SecretCreationResult {
                arn: created.arn,
                name: created.name,
                version_id: created.version_id,
                error: String::new(),
            }),
            Err(e) => {
                warn!(index = i, secret = %def.name, error = %e, "secret creation failed");
                results.push(SecretCreationResult {
                    error: e.to_string(),
                    ..Default::default()
                });
            }
        }
    }

    results
}
