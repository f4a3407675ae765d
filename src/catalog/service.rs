//! Read-through cache over a [`CatalogSource`].
//!
//! The service holds at most one cached snapshot of the full product list.
//! Reads are served from the snapshot while it is fresh; a miss (cold cache,
//! expired snapshot, or explicit invalidation) pulls the complete list from
//! the source and publishes it atomically. There is no partial state: the
//! snapshot is either absent or fully populated.

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::source::{CatalogSource, SourceError};
use super::Product;

/// How long a populated snapshot stays valid.
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

/// Errors surfaced by the cache service.
///
/// Note that a lookup miss is *not* an error — [`CatalogService::get_by_id`]
/// returns `Ok(None)` for an unknown id. Only a failed source pull with
/// nothing cached to fall back on reaches callers as `Err`.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Source(#[from] SourceError),
}

// The cached copy of the catalog at a point in time. Never partially
// populated: it is built complete, then published with a single assignment.
struct Snapshot {
    products: Vec<Product>,
    populated_at: Instant,
}

impl Snapshot {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.populated_at.elapsed() < ttl
    }
}

/// Read-through cache service for the product catalog.
///
/// An explicitly owned component instance — construct one per server (or per
/// test) and share it behind an [`Arc`]. Expiration is an absolute deadline
/// from population time; there is no sliding renewal.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use catalogd::catalog::{CatalogService, SampleCatalog};
///
/// # async fn example() -> Result<(), catalogd::catalog::CatalogError> {
/// let service = CatalogService::new(Arc::new(SampleCatalog::new()));
///
/// let all = service.get_all().await?;
/// let mouse = service.get_by_id(3).await?;
/// service.invalidate().await;
/// # Ok(())
/// # }
/// ```
pub struct CatalogService {
    source: Arc<dyn CatalogSource>,
    ttl: Duration,
    snapshot: RwLock<Option<Snapshot>>,
}

impl CatalogService {
    /// Creates a service with the default 15-minute snapshot TTL.
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self::with_ttl(source, DEFAULT_TTL)
    }

    /// Creates a service with a custom snapshot TTL.
    pub fn with_ttl(source: Arc<dyn CatalogSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            snapshot: RwLock::new(None),
        }
    }

    /// Returns the full ordered product list, serving the cached snapshot
    /// when it is present and unexpired.
    ///
    /// On a miss the complete list is pulled from the source and published as
    /// the new snapshot before being returned. The source's ordering is
    /// preserved, so repeated calls within the TTL window return element-wise
    /// identical sequences.
    ///
    /// Concurrent misses coalesce into a single source pull: the population
    /// path runs under the write lock, and whoever acquires it next re-checks
    /// the snapshot before pulling again.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Source`] when the source pull fails and no
    /// previously cached snapshot exists. If a stale snapshot is still held,
    /// it is served instead and the failure only logged.
    pub async fn get_all(&self) -> Result<Vec<Product>, CatalogError> {
        {
            let guard = self.snapshot.read().await;
            if let Some(snap) = guard.as_ref() {
                if snap.is_fresh(self.ttl) {
                    debug!(count = snap.products.len(), "products served from cache");
                    return Ok(snap.products.clone());
                }
            }
        }

        let mut guard = self.snapshot.write().await;

        // Another caller may have repopulated while we waited for the lock.
        if let Some(snap) = guard.as_ref() {
            if snap.is_fresh(self.ttl) {
                debug!("snapshot repopulated by concurrent caller");
                return Ok(snap.products.clone());
            }
        }

        info!("product cache cold or expired, pulling from source");
        match self.source.list_all().await {
            Ok(products) => {
                *guard = Some(Snapshot {
                    products: products.clone(),
                    populated_at: Instant::now(),
                });
                info!(
                    count = products.len(),
                    ttl_secs = self.ttl.as_secs(),
                    "product cache populated"
                );
                Ok(products)
            }
            Err(e) => {
                // Serve the previous snapshot if one exists; it stays in
                // place so the next read retries the source.
                if let Some(snap) = guard.as_ref() {
                    warn!(error = %e, "source pull failed, serving stale snapshot");
                    return Ok(snap.products.clone());
                }
                Err(CatalogError::Source(e))
            }
        }
    }

    /// Looks up a single product by id.
    ///
    /// Resolves through [`get_all`](Self::get_all), so it populates and
    /// benefits from the cache. An unknown id yields `Ok(None)` — a normal
    /// outcome, not a failure.
    pub async fn get_by_id(&self, id: u32) -> Result<Option<Product>, CatalogError> {
        let products = self.get_all().await?;
        Ok(products.into_iter().find(|p| p.id == id))
    }

    /// Unconditionally discards the cached snapshot.
    ///
    /// Safe to call whether or not a snapshot exists; the next read pulls
    /// fresh from the source either way.
    pub async fn invalidate(&self) {
        let mut guard = self.snapshot.write().await;
        *guard = None;
        info!("product cache cleared");
    }
}
