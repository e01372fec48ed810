//! Dataset provider
//!
//! Applies the configured reload policy between the loader and the query
//! engine. Per-request reloading picks up source edits on the next query;
//! startup loading serves one cached table until `reload` is called or the
//! process restarts. Nothing outside the policy invalidates the cache.
//!
//! Every actual load lands in the provider's metrics registry, success or
//! failure; cache hits under the startup policy are not loads.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::observability::MetricsRegistry;
use crate::schema::ParseMode;

use super::errors::{LoadError, LoadResult};
use super::loader::load_path;
use super::table::RecordStore;

/// When the source dataset is (re)read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReloadPolicy {
    /// Reload the source on every query
    #[default]
    PerRequest,
    /// Load once and serve the cached table until explicitly reloaded
    Startup,
}

/// Hands out the record store according to the reload policy
pub struct DatasetProvider {
    path: PathBuf,
    mode: ParseMode,
    policy: ReloadPolicy,
    metrics: Arc<MetricsRegistry>,
    cached: RwLock<Option<Arc<RecordStore>>>,
}

impl DatasetProvider {
    /// Create a provider for the given source path
    pub fn new(path: impl Into<PathBuf>, mode: ParseMode, policy: ReloadPolicy) -> Self {
        Self {
            path: path.into(),
            mode,
            policy,
            metrics: MetricsRegistry::shared(),
            cached: RwLock::new(None),
        }
    }

    /// Replace the registry loads are counted in
    pub fn with_metrics(mut self, metrics: Arc<MetricsRegistry>) -> Self {
        self.metrics = metrics;
        self
    }

    /// The source dataset path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The configured reload policy
    pub fn policy(&self) -> ReloadPolicy {
        self.policy
    }

    /// The configured parse mode
    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// The registry this provider counts loads in
    pub fn metrics(&self) -> Arc<MetricsRegistry> {
        Arc::clone(&self.metrics)
    }

    /// Returns the record store per the reload policy
    pub fn dataset(&self) -> LoadResult<Arc<RecordStore>> {
        match self.policy {
            ReloadPolicy::PerRequest => self.load(),
            ReloadPolicy::Startup => {
                {
                    let cached = self
                        .cached
                        .read()
                        .map_err(|_| LoadError::Io(poisoned_lock()))?;
                    if let Some(store) = cached.as_ref() {
                        return Ok(Arc::clone(store));
                    }
                }
                self.reload()
            }
        }
    }

    /// Force a fresh load, replacing any cached table
    pub fn reload(&self) -> LoadResult<Arc<RecordStore>> {
        let store = self.load()?;
        let mut cached = self
            .cached
            .write()
            .map_err(|_| LoadError::Io(poisoned_lock()))?;
        *cached = Some(Arc::clone(&store));
        Ok(store)
    }

    /// Load the source once, recording the outcome
    fn load(&self) -> LoadResult<Arc<RecordStore>> {
        match load_path(&self.path, self.mode) {
            Ok(store) => {
                self.metrics.record_dataset_loaded();
                Ok(Arc::new(store))
            }
            Err(err) => {
                self.metrics.record_load_failure();
                Err(err)
            }
        }
    }
}

fn poisoned_lock() -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, "dataset cache lock poisoned")
}
