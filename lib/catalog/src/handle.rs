use std::sync::Arc;

use parking_lot::RwLock;

use lookbook_core::{Catalog, Result};

use crate::loader::{self, CatalogPaths};

/// Shared access to the current catalog snapshot.
///
/// The handle owns an `Arc<Catalog>` behind a lock that guards only the
/// pointer: readers clone the `Arc` and then work lock-free against an
/// immutable snapshot. Reload builds a complete new catalog first and swaps
/// it in atomically, so in-flight queries keep seeing the old snapshot and
/// never observe a partially-updated state. A failed reload leaves the
/// current snapshot untouched.
pub struct CatalogHandle {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogHandle {
    /// Wrap an already-built catalog, e.g. for tests.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// Load the catalog from disk and wrap it.
    pub fn load(paths: &CatalogPaths) -> Result<Self> {
        Ok(Self::new(loader::load(paths)?))
    }

    /// The current immutable snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Catalog> {
        self.current.read().clone()
    }

    /// Rebuild from refreshed source files and swap the snapshot in.
    pub fn reload(&self, paths: &CatalogPaths) -> Result<()> {
        let fresh = Arc::new(loader::load(paths)?);
        *self.current.write() = fresh;
        Ok(())
    }
}
