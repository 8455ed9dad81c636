//! The loader registry.
//!
//! Responsibilities:
//! - Keep an ordered list of loaders; registration order defines priority.
//! - Resolve locators to the first accepting loader.
//!
//! Does NOT handle:
//! - Opening resources or invoking loaders (see `dispatch`).
//!
//! Invariants:
//! - New registrations go to the front: the most recently registered loader
//!   wins ties.
//! - `new()` pre-registers the built-ins, so the registry is never empty
//!   after construction; `empty()` starts outside that invariant.
//! - Concurrent `register` and `find` calls observe a consistent
//!   snapshot-or-later state; a poisoned lock is absorbed, never repanicked.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::Error;
use crate::loader::{Loader, PropertiesLoader, XmlLoader};
use crate::locator::Locator;

/// Ordered collection of loaders with first-match dispatch.
///
/// The registry is explicitly constructed and shared by reference (or
/// `Arc`) with whoever assembles configuration; there is no process-wide
/// instance.
pub struct LoaderRegistry {
    loaders: RwLock<Vec<Arc<dyn Loader>>>,
}

impl LoaderRegistry {
    /// Registry pre-populated with the built-in loaders.
    ///
    /// The flat key-value loader registers first so the markup loader
    /// outranks it; the flat format stays the fallback for everything the
    /// markup loader declines.
    pub fn new() -> Self {
        let registry = Self::empty();
        registry.register(PropertiesLoader::new());
        registry.register(XmlLoader::new());
        registry
    }

    /// Registry without any loaders.
    ///
    /// Callers are expected to register at least one loader before
    /// dispatching; until then every `find` fails.
    pub fn empty() -> Self {
        Self {
            loaders: RwLock::new(Vec::new()),
        }
    }

    /// Register a loader at the highest-priority position.
    ///
    /// Duplicates are permitted; they simply shadow older entries.
    pub fn register<L: Loader + 'static>(&self, loader: L) {
        self.register_arc(Arc::new(loader));
    }

    /// Register an already-shared loader at the highest-priority position.
    pub fn register_arc(&self, loader: Arc<dyn Loader>) {
        let mut loaders = self.loaders.write().unwrap_or_else(PoisonError::into_inner);
        loaders.insert(0, loader);
    }

    /// Resolve the first loader accepting the locator, in priority order.
    ///
    /// No match is an immediate, deterministic failure: it means a missing
    /// registration, not something worth retrying.
    pub fn find(&self, locator: &Locator) -> Result<Arc<dyn Loader>, Error> {
        let loaders = self.loaders.read().unwrap_or_else(PoisonError::into_inner);
        loaders
            .iter()
            .find(|loader| loader.accept(locator))
            .cloned()
            .ok_or_else(|| Error::UnsupportedResource {
                locator: locator.clone(),
            })
    }

    /// Number of registered loaders.
    pub fn len(&self) -> usize {
        self.loaders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the registry has no loaders.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loaders = self.loaders.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_list()
            .entries(loaders.iter().map(|loader| loader.name()))
            .finish()
    }
}
