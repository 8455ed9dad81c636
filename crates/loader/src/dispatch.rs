//! Dispatch: open, match, parse, release.
//!
//! Responsibilities:
//! - Orchestrate a single locator load against an accumulating map.
//! - Report absence through the boolean result, failures through `Error`.
//!
//! Does NOT handle:
//! - Rollback; a loader failing mid-parse leaves its partial merge behind.
//! - Synchronizing a map shared across threads; that is the caller's job.
//!
//! Invariants:
//! - The opened stream is released on every exit path, including loader
//!   resolution and parse failures; release is the stream's `Drop`.
//! - Absence short-circuits before any loader lookup.

use std::sync::Arc;

use crate::error::Error;
use crate::loader::ParseError;
use crate::locator::Locator;
use crate::map::PropertyMap;
use crate::opener::{Opener, UrlOpener};
use crate::registry::LoaderRegistry;

/// Orchestrates open → match → parse → release for locators.
pub struct Dispatcher {
    registry: Arc<LoaderRegistry>,
    opener: Box<dyn Opener>,
}

impl Dispatcher {
    /// Dispatcher over the built-in registry and the standard opener.
    pub fn new() -> Self {
        Self::with_registry(Arc::new(LoaderRegistry::new()))
    }

    /// Dispatcher over a caller-owned registry.
    pub fn with_registry(registry: Arc<LoaderRegistry>) -> Self {
        Self {
            registry,
            opener: Box::new(UrlOpener::default()),
        }
    }

    /// Replace the opener (custom transports, test doubles).
    pub fn with_opener(mut self, opener: impl Opener + 'static) -> Self {
        self.opener = Box::new(opener);
        self
    }

    /// The registry consulted for dispatch; register custom loaders here.
    pub fn registry(&self) -> &Arc<LoaderRegistry> {
        &self.registry
    }

    /// Load one locator into `map`.
    ///
    /// Returns `Ok(false)` when the resource does not exist; the map is
    /// untouched in that case and no loader lookup happens. On `Ok(true)`
    /// the matched loader has merged the resource's entries into `map`,
    /// overwriting keys from earlier loads.
    pub fn load_into(&self, map: &mut PropertyMap, locator: &Locator) -> Result<bool, Error> {
        let opened = self.opener.open(locator).map_err(|source| Error::Io {
            locator: locator.clone(),
            source,
        })?;
        let Some(mut stream) = opened else {
            tracing::debug!(%locator, "resource absent");
            return Ok(false);
        };

        // From here on `stream` closes when it drops, on success and on
        // both failure paths.
        let loader = self.registry.find(locator)?;
        tracing::debug!(%locator, loader = loader.name(), "loading resource");

        let before = map.len();
        loader.load(map, &mut stream).map_err(|err| match err {
            ParseError::Io(source) => Error::Io {
                locator: locator.clone(),
                source,
            },
            other => Error::Format {
                locator: locator.clone(),
                source: other,
            },
        })?;
        tracing::trace!(%locator, new_entries = map.len() - before, "resource merged");
        Ok(true)
    }

    /// Load an ordered list of locators into `map`.
    ///
    /// Later layers overwrite earlier keys. Returns how many resources were
    /// present; absent ones are skipped. Stops at the first failure.
    pub fn load_layers(&self, map: &mut PropertyMap, locators: &[Locator]) -> Result<usize, Error> {
        let mut found = 0;
        for locator in locators {
            if self.load_into(map, locator)? {
                found += 1;
            }
        }
        Ok(found)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
