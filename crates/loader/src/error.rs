//! Error types for locator resolution and loading.
//!
//! Responsibilities:
//! - Define the crate-wide error enum and `Result` alias.
//! - Attach the offending locator to transport and format failures.
//!
//! Does NOT handle:
//! - Parse-level failure detail (see `loader::ParseError`).
//! - Absent resources; absence is the `Ok(false)` result of dispatch, never
//!   an error.
//!
//! Invariants:
//! - Every failure surfaces to the immediate caller; no retries, no
//!   suppression, no logging in place of propagation.

use std::path::PathBuf;

use thiserror::Error;

use crate::loader::ParseError;
use crate::locator::Locator;

/// Result type alias for loading operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving a locator into properties.
#[derive(Error, Debug)]
pub enum Error {
    /// The input string is not an absolute URL.
    #[error("invalid resource locator '{input}': {source}")]
    InvalidLocator {
        input: String,
        #[source]
        source: url::ParseError,
    },

    /// A filesystem path could not be expressed as a `file:` locator.
    #[error("path cannot be expressed as a file: locator: {path}")]
    InvalidPath { path: PathBuf },

    /// Transport-level failure while opening or reading the resource.
    /// Never retried here.
    #[error("I/O error on {locator}: {source}")]
    Io {
        locator: Locator,
        #[source]
        source: std::io::Error,
    },

    /// No registered loader accepted the locator. Indicates a missing
    /// registration, not a transient condition.
    #[error("no registered loader accepts {locator}")]
    UnsupportedResource { locator: Locator },

    /// The matched loader rejected the resource content.
    #[error("malformed content in {locator}: {source}")]
    Format {
        locator: Locator,
        #[source]
        source: ParseError,
    },
}
