//! Transport-level resource opening.
//!
//! Responsibilities:
//! - Define the `Opener` seam between locators and byte streams.
//!
//! Does NOT handle:
//! - Content interpretation; opening is purely transport.
//! - Loader selection (see `registry`) or stream release (see `dispatch`).
//!
//! Invariants:
//! - `Ok(None)` strictly means the resource does not exist; transport
//!   failures are `Err`, never silently mapped to absence.

mod standard;

pub use standard::UrlOpener;

use std::io::{self, Read};

use crate::locator::Locator;

/// A readable stream produced by an opener.
///
/// Dropping the stream releases the underlying transport resource.
pub type ByteStream = Box<dyn Read + Send>;

/// Transport-level access to resources named by locators.
pub trait Opener: Send + Sync {
    /// Open the locator for reading, or report the resource absent.
    ///
    /// Absence (`Ok(None)`) is a legitimate outcome for optional
    /// configuration layers. Opening may block on transport I/O; no timeout
    /// is imposed here.
    fn open(&self, locator: &Locator) -> io::Result<Option<ByteStream>>;
}
