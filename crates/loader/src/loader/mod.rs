//! The format loader capability and its built-in implementations.
//!
//! Responsibilities:
//! - Define the `Loader` trait: accept-by-locator routing plus stream parsing.
//! - Define `ParseError`, separating read failures from syntax failures.
//!
//! Does NOT handle:
//! - Loader selection and priority (see `registry`).
//! - Stream lifecycle; streams are owned and released by the dispatcher.
//!
//! Invariants:
//! - `accept` performs no I/O; it is a pure routing predicate.
//! - `load` merges into the map; it never clears existing entries.

mod properties;
mod xml;

pub use properties::PropertiesLoader;
pub use xml::XmlLoader;

use std::io::Read;

use thiserror::Error;

use crate::locator::Locator;
use crate::map::PropertyMap;

/// A format-specific parser that merges resource content into a property map.
///
/// Implementations are stateless and shared behind `Arc`, hence the
/// `Send + Sync` bound. Multiple loaders may accept the same locator; the
/// registry resolves ties by priority order, so predicates do not need to be
/// mutually exclusive.
pub trait Loader: Send + Sync {
    /// Stable short name used in diagnostics.
    fn name(&self) -> &str;

    /// Whether this loader handles the given locator.
    fn accept(&self, locator: &Locator) -> bool;

    /// Parse the entire stream and insert/overwrite entries in `map`.
    ///
    /// The stream is borrowed: the caller owns its lifecycle and releases it
    /// regardless of the outcome.
    fn load(&self, map: &mut PropertyMap, stream: &mut dyn Read) -> Result<(), ParseError>;
}

/// Failures raised by a loader while consuming a stream.
///
/// The dispatcher reports `Io` as a transport failure and everything else as
/// a format failure, each tagged with the locator being loaded.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Transport failure while reading the stream.
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    /// Syntax error in a line-oriented format.
    #[error("line {line}: {message}")]
    Line { line: usize, message: String },

    /// Syntax error in a markup format.
    #[error("markup error at byte {offset}: {message}")]
    Markup { offset: u64, message: String },
}
