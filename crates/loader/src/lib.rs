//! Resolve URL-style resource locators into merged key/value property maps.
//!
//! This crate provides the loading core for layered configuration: an
//! ordered, extensible registry of format loaders, a transport-level opener
//! over heterogeneous resource backends, and a dispatcher tying open, match,
//! parse, and release into one call.
//!
//! ```no_run
//! use propload::{Dispatcher, Locator, PropertyMap};
//!
//! fn main() -> propload::Result<()> {
//!     let dispatcher = Dispatcher::new();
//!     let mut map = PropertyMap::new();
//!     let defaults = Locator::parse("res:app/defaults.properties")?;
//!     let overrides = Locator::parse("file:///etc/app/app.xml")?;
//!     dispatcher.load_layers(&mut map, &[defaults, overrides])?;
//!     println!("server.host = {:?}", map.get("server.host"));
//!     Ok(())
//! }
//! ```

pub mod dispatch;
pub mod error;
pub mod loader;
pub mod locator;
pub mod map;
pub mod opener;
pub mod registry;

// Re-exported so consumers can construct and inspect locators without
// depending on `url` directly.
pub use url;

pub use dispatch::Dispatcher;
pub use error::{Error, Result};
pub use loader::{Loader, ParseError, PropertiesLoader, XmlLoader};
pub use locator::Locator;
pub use map::PropertyMap;
pub use opener::{ByteStream, Opener, UrlOpener};
pub use registry::LoaderRegistry;
