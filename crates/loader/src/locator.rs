//! Resource locators.
//!
//! Responsibilities:
//! - Wrap `url::Url` as an immutable, opaque resource reference.
//! - Expose the pieces routing and opening need: scheme, path, extension.
//!
//! Does NOT handle:
//! - Opening resources (see `opener`).
//! - Format matching policy; loaders decide what they accept.
//!
//! Invariants:
//! - A `Locator` is always a valid absolute URL.
//! - Construction performs no I/O; the referenced resource need not exist.

use std::fmt;
use std::path::Path;

use url::Url;

use crate::error::Error;

/// An opaque reference to a loadable resource.
///
/// Locators are cheap to clone and carry no I/O state. The same locator is
/// used for transport (opening) and for routing (loader matching).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    url: Url,
}

impl Locator {
    /// Parse an absolute URL into a locator.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let url = Url::parse(input).map_err(|source| Error::InvalidLocator {
            input: input.to_string(),
            source,
        })?;
        Ok(Self { url })
    }

    /// Build a `file:` locator from a filesystem path.
    ///
    /// Relative paths are resolved against the current working directory.
    /// The path does not need to exist.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let invalid = || Error::InvalidPath {
            path: path.to_path_buf(),
        };
        let absolute = std::path::absolute(path).map_err(|_| invalid())?;
        let url = Url::from_file_path(&absolute).map_err(|()| invalid())?;
        Ok(Self { url })
    }

    /// URL scheme (`file`, `res`, `env`, `http`, ...), always lowercase.
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Path component of the URL, as written.
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// Trailing path segment, if any.
    pub fn file_name(&self) -> Option<&str> {
        match self.url.path().rsplit('/').next() {
            Some("") | None => None,
            Some(segment) => Some(segment),
        }
    }

    /// Extension suffix of the trailing path segment.
    ///
    /// `None` when there is no trailing segment, the segment has no dot, or
    /// the dot is leading (dotfiles have no extension).
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(idx) if idx > 0 && idx + 1 < name.len() => Some(&name[idx + 1..]),
            _ => None,
        }
    }

    /// Borrow the underlying URL.
    pub fn as_url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.url.fmt(f)
    }
}

impl From<Url> for Locator {
    fn from(url: Url) -> Self {
        Self { url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_absolute_url() {
        let locator = Locator::parse("file:///etc/app/app.properties").unwrap();
        assert_eq!(locator.scheme(), "file");
        assert_eq!(locator.path(), "/etc/app/app.properties");
        assert_eq!(locator.file_name(), Some("app.properties"));
        assert_eq!(locator.extension(), Some("properties"));
    }

    #[test]
    fn test_parse_rejects_relative_input() {
        let result = Locator::parse("conf/app.properties");
        assert!(matches!(result, Err(Error::InvalidLocator { .. })));
    }

    #[test]
    fn test_from_path_resolves_relative_paths() {
        let locator = Locator::from_path("conf/app.properties").unwrap();
        assert_eq!(locator.scheme(), "file");
        assert!(locator.path().ends_with("/conf/app.properties"));
    }

    #[test]
    fn test_extension_of_opaque_path() {
        let locator = Locator::parse("res:app/defaults.xml").unwrap();
        assert_eq!(locator.scheme(), "res");
        assert_eq!(locator.extension(), Some("xml"));
    }

    #[test]
    fn test_extension_absent_cases() {
        assert_eq!(Locator::parse("file:///etc/app").unwrap().extension(), None);
        assert_eq!(Locator::parse("file:///etc/.env").unwrap().extension(), None);
        assert_eq!(
            Locator::parse("file:///etc/app.").unwrap().extension(),
            None
        );
        assert_eq!(Locator::parse("env:APP_").unwrap().extension(), None);
        assert_eq!(Locator::parse("file:///").unwrap().file_name(), None);
    }

    #[test]
    fn test_display_round_trips_url() {
        let locator = Locator::parse("https://example.com/conf/app.xml").unwrap();
        assert_eq!(locator.to_string(), "https://example.com/conf/app.xml");
    }
}
