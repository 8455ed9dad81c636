//! Scheme-dispatched default opener.
//!
//! Responsibilities:
//! - Resolve `file:`, `res:`, `env:`, and `http(s):` locators to streams.
//! - Map "does not exist" transport outcomes to absence.
//!
//! Does NOT handle:
//! - Retries, caching, or timeouts; blocking is delegated to the transport.
//!
//! Invariants:
//! - Only verifiable non-existence (missing file, no search-root hit,
//!   HTTP 404/410) maps to absence; everything else fails loudly.
//! - `res:` paths never escape the configured search roots.

use std::fs::File;
use std::io::{self, Cursor};
use std::path::{Component, Path, PathBuf};

use super::{ByteStream, Opener};
use crate::locator::Locator;

/// Opener handling `file:`, `res:`, `env:`, and `http(s):` locators.
///
/// `res:` locators are looked up against an ordered list of search roots,
/// defaulting to the current directory; `with_app_name` appends the
/// platform config directory for the consuming application.
pub struct UrlOpener {
    search_roots: Vec<PathBuf>,
}

impl Default for UrlOpener {
    fn default() -> Self {
        Self {
            search_roots: vec![PathBuf::from(".")],
        }
    }
}

impl UrlOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a search root consulted by `res:` locators.
    pub fn with_search_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.search_roots.push(root.into());
        self
    }

    /// Append the platform config directory for `name` as a search root.
    ///
    /// On Linux this is `~/.config/<name>`; other platforms follow their
    /// native conventions. Skipped silently when no home directory can be
    /// determined.
    pub fn with_app_name(mut self, name: &str) -> Self {
        if let Some(dirs) = directories::ProjectDirs::from("", "", name) {
            self.search_roots.push(dirs.config_dir().to_path_buf());
        }
        self
    }

    fn open_file(&self, locator: &Locator) -> io::Result<Option<ByteStream>> {
        let path = locator.as_url().to_file_path().map_err(|()| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a local file path: {locator}"),
            )
        })?;
        open_if_exists(&path)
    }

    fn open_resource(&self, locator: &Locator) -> io::Result<Option<ByteStream>> {
        let relative = Path::new(locator.path().trim_start_matches('/'));
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("resource path escapes search roots: {locator}"),
            ));
        }
        for root in &self.search_roots {
            let candidate = root.join(relative);
            if let Some(stream) = open_if_exists(&candidate)? {
                tracing::trace!(%locator, path = %candidate.display(), "resolved resource");
                return Ok(Some(stream));
            }
        }
        Ok(None)
    }

    /// Snapshot process environment variables as a flat key-value stream.
    ///
    /// A non-empty path component acts as a name prefix filter and is
    /// stripped from the emitted keys. An empty snapshot is an empty
    /// stream, not absence.
    fn open_env(&self, locator: &Locator) -> ByteStream {
        let prefix = locator.path().trim_start_matches('/');
        let mut vars: Vec<(String, String)> = std::env::vars().collect();
        vars.sort();

        let mut out = String::new();
        for (key, value) in vars {
            let Some(stripped) = key.strip_prefix(prefix) else {
                continue;
            };
            if stripped.is_empty() {
                continue;
            }
            escape_into(stripped, &mut out);
            out.push('=');
            escape_into(&value, &mut out);
            out.push('\n');
        }
        Box::new(Cursor::new(out.into_bytes()))
    }

    fn open_http(&self, locator: &Locator) -> io::Result<Option<ByteStream>> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(io::Error::other)?;
        let response = client
            .get(locator.as_url().clone())
            .send()
            .map_err(io::Error::other)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND || status == reqwest::StatusCode::GONE {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(io::Error::other(format!("{locator} answered {status}")));
        }
        Ok(Some(Box::new(response)))
    }
}

impl Opener for UrlOpener {
    fn open(&self, locator: &Locator) -> io::Result<Option<ByteStream>> {
        match locator.scheme() {
            "file" => self.open_file(locator),
            "res" => self.open_resource(locator),
            "env" => Ok(Some(self.open_env(locator))),
            "http" | "https" => self.open_http(locator),
            other => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("no transport for scheme '{other}'"),
            )),
        }
    }
}

fn open_if_exists(path: &Path) -> io::Result<Option<ByteStream>> {
    match File::open(path) {
        Ok(file) => Ok(Some(Box::new(file))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Escape an environment name or value so the flat key-value format
/// round-trips it exactly.
fn escape_into(raw: &str, out: &mut String) {
    for ch in raw.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '=' | ':' | ' ' | '#' | '!' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
}
