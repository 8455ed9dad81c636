//! propload CLI - resolve configuration locators and print the merged map.
//!
//! Responsibilities:
//! - Parse command-line arguments, assemble the dispatcher, load each
//!   locator in order, and render the merged map.
//!
//! Does NOT handle:
//! - Loader selection or parsing (see the `propload` library).
//!
//! Invariants:
//! - Absent resources are skipped with a warning unless `--require` is set.
//! - Diagnostics go to stderr; only the rendered map goes to stdout.

mod args;

use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use propload::{Dispatcher, Error, Locator, PropertyMap, UrlOpener};
use tracing_subscriber::EnvFilter;

use crate::args::{Cli, OutputFormat};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut opener = UrlOpener::new();
    for root in &cli.search_root {
        opener = opener.with_search_root(root);
    }
    if let Some(name) = &cli.app_name {
        opener = opener.with_app_name(name);
    }

    let dispatcher = Dispatcher::new().with_opener(opener);
    let mut map = PropertyMap::new();
    for raw in &cli.locators {
        let locator = parse_locator(raw)?;
        let found = dispatcher
            .load_into(&mut map, &locator)
            .with_context(|| format!("failed to load {locator}"))?;
        if !found {
            if cli.require {
                anyhow::bail!("required resource is absent: {locator}");
            }
            tracing::warn!(%locator, "skipping absent resource");
        }
    }

    render(&map, cli.format)
}

/// Accept absolute URLs, falling back to treating the input as a file path.
fn parse_locator(raw: &str) -> anyhow::Result<Locator> {
    match Locator::parse(raw) {
        Ok(locator) => Ok(locator),
        Err(Error::InvalidLocator { source, .. })
            if source == propload::url::ParseError::RelativeUrlWithoutBase =>
        {
            Locator::from_path(raw).with_context(|| format!("invalid locator '{raw}'"))
        }
        Err(err) => Err(err).with_context(|| format!("invalid locator '{raw}'")),
    }
}

fn render(map: &PropertyMap, format: OutputFormat) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => {
            for (key, value) in map.iter() {
                writeln!(out, "{key}={value}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, map).context("failed to render JSON")?;
            writeln!(out)?;
        }
    }
    Ok(())
}
