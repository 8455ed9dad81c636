//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//!
//! Non-responsibilities:
//! - Does not resolve or load locators (see `main`).

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "propload")]
#[command(about = "Resolve configuration locators into one merged property map", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  propload app.properties local.properties\n  propload res:conf/defaults.properties file:///etc/app/app.xml\n  propload --search-root ./conf res:app.properties env:APP_\n  propload --format json https://config.example.com/app.properties\n"
)]
pub struct Cli {
    /// Locators to load, in layering order (later overrides earlier).
    ///
    /// Absolute URLs (file:, res:, env:, http:, https:) or bare
    /// filesystem paths.
    #[arg(required = true, value_name = "LOCATOR")]
    pub locators: Vec<String>,

    /// Additional search root for res: locators (repeatable)
    #[arg(long, value_name = "DIR")]
    pub search_root: Vec<PathBuf>,

    /// Application name whose platform config directory is searched by
    /// res: locators
    #[arg(long, value_name = "NAME", env = "PROPLOAD_APP_NAME")]
    pub app_name: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Fail instead of skipping when a locator has no resource behind it
    #[arg(long)]
    pub require: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    /// Sorted `key=value` lines
    Text,
    /// A single JSON object
    Json,
}
