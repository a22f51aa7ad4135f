//! Command-line options.

use std::path::PathBuf;

use clap::Parser;

use crate::io::export::Format;

/// Synthetic power schedule generator.
///
/// Without `--scenario` or `--preset`, the `priority` preset is used.
#[derive(Debug, Parser)]
#[command(name = "power-schedule", version, about)]
pub struct CliOptions {
    /// Load the generator configuration from a TOML file.
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Use a built-in preset (priority, uniform, single).
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Override the master random seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Profile to generate; repeat to request several. Replaces the
    /// configured profile list.
    #[arg(long = "profile", value_name = "NAME")]
    pub profiles: Vec<String>,

    /// Write the table to a file instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Table format.
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    pub format: Format,

    /// Log every generated schedule.
    #[arg(long)]
    pub debug: bool,

    /// Serve the generated profiles over HTTP after generation.
    #[cfg(feature = "api")]
    #[arg(long)]
    pub serve: bool,

    /// API server port.
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    /// Open the terminal chart instead of printing the table.
    #[cfg(feature = "tui")]
    #[arg(long)]
    pub tui: bool,
}

impl CliOptions {
    /// Preset to load when no scenario file is given.
    pub fn preset_or_default(&self) -> &str {
        self.preset.as_deref().unwrap_or("priority")
    }
}
