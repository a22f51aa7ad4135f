//! Power schedule generator entry point: CLI wiring and config-driven generation.

use std::io;
use std::process;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use power_schedule::cli::CliOptions;
use power_schedule::config::GeneratorConfig;
use power_schedule::io::export::{export_table, write_table};
use power_schedule::reporting::print_summary_report;

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Loads the configuration: `--scenario` takes priority, then `--preset`.
fn load_config(cli: &CliOptions) -> GeneratorConfig {
    let loaded = match cli.scenario {
        Some(ref path) => GeneratorConfig::from_toml_file(path),
        None => GeneratorConfig::from_preset(cli.preset_or_default()),
    };
    let mut config = loaded.unwrap_or_else(|e| {
        error!("{e}");
        process::exit(1);
    });

    if let Some(seed) = cli.seed {
        config.generation.seed = seed;
    }
    if !cli.profiles.is_empty() {
        config.generation.profiles = cli.profiles.clone();
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            error!("{e}");
        }
        process::exit(1);
    }

    config
}

fn main() {
    let cli = CliOptions::parse();
    init_logging(cli.debug);

    let config = load_config(&cli);

    #[cfg(feature = "tui")]
    if cli.tui {
        power_schedule::tui::run(config);
        return;
    }

    let generator = config.build_generator().unwrap_or_else(|e| {
        error!("{e}");
        process::exit(1);
    });
    let set = generator
        .build_profiles(&config.generation.profiles, config.generation.seed)
        .unwrap_or_else(|e| {
            error!("{e}");
            process::exit(1);
        });
    let table = set.to_table();

    let written = match cli.out {
        Some(ref path) => export_table(&table, cli.format, path).map(|()| {
            info!(path = %path.display(), rows = table.len(), "table written");
        }),
        None => write_table(&table, cli.format, io::stdout().lock()),
    };
    if let Err(e) = written {
        error!("failed to write table: {e}");
        process::exit(1);
    }

    print_summary_report(&set);

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(power_schedule::api::AppState::new(set));
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            error!("failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(power_schedule::api::serve(state, addr)) {
            error!("server error: {e}");
            process::exit(1);
        }
    }
}
