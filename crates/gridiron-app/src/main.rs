// gridiron entry point.
//
// Startup sequence:
// 1. Parse the command line
// 2. Resolve config (file, --games override, or defaults)
// 3. Initialize tracing (stderr, so stdout stays pure JSON)
// 4. Load the archive when the command needs it
// 5. Run the command and print its JSON

use std::io::Write;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;

use gridiron_app::archive;
use gridiron_app::cli::Cli;
use gridiron_app::commands;
use gridiron_app::config::{self, Config, ConfigError};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = resolve_config(&cli)?;
    init_tracing(&config.log.filter)?;
    info!("gridiron starting up");

    let games = if commands::needs_games(&cli.command) {
        archive::load_games(&config.data.games, config.data.format)
            .context("failed to load game archive")?
    } else {
        Vec::new()
    };

    let output = commands::execute(&cli.command, &config, &games)?;

    let pretty = config.output.pretty && !cli.compact;
    let text = if pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
    .context("failed to render output")?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{text}").context("failed to write output")?;
    Ok(())
}

/// Config file when one exists, with command-line overrides applied. With
/// no config file, `--games` alone is enough.
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let loaded = match &cli.config {
        Some(dir) => config::load_config_from(dir).map(Some),
        None => match config::load_config() {
            Ok(config) => Ok(Some(config)),
            Err(ConfigError::FileNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        },
    }
    .context("failed to load configuration")?;

    let mut config = match (loaded, &cli.games) {
        (Some(mut config), Some(games)) => {
            config.data.games = games.clone();
            config
        }
        (Some(config), None) => config,
        (None, Some(games)) => Config::with_games(games.clone()),
        (None, None) if !commands::needs_games(&cli.command) => {
            Config::with_games(Default::default())
        }
        (None, None) => bail!(
            "no {} found; pass --games <path> or create one",
            config::CONFIG_FILE
        ),
    };

    if let Some(format) = cli.format {
        config.data.format = format.into();
    }
    Ok(config)
}

fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
