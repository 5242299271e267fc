// Command dispatch: turns a parsed subcommand plus the loaded archive into a
// JSON document for stdout.

use anyhow::{bail, Context, Result};
use serde_json::{json, Map, Value};
use tracing::info;

use gridiron_core::matchup::matchup;
use gridiron_core::query::RecordFinder;
use gridiron_core::reports::{self, ReportKind};
use gridiron_core::{GameRecord, TeamIndex};

use crate::cli::{Commands, RecordArgs};
use crate::config::Config;

/// Whether a command needs the archive loaded.
pub fn needs_games(command: &Commands) -> bool {
    !matches!(command, Commands::List)
}

pub fn execute(command: &Commands, config: &Config, games: &[GameRecord]) -> Result<Value> {
    match command {
        Commands::List => Ok(list_reports()),
        Commands::Teams => Ok(json!(TeamIndex::build(games).teams())),
        Commands::Report { name } => run_report(name, games),
        Commands::Record(args) => run_record(args, config, games),
        Commands::Matchup {
            team_a,
            team_b,
            recent,
        } => {
            let recent = recent.unwrap_or(config.matchup.recent_games);
            if recent == 0 {
                bail!("--recent must be greater than 0");
            }
            let result = matchup(team_a, team_b, games, recent);
            serde_json::to_value(result).context("failed to serialize matchup")
        }
    }
}

fn list_reports() -> Value {
    Value::Array(
        ReportKind::ALL
            .iter()
            .map(|kind| Value::String(kind.name().to_string()))
            .collect(),
    )
}

fn run_report(name: &str, games: &[GameRecord]) -> Result<Value> {
    if name.eq_ignore_ascii_case("all") {
        let mut all = Map::new();
        for kind in ReportKind::ALL {
            let value = reports::generate(kind, games)
                .with_context(|| format!("failed to serialize report {kind}"))?;
            all.insert(kind.name().to_string(), value);
        }
        info!("generated {} reports over {} games", all.len(), games.len());
        return Ok(Value::Object(all));
    }

    let kind: ReportKind = name.parse().context("run `gridiron list` for report names")?;
    info!("generating {} over {} games", kind, games.len());
    reports::generate(kind, games).with_context(|| format!("failed to serialize report {kind}"))
}

fn run_record(args: &RecordArgs, config: &Config, games: &[GameRecord]) -> Result<Value> {
    let selector = args
        .selector()
        .context("record needs --team or --franchise")?;
    let criteria = args.criteria().context("invalid record filter")?;

    let index = TeamIndex::build(games);
    let franchises = config.franchise_map();
    let finder = RecordFinder::new(&index, &franchises);
    if finder.resolve(&selector).is_empty() {
        bail!("no games found for {selector}");
    }

    let result = finder.query_record(&selector, &criteria);
    serde_json::to_value(result).context("failed to serialize record")
}
