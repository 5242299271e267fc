// Command-line surface and its translation into query types.

use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;

use chrono::Weekday;
use clap::{Parser, Subcommand, ValueEnum};

use gridiron_core::game::{PrimetimeSlot, Week};
use gridiron_core::query::{FilterCriteria, GameType, Location, TeamSelector};
use gridiron_core::ParseError;

use crate::config::ArchiveFormat;

#[derive(Parser, Debug)]
#[command(name = "gridiron")]
#[command(about = "Historical game archive analytics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding gridiron.toml (defaults to the working directory,
    /// then the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Game archive to load, overriding data.games
    #[arg(long, global = true, env = "GRIDIRON_GAMES")]
    pub games: Option<PathBuf>,

    /// Archive encoding, overriding data.format
    #[arg(long, global = true, value_enum)]
    pub format: Option<FormatArg>,

    /// Print single-line JSON
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Auto,
    Json,
    Csv,
}

impl From<FormatArg> for ArchiveFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Auto => ArchiveFormat::Auto,
            FormatArg::Json => ArchiveFormat::Json,
            FormatArg::Csv => ArchiveFormat::Csv,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the available reports
    List,

    /// List every team in the archive
    Teams,

    /// Run one report by name, or `all`
    Report {
        /// Report name (see `list`) or `all`
        name: String,
    },

    /// Filtered record for a team or franchise
    Record(RecordArgs),

    /// Head-to-head history between two teams
    Matchup {
        team_a: String,
        team_b: String,

        /// Number of most recent meetings to list
        #[arg(long)]
        recent: Option<usize>,
    },
}

#[derive(clap::Args, Debug, Default)]
pub struct RecordArgs {
    /// Team name as it appears in the archive
    #[arg(long, conflicts_with = "franchise", required_unless_present = "franchise")]
    pub team: Option<String>,

    /// Franchise name; spans renames and relocations
    #[arg(long)]
    pub franchise: Option<String>,

    /// home, away, or all
    #[arg(long, default_value = "all")]
    pub location: String,

    /// First season (inclusive)
    #[arg(long)]
    pub from: Option<i32>,

    /// Last season (inclusive)
    #[arg(long)]
    pub to: Option<i32>,

    /// Weeks to keep, e.g. 1,2,WildCard
    #[arg(long, value_delimiter = ',')]
    pub weeks: Vec<String>,

    /// Days to keep, e.g. Sun,Mon
    #[arg(long, value_delimiter = ',')]
    pub days: Vec<String>,

    /// Primetime slots to keep; `none` selects games without one
    #[arg(long, value_delimiter = ',')]
    pub primetime: Vec<String>,

    /// all, regular, or playoffs
    #[arg(long = "game-type", default_value = "all")]
    pub game_type: String,

    /// Only games against this opponent
    #[arg(long)]
    pub opponent: Option<String>,
}

impl RecordArgs {
    pub fn selector(&self) -> Option<TeamSelector> {
        match (&self.team, &self.franchise) {
            (Some(team), _) => Some(TeamSelector::Team(team.clone())),
            (None, Some(franchise)) => Some(TeamSelector::Franchise(franchise.clone())),
            (None, None) => None,
        }
    }

    /// Parse the flag values into filter criteria. Empty lists mean no
    /// constraint.
    pub fn criteria(&self) -> Result<FilterCriteria, ParseError> {
        let weeks = self
            .weeks
            .iter()
            .map(|w| w.parse::<Week>())
            .collect::<Result<BTreeSet<_>, _>>()?;
        let days = self
            .days
            .iter()
            .map(|d| {
                d.trim().parse::<Weekday>().map_err(|_| ParseError::Vocabulary {
                    kind: "weekday",
                    value: d.clone(),
                })
            })
            .collect::<Result<HashSet<_>, _>>()?;
        let primetime = self
            .primetime
            .iter()
            .map(|p| {
                if p.trim().eq_ignore_ascii_case("none") {
                    Ok(None)
                } else {
                    p.parse::<PrimetimeSlot>().map(Some)
                }
            })
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(FilterCriteria {
            location: self.location.parse::<Location>()?,
            season_from: self.from,
            season_to: self.to,
            weeks: (!weeks.is_empty()).then_some(weeks),
            days: (!days.is_empty()).then_some(days),
            primetime: (!primetime.is_empty()).then_some(primetime),
            game_type: self.game_type.parse::<GameType>()?,
            opponent: self.opponent.clone(),
        })
    }
}
