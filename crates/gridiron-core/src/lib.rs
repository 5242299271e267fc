// Library root: the game record model, the team index and record finder,
// the head-to-head matchup engine, and every report generator.
//
// Everything in this crate is a pure function of a caller-supplied slice of
// game records. Nothing here performs I/O or keeps state between calls.

pub mod bucket;
pub mod error;
pub mod format;
pub mod franchise;
pub mod game;
pub mod index;
pub mod matchup;
pub mod query;
pub mod reports;
pub mod streak;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::ParseError;
pub use game::{GameRecord, Outcome, TeamGame, TeamSeason, Week};
pub use index::TeamIndex;
