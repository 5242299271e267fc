// Run-length walk shared by the streak leaderboards and upset streaks.

/// Open and longest run for one sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakSummary {
    /// Length of the run still open after the last game (0 if broken).
    pub current: u32,
    /// Longest run, including the open one.
    pub longest: u32,
}

/// Walk a chronological sequence of hits. A miss closes the running streak
/// into the completed list; the open streak is flushed into that list before
/// the maximum is taken.
pub fn extract_streaks<I>(hits: I) -> StreakSummary
where
    I: IntoIterator<Item = bool>,
{
    let mut completed: Vec<u32> = Vec::new();
    let mut running = 0u32;

    for hit in hits {
        if hit {
            running += 1;
        } else if running > 0 {
            completed.push(running);
            running = 0;
        }
    }

    let current = running;
    if running > 0 {
        completed.push(running);
    }

    StreakSummary {
        current,
        longest: completed.into_iter().max().unwrap_or(0),
    }
}
