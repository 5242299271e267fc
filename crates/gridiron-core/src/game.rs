// Game record model: the immutable input shape consumed by every report.
//
// Betting fields are always stored from the home team's perspective. The
// `TeamGame` view flips them for away appearances so consumers never have to.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Timelike, Weekday};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ParseError;

// ---------------------------------------------------------------------------
// Week vocabulary
// ---------------------------------------------------------------------------

/// Playoff rounds in bracket order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlayoffRound {
    WildCard,
    Divisional,
    Conference,
    Championship,
}

impl PlayoffRound {
    pub const ALL: [PlayoffRound; 4] = [
        PlayoffRound::WildCard,
        PlayoffRound::Divisional,
        PlayoffRound::Conference,
        PlayoffRound::Championship,
    ];

    /// The token used by the game archive.
    pub fn token(&self) -> &'static str {
        match self {
            PlayoffRound::WildCard => "WildCard",
            PlayoffRound::Divisional => "Division",
            PlayoffRound::Conference => "ConfChamp",
            PlayoffRound::Championship => "SuperBowl",
        }
    }

    /// Human-readable round name.
    pub fn label(&self) -> &'static str {
        match self {
            PlayoffRound::WildCard => "Wild Card",
            PlayoffRound::Divisional => "Divisional",
            PlayoffRound::Conference => "Conference",
            PlayoffRound::Championship => "Championship",
        }
    }
}

/// A scheduling week. Regular-season weeks sort numerically and always
/// precede playoff rounds; the derived `Ord` relies on variant order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Week {
    Regular(u8),
    Playoff(PlayoffRound),
}

impl Week {
    pub fn is_playoff(&self) -> bool {
        matches!(self, Week::Playoff(_))
    }

    /// The week number for regular-season weeks.
    pub fn regular_number(&self) -> Option<u8> {
        match self {
            Week::Regular(n) => Some(*n),
            Week::Playoff(_) => None,
        }
    }
}

impl FromStr for Week {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<u8>() {
            if n == 0 {
                return Err(ParseError::Week(s.to_string()));
            }
            return Ok(Week::Regular(n));
        }

        let normalized: String = trimmed
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        let round = match normalized.as_str() {
            "wildcard" | "wc" => PlayoffRound::WildCard,
            "division" | "divisional" | "div" => PlayoffRound::Divisional,
            "confchamp" | "conference" | "conf" => PlayoffRound::Conference,
            "superbowl" | "championship" | "sb" => PlayoffRound::Championship,
            _ => return Err(ParseError::Week(s.to_string())),
        };
        Ok(Week::Playoff(round))
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Week::Regular(n) => write!(f, "{n}"),
            Week::Playoff(round) => f.write_str(round.token()),
        }
    }
}

impl Serialize for Week {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Week {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawWeek {
            Number(u64),
            Text(String),
        }

        match RawWeek::deserialize(deserializer)? {
            RawWeek::Number(n) => match u8::try_from(n) {
                Ok(n) if n > 0 => Ok(Week::Regular(n)),
                _ => Err(de::Error::custom(ParseError::Week(n.to_string()))),
            },
            RawWeek::Text(text) => text.parse().map_err(de::Error::custom),
        }
    }
}

// ---------------------------------------------------------------------------
// Primetime slots
// ---------------------------------------------------------------------------

/// A labeled broadcast window distinct from the daytime slate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrimetimeSlot {
    MondayNight,
    SundayNight,
    ThursdayNight,
    SaturdayNight,
}

impl PrimetimeSlot {
    pub const ALL: [PrimetimeSlot; 4] = [
        PrimetimeSlot::MondayNight,
        PrimetimeSlot::SundayNight,
        PrimetimeSlot::ThursdayNight,
        PrimetimeSlot::SaturdayNight,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            PrimetimeSlot::MondayNight => "MNF",
            PrimetimeSlot::SundayNight => "SNF",
            PrimetimeSlot::ThursdayNight => "TNF",
            PrimetimeSlot::SaturdayNight => "Saturday Primetime",
        }
    }
}

impl FromStr for PrimetimeSlot {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mnf" | "monday night" => Ok(PrimetimeSlot::MondayNight),
            "snf" | "sunday night" => Ok(PrimetimeSlot::SundayNight),
            "tnf" | "thursday night" => Ok(PrimetimeSlot::ThursdayNight),
            "saturday primetime" | "saturday night" | "sat" => Ok(PrimetimeSlot::SaturdayNight),
            _ => Err(ParseError::Primetime(s.to_string())),
        }
    }
}

impl fmt::Display for PrimetimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl Serialize for PrimetimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// First season each broadcast window existed as a regular slot.
const MONDAY_NIGHT_FROM: i32 = 1970;
const SUNDAY_NIGHT_FROM: i32 = 1987;
const THURSDAY_NIGHT_FROM: i32 = 2006;
/// Kickoffs at or after this hour (Eastern) count as night games.
const NIGHT_KICKOFF_HOUR: u32 = 19;

/// Parse an Eastern kickoff time such as `8:20PM`, `8:20 pm`, or `20:20`.
pub fn parse_kickoff(raw: &str) -> Option<NaiveTime> {
    let compact: String = raw.split_whitespace().collect::<String>().to_ascii_uppercase();
    NaiveTime::parse_from_str(&compact, "%I:%M%p")
        .or_else(|_| NaiveTime::parse_from_str(&compact, "%H:%M"))
        .ok()
}

/// Infer the broadcast slot from weekday, kickoff, and season. Monday and
/// Thursday games are primetime by day alone once the slot exists; Sunday
/// and Saturday need a night kickoff. No kickoff recorded means no slot.
pub fn detect_primetime(season: i32, day: Weekday, kickoff: &str) -> Option<PrimetimeSlot> {
    if kickoff.trim().is_empty() {
        return None;
    }
    let night = parse_kickoff(kickoff).is_some_and(|t| t.hour() >= NIGHT_KICKOFF_HOUR);
    match day {
        Weekday::Mon if season >= MONDAY_NIGHT_FROM => Some(PrimetimeSlot::MondayNight),
        Weekday::Thu if season >= THURSDAY_NIGHT_FROM => Some(PrimetimeSlot::ThursdayNight),
        Weekday::Sun if night && season >= SUNDAY_NIGHT_FROM => Some(PrimetimeSlot::SundayNight),
        Weekday::Sat if night => Some(PrimetimeSlot::SaturdayNight),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Betting grades
// ---------------------------------------------------------------------------

/// Graded spread outcome. Stored from the home side's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpreadResult {
    Covered,
    Lost,
    Push,
}

impl SpreadResult {
    /// Flip the grade to the other side. `Push` is a fixed point.
    pub fn invert(self) -> Self {
        match self {
            SpreadResult::Covered => SpreadResult::Lost,
            SpreadResult::Lost => SpreadResult::Covered,
            SpreadResult::Push => SpreadResult::Push,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpreadResult::Covered => "Covered",
            SpreadResult::Lost => "Lost",
            SpreadResult::Push => "Push",
        }
    }
}

impl FromStr for SpreadResult {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "covered" | "cover" => Ok(SpreadResult::Covered),
            "lost" | "loss" => Ok(SpreadResult::Lost),
            "push" => Ok(SpreadResult::Push),
            _ => Err(ParseError::SpreadResult(s.to_string())),
        }
    }
}

impl fmt::Display for SpreadResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for SpreadResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Graded over/under outcome. Identical from either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OuResult {
    Over,
    Under,
    Push,
}

impl OuResult {
    pub fn label(&self) -> &'static str {
        match self {
            OuResult::Over => "Over",
            OuResult::Under => "Under",
            OuResult::Push => "Push",
        }
    }
}

impl FromStr for OuResult {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "over" => Ok(OuResult::Over),
            "under" => Ok(OuResult::Under),
            "push" => Ok(OuResult::Push),
            _ => Err(ParseError::OuResult(s.to_string())),
        }
    }
}

impl fmt::Display for OuResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for OuResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Grade a home-perspective spread: the home side covers when its score plus
/// the line beats the away score.
pub fn grade_spread(home_score: u32, away_score: u32, spread: f64) -> SpreadResult {
    let adjusted = home_score as f64 + spread;
    let away = away_score as f64;
    if adjusted > away {
        SpreadResult::Covered
    } else if adjusted < away {
        SpreadResult::Lost
    } else {
        SpreadResult::Push
    }
}

/// Grade a posted total against the combined score.
pub fn grade_total(home_score: u32, away_score: u32, over_under: f64) -> OuResult {
    let total = (home_score + away_score) as f64;
    if total > over_under {
        OuResult::Over
    } else if total < over_under {
        OuResult::Under
    } else {
        OuResult::Push
    }
}

// ---------------------------------------------------------------------------
// Optional detail blocks
// ---------------------------------------------------------------------------

/// Recorded weather. A game with none of these fields is treated as indoors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weather {
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub conditions: Option<String>,
    #[serde(default)]
    pub wind: Option<f64>,
}

impl Weather {
    pub fn is_recorded(&self) -> bool {
        self.temperature.is_some()
            || self.wind.is_some()
            || self.conditions.as_deref().is_some_and(|c| !c.trim().is_empty())
    }

    /// Dome when the conditions mention a dome or indoor venue, or when no
    /// weather was recorded at all.
    pub fn is_dome(&self) -> bool {
        if !self.is_recorded() {
            return true;
        }
        self.conditions.as_deref().is_some_and(|c| {
            let lower = c.to_ascii_lowercase();
            lower.contains("dome") || lower.contains("indoor")
        })
    }
}

/// Points per quarter for each side (regulation only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterScores {
    pub home: [u32; 4],
    pub away: [u32; 4],
}

impl QuarterScores {
    /// Home lead (negative when trailing) at the end of `quarter` (1..=4).
    pub fn home_lead_after(&self, quarter: usize) -> i64 {
        let q = quarter.clamp(1, 4);
        let home: u32 = self.home[..q].iter().sum();
        let away: u32 = self.away[..q].iter().sum();
        home as i64 - away as i64
    }

    pub fn regulation_total(&self) -> u32 {
        self.home.iter().sum::<u32>() + self.away.iter().sum::<u32>()
    }
}

/// Giveaways by each side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turnovers {
    #[serde(default)]
    pub home_interceptions: u32,
    #[serde(default)]
    pub home_fumbles: u32,
    #[serde(default)]
    pub away_interceptions: u32,
    #[serde(default)]
    pub away_fumbles: u32,
}

impl Turnovers {
    pub fn home_total(&self) -> u32 {
        self.home_interceptions + self.home_fumbles
    }

    pub fn away_total(&self) -> u32 {
        self.away_interceptions + self.away_fumbles
    }
}

/// Field goal makes and attempts by each side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kicking {
    #[serde(default)]
    pub home_fg_made: u32,
    #[serde(default)]
    pub home_fg_attempts: u32,
    #[serde(default)]
    pub away_fg_made: u32,
    #[serde(default)]
    pub away_fg_attempts: u32,
}

/// Continental US timezones a home venue can sit in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Timezone {
    Eastern,
    Central,
    Mountain,
    Pacific,
}

impl Timezone {
    pub fn utc_offset(&self) -> i32 {
        match self {
            Timezone::Eastern => -5,
            Timezone::Central => -6,
            Timezone::Mountain => -7,
            Timezone::Pacific => -8,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Timezone::Eastern => "ET",
            Timezone::Central => "CT",
            Timezone::Mountain => "MT",
            Timezone::Pacific => "PT",
        }
    }
}

impl FromStr for Timezone {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "et" | "est" | "edt" | "eastern" => Ok(Timezone::Eastern),
            "ct" | "cst" | "cdt" | "central" => Ok(Timezone::Central),
            "mt" | "mst" | "mdt" | "mountain" => Ok(Timezone::Mountain),
            "pt" | "pst" | "pdt" | "pacific" => Ok(Timezone::Pacific),
            _ => Err(ParseError::Timezone(s.to_string())),
        }
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl Serialize for Timezone {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Lenient field parsing
// ---------------------------------------------------------------------------

/// Blank strings and the literal "None" left behind by spreadsheet exports
/// mean "not recorded".
fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && s != "None" && s != "null")
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match non_blank(raw) {
        Some(text) => text.parse().map(Some).map_err(de::Error::custom),
        None => Ok(None),
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(non_blank(Option::<String>::deserialize(deserializer)?))
}

// ---------------------------------------------------------------------------
// Game record
// ---------------------------------------------------------------------------

/// One completed game. Accepts both the long camelCase field names and the
/// compact archive keys (`s`, `w`, `h`, `a`, `hs`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    #[serde(alias = "s")]
    pub season: i32,
    #[serde(alias = "w")]
    pub week: Week,
    #[serde(default, alias = "dt", deserialize_with = "lenient")]
    pub date: Option<NaiveDate>,
    #[serde(default, alias = "d", deserialize_with = "lenient")]
    pub day_of_week: Option<Weekday>,
    #[serde(default, alias = "tm", deserialize_with = "blank_as_none")]
    pub kickoff: Option<String>,
    #[serde(alias = "h")]
    pub home_team_name: String,
    #[serde(alias = "a")]
    pub away_team_name: String,
    #[serde(alias = "hs")]
    pub home_score: u32,
    #[serde(alias = "as")]
    pub away_score: u32,
    #[serde(default)]
    pub is_playoff: Option<bool>,
    #[serde(default, alias = "pt", deserialize_with = "lenient")]
    pub primetime: Option<PrimetimeSlot>,
    #[serde(default, alias = "sp")]
    pub spread: Option<f64>,
    #[serde(default, alias = "ou")]
    pub over_under: Option<f64>,
    #[serde(default, alias = "sr", deserialize_with = "lenient")]
    pub spread_result: Option<SpreadResult>,
    #[serde(default, alias = "our", deserialize_with = "lenient")]
    pub ou_result: Option<OuResult>,
    #[serde(flatten)]
    pub weather: Weather,
    #[serde(default)]
    pub quarters: Option<QuarterScores>,
    #[serde(default)]
    pub turnovers: Option<Turnovers>,
    #[serde(default)]
    pub kicking: Option<Kicking>,
    #[serde(default, deserialize_with = "lenient")]
    pub home_timezone: Option<Timezone>,
    #[serde(default, deserialize_with = "lenient")]
    pub away_timezone: Option<Timezone>,
    #[serde(default)]
    pub home_continuity: Option<f64>,
    #[serde(default)]
    pub away_continuity: Option<f64>,
}

impl GameRecord {
    /// A record with only the required fields set.
    pub fn new(
        season: i32,
        week: Week,
        home_team_name: impl Into<String>,
        away_team_name: impl Into<String>,
        home_score: u32,
        away_score: u32,
    ) -> Self {
        Self {
            season,
            week,
            date: None,
            day_of_week: None,
            kickoff: None,
            home_team_name: home_team_name.into(),
            away_team_name: away_team_name.into(),
            home_score,
            away_score,
            is_playoff: None,
            primetime: None,
            spread: None,
            over_under: None,
            spread_result: None,
            ou_result: None,
            weather: Weather::default(),
            quarters: None,
            turnovers: None,
            kicking: None,
            home_timezone: None,
            away_timezone: None,
            home_continuity: None,
            away_continuity: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.day_of_week.get_or_insert(chrono::Datelike::weekday(&date));
        self.date = Some(date);
        self
    }

    pub fn with_day(mut self, day: Weekday) -> Self {
        self.day_of_week = Some(day);
        self
    }

    pub fn with_primetime(mut self, slot: PrimetimeSlot) -> Self {
        self.primetime = Some(slot);
        self
    }

    /// Set the home-perspective line and grade it from the final score.
    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread = Some(spread);
        self.spread_result = Some(grade_spread(self.home_score, self.away_score, spread));
        self
    }

    /// Set the posted total and grade it from the final score.
    pub fn with_total(mut self, over_under: f64) -> Self {
        self.over_under = Some(over_under);
        self.ou_result = Some(grade_total(self.home_score, self.away_score, over_under));
        self
    }

    pub fn with_weather(mut self, weather: Weather) -> Self {
        self.weather = weather;
        self
    }

    pub fn with_quarters(mut self, home: [u32; 4], away: [u32; 4]) -> Self {
        self.quarters = Some(QuarterScores { home, away });
        self
    }

    pub fn with_turnovers(mut self, turnovers: Turnovers) -> Self {
        self.turnovers = Some(turnovers);
        self
    }

    pub fn with_kicking(mut self, kicking: Kicking) -> Self {
        self.kicking = Some(kicking);
        self
    }

    pub fn with_timezones(mut self, home: Timezone, away: Timezone) -> Self {
        self.home_timezone = Some(home);
        self.away_timezone = Some(away);
        self
    }

    pub fn with_continuity(mut self, home: f64, away: f64) -> Self {
        self.home_continuity = Some(home);
        self.away_continuity = Some(away);
        self
    }

    /// Fill fields that can be derived from others: the weekday from the
    /// date, and the primetime slot from weekday, kickoff, and season.
    /// Recorded values are never overwritten.
    pub fn backfill_schedule(&mut self) {
        if self.day_of_week.is_none() {
            self.day_of_week = self.date.map(|d| chrono::Datelike::weekday(&d));
        }
        if self.primetime.is_none() {
            if let (Some(day), Some(kickoff)) = (self.day_of_week, self.kickoff.as_deref()) {
                self.primetime = detect_primetime(self.season, day, kickoff);
            }
        }
    }

    pub fn total_points(&self) -> u32 {
        self.home_score + self.away_score
    }

    /// Home score minus away score.
    pub fn home_margin(&self) -> i64 {
        self.home_score as i64 - self.away_score as i64
    }

    pub fn is_tie(&self) -> bool {
        self.home_score == self.away_score
    }

    /// Playoff game by week token, or by the explicit flag when present.
    pub fn is_playoff_game(&self) -> bool {
        self.week.is_playoff() || self.is_playoff == Some(true)
    }

    pub fn winner(&self) -> Option<&str> {
        match self.home_score.cmp(&self.away_score) {
            std::cmp::Ordering::Greater => Some(&self.home_team_name),
            std::cmp::Ordering::Less => Some(&self.away_team_name),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn loser(&self) -> Option<&str> {
        match self.home_score.cmp(&self.away_score) {
            std::cmp::Ordering::Greater => Some(&self.away_team_name),
            std::cmp::Ordering::Less => Some(&self.home_team_name),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Final outcome for whichever side held a `lead` (home-positive) at
    /// some earlier point in the game.
    pub fn leader_outcome(&self, lead: i64) -> Outcome {
        let margin = if lead > 0 { self.home_margin() } else { -self.home_margin() };
        match margin.signum() {
            1 => Outcome::Win,
            -1 => Outcome::Loss,
            _ => Outcome::Tie,
        }
    }

    /// Both appearances: home first, then away.
    pub fn appearances(&self) -> [TeamGame<'_>; 2] {
        [
            TeamGame {
                game: self,
                is_home: true,
            },
            TeamGame {
                game: self,
                is_home: false,
            },
        ]
    }

    /// The appearance of `team` in this game, if it played.
    pub fn appearance_of(&self, team: &str) -> Option<TeamGame<'_>> {
        if self.home_team_name == team {
            Some(TeamGame {
                game: self,
                is_home: true,
            })
        } else if self.away_team_name == team {
            Some(TeamGame {
                game: self,
                is_home: false,
            })
        } else {
            None
        }
    }

    /// Chronological sort key: season, then date, then week.
    pub fn chronological_key(&self) -> (i32, Option<NaiveDate>, Week) {
        (self.season, self.date, self.week)
    }
}

// ---------------------------------------------------------------------------
// Outcomes and per-team views
// ---------------------------------------------------------------------------

/// Result of a game from one team's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Loss,
    Tie,
}

impl Outcome {
    pub fn code(&self) -> &'static str {
        match self {
            Outcome::Win => "W",
            Outcome::Loss => "L",
            Outcome::Tie => "T",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// One team's appearance in a game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamGame<'a> {
    pub game: &'a GameRecord,
    pub is_home: bool,
}

impl<'a> TeamGame<'a> {
    pub fn team(&self) -> &'a str {
        if self.is_home {
            &self.game.home_team_name
        } else {
            &self.game.away_team_name
        }
    }

    pub fn opponent(&self) -> &'a str {
        if self.is_home {
            &self.game.away_team_name
        } else {
            &self.game.home_team_name
        }
    }

    pub fn points_for(&self) -> u32 {
        if self.is_home {
            self.game.home_score
        } else {
            self.game.away_score
        }
    }

    pub fn points_against(&self) -> u32 {
        if self.is_home {
            self.game.away_score
        } else {
            self.game.home_score
        }
    }

    pub fn margin(&self) -> i64 {
        self.points_for() as i64 - self.points_against() as i64
    }

    pub fn outcome(&self) -> Outcome {
        match self.points_for().cmp(&self.points_against()) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Less => Outcome::Loss,
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }

    /// The line from this team's side (negative when favored).
    pub fn team_spread(&self) -> Option<f64> {
        self.game
            .spread
            .map(|s| if self.is_home { s } else { -s })
    }

    /// Spread grade from this team's side.
    pub fn spread_result(&self) -> Option<SpreadResult> {
        self.game
            .spread_result
            .map(|r| if self.is_home { r } else { r.invert() })
    }

    pub fn ou_result(&self) -> Option<OuResult> {
        self.game.ou_result
    }

    pub fn is_underdog(&self) -> bool {
        self.team_spread().is_some_and(|s| s > 0.0)
    }

    pub fn is_favorite(&self) -> bool {
        self.team_spread().is_some_and(|s| s < 0.0)
    }

    pub fn timezone(&self) -> Option<Timezone> {
        if self.is_home {
            self.game.home_timezone
        } else {
            self.game.away_timezone
        }
    }

    pub fn continuity(&self) -> Option<f64> {
        if self.is_home {
            self.game.home_continuity
        } else {
            self.game.away_continuity
        }
    }

    pub fn giveaways(&self) -> Option<u32> {
        self.game.turnovers.map(|t| {
            if self.is_home {
                t.home_total()
            } else {
                t.away_total()
            }
        })
    }

    pub fn takeaways(&self) -> Option<u32> {
        self.game.turnovers.map(|t| {
            if self.is_home {
                t.away_total()
            } else {
                t.home_total()
            }
        })
    }

    /// Field goals `(made, attempts)` for this side.
    pub fn field_goals(&self) -> Option<(u32, u32)> {
        self.game.kicking.map(|k| {
            if self.is_home {
                (k.home_fg_made, k.home_fg_attempts)
            } else {
                (k.away_fg_made, k.away_fg_attempts)
            }
        })
    }

    /// Quarter-by-quarter points for this side.
    pub fn quarter_points(&self) -> Option<[u32; 4]> {
        self.game
            .quarters
            .map(|q| if self.is_home { q.home } else { q.away })
    }
}

/// Composite key for per-team-per-season groupings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TeamSeason {
    pub team: String,
    pub season: i32,
}

impl TeamSeason {
    pub fn new(team: impl Into<String>, season: i32) -> Self {
        Self {
            team: team.into(),
            season,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_ordering_puts_playoffs_after_regular_season() {
        let mut weeks: Vec<Week> = ["SuperBowl", "2", "WildCard", "18", "10", "ConfChamp", "Division", "1"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        weeks.sort();
        let tokens: Vec<String> = weeks.iter().map(|w| w.to_string()).collect();
        assert_eq!(
            tokens,
            vec!["1", "2", "10", "18", "WildCard", "Division", "ConfChamp", "SuperBowl"]
        );
    }

    #[test]
    fn week_rejects_unknown_tokens_and_zero() {
        assert!("Preseason".parse::<Week>().is_err());
        assert!("0".parse::<Week>().is_err());
        assert_eq!("Wild Card".parse::<Week>(), Ok(Week::Playoff(PlayoffRound::WildCard)));
    }

    #[test]
    fn spread_result_double_inversion_is_identity() {
        for r in [SpreadResult::Covered, SpreadResult::Lost, SpreadResult::Push] {
            assert_eq!(r.invert().invert(), r);
        }
        assert_eq!(SpreadResult::Push.invert(), SpreadResult::Push);
        assert_eq!(SpreadResult::Covered.invert(), SpreadResult::Lost);
    }

    #[test]
    fn grade_spread_matches_home_perspective() {
        // Home favored by 3, wins by 7: covered.
        assert_eq!(grade_spread(24, 17, -3.0), SpreadResult::Covered);
        // Home favored by 7, wins by 7: push.
        assert_eq!(grade_spread(24, 17, -7.0), SpreadResult::Push);
        // Home getting 2.5, loses by 3: lost.
        assert_eq!(grade_spread(17, 20, 2.5), SpreadResult::Lost);
    }

    #[test]
    fn grade_total_compares_combined_score() {
        assert_eq!(grade_total(24, 20, 43.5), OuResult::Over);
        assert_eq!(grade_total(10, 13, 43.5), OuResult::Under);
        assert_eq!(grade_total(20, 20, 40.0), OuResult::Push);
    }

    #[test]
    fn away_view_inverts_betting_fields() {
        let game = GameRecord::new(2020, Week::Regular(1), "Home", "Away", 20, 17).with_spread(-6.5);
        let [home, away] = game.appearances();
        assert_eq!(home.spread_result(), Some(SpreadResult::Lost));
        assert_eq!(away.spread_result(), Some(SpreadResult::Covered));
        assert_eq!(home.team_spread(), Some(-6.5));
        assert_eq!(away.team_spread(), Some(6.5));
        assert!(away.is_underdog());
        assert!(home.is_favorite());
    }

    #[test]
    fn tie_is_a_valid_outcome() {
        let game = GameRecord::new(1997, Week::Regular(9), "A", "B", 10, 10);
        assert!(game.is_tie());
        assert_eq!(game.winner(), None);
        let [home, away] = game.appearances();
        assert_eq!(home.outcome(), Outcome::Tie);
        assert_eq!(away.outcome(), Outcome::Tie);
    }

    #[test]
    fn missing_weather_counts_as_dome() {
        assert!(Weather::default().is_dome());
        let outdoor = Weather {
            temperature: Some(41.0),
            conditions: Some("Cloudy".into()),
            wind: Some(8.0),
        };
        assert!(!outdoor.is_dome());
        let indoor = Weather {
            temperature: Some(72.0),
            conditions: Some("Indoors".into()),
            wind: None,
        };
        assert!(indoor.is_dome());
    }

    #[test]
    fn kickoff_parses_twelve_and_twenty_four_hour_clocks() {
        assert_eq!(parse_kickoff("8:20PM"), NaiveTime::from_hms_opt(20, 20, 0));
        assert_eq!(parse_kickoff(" 8:30 pm "), NaiveTime::from_hms_opt(20, 30, 0));
        assert_eq!(parse_kickoff("12:00AM"), NaiveTime::from_hms_opt(0, 0, 0));
        assert_eq!(parse_kickoff("13:05"), NaiveTime::from_hms_opt(13, 5, 0));
        assert_eq!(parse_kickoff("TBD"), None);
    }

    #[test]
    fn monday_night_by_day_from_1970() {
        assert_eq!(
            detect_primetime(2015, Weekday::Mon, "8:30PM"),
            Some(PrimetimeSlot::MondayNight)
        );
        assert_eq!(
            detect_primetime(1970, Weekday::Mon, "1:00PM"),
            Some(PrimetimeSlot::MondayNight)
        );
        assert_eq!(detect_primetime(1969, Weekday::Mon, "9:00PM"), None);
    }

    #[test]
    fn thursday_night_by_day_from_2006() {
        assert_eq!(
            detect_primetime(2006, Weekday::Thu, "12:30PM"),
            Some(PrimetimeSlot::ThursdayNight)
        );
        assert_eq!(detect_primetime(2005, Weekday::Thu, "8:30PM"), None);
    }

    #[test]
    fn sunday_night_needs_a_night_kickoff_from_1987() {
        assert_eq!(
            detect_primetime(1987, Weekday::Sun, "7:00PM"),
            Some(PrimetimeSlot::SundayNight)
        );
        assert_eq!(detect_primetime(1987, Weekday::Sun, "4:25PM"), None);
        assert_eq!(detect_primetime(1986, Weekday::Sun, "8:00PM"), None);
    }

    #[test]
    fn saturday_night_needs_a_night_kickoff() {
        assert_eq!(
            detect_primetime(1975, Weekday::Sat, "8:15PM"),
            Some(PrimetimeSlot::SaturdayNight)
        );
        assert_eq!(detect_primetime(2020, Weekday::Sat, "4:30PM"), None);
    }

    #[test]
    fn no_kickoff_means_no_slot() {
        assert_eq!(detect_primetime(2015, Weekday::Mon, ""), None);
        assert_eq!(detect_primetime(2015, Weekday::Wed, "8:20PM"), None);
    }

    #[test]
    fn backfill_schedule_derives_day_and_slot() {
        let json = r#"{"s":2015,"w":3,"d":"","dt":"2015-09-28","tm":"8:30PM","pt":"",
            "h":"Dallas Cowboys","a":"Philadelphia Eagles","hs":20,"as":10}"#;
        let mut game: GameRecord = serde_json::from_str(json).unwrap();
        assert_eq!(game.day_of_week, None);
        assert_eq!(game.primetime, None);

        game.backfill_schedule();
        assert_eq!(game.day_of_week, Some(Weekday::Mon));
        assert_eq!(game.primetime, Some(PrimetimeSlot::MondayNight));
    }

    #[test]
    fn backfill_schedule_keeps_recorded_values() {
        let mut game = GameRecord::new(2015, Week::Regular(3), "A", "B", 20, 10)
            .with_day(Weekday::Sun)
            .with_primetime(PrimetimeSlot::SundayNight);
        game.date = NaiveDate::from_ymd_opt(2015, 9, 28);
        game.kickoff = Some("8:30PM".into());
        game.backfill_schedule();
        assert_eq!(game.day_of_week, Some(Weekday::Sun));
        assert_eq!(game.primetime, Some(PrimetimeSlot::SundayNight));
    }

    #[test]
    fn leader_outcome_follows_the_side_that_led() {
        let game = GameRecord::new(2020, Week::Regular(1), "A", "B", 17, 20);
        assert_eq!(game.leader_outcome(7), Outcome::Loss);
        assert_eq!(game.leader_outcome(-3), Outcome::Win);
        let tie = GameRecord::new(2020, Week::Regular(1), "A", "B", 17, 17);
        assert_eq!(tie.leader_outcome(4), Outcome::Tie);
    }

    #[test]
    fn deserializes_compact_archive_keys() {
        let json = r#"{"s":2023,"w":"WildCard","d":"Sun","dt":"2024-01-14","tm":"",
            "h":"Green Bay Packers","a":"Dallas Cowboys","hs":32,"as":48,"pt":"",
            "sp":7.0,"ou":50.5,"sr":"Lost","our":"Over"}"#;
        let game: GameRecord = serde_json::from_str(json).unwrap();
        assert_eq!(game.season, 2023);
        assert_eq!(game.week, Week::Playoff(PlayoffRound::WildCard));
        assert_eq!(game.day_of_week, Some(Weekday::Sun));
        assert_eq!(game.date, NaiveDate::from_ymd_opt(2024, 1, 14));
        assert_eq!(game.kickoff, None);
        assert_eq!(game.primetime, None);
        assert_eq!(game.spread_result, Some(SpreadResult::Lost));
        assert_eq!(game.ou_result, Some(OuResult::Over));
        assert!(!game.weather.is_recorded());
    }

    #[test]
    fn deserializes_long_field_names_with_numeric_week() {
        let json = r#"{"season":1985,"week":3,"homeTeamName":"Chicago Bears",
            "awayTeamName":"Minnesota Vikings","homeScore":33,"awayScore":24,
            "primetime":"TNF","temperature":28.0,"conditions":"Snow","wind":12.0,
            "quarters":{"home":[7,10,9,7],"away":[0,3,14,7]}}"#;
        let game: GameRecord = serde_json::from_str(json).unwrap();
        assert_eq!(game.week, Week::Regular(3));
        assert_eq!(game.primetime, Some(PrimetimeSlot::ThursdayNight));
        assert_eq!(game.weather.temperature, Some(28.0));
        let q = game.quarters.unwrap();
        assert_eq!(q.home_lead_after(2), 14);
        assert_eq!(q.regulation_total(), game.total_points());
    }
}
