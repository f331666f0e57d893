pub mod client;
pub mod statsapi;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Domain types: clean model, independent of Stats API wire format
// ---------------------------------------------------------------------------

/// One entry of the team directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Team {
    pub id: u32,
    pub name: String,
}

/// A single date's worth of games, in the order the schedule source sent them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDay {
    pub date: NaiveDate,
    pub total_games: usize,
    pub games: Vec<Game>,
}

impl ScheduleDay {
    pub fn new(date: NaiveDate, games: Vec<Game>) -> Self {
        Self { date, total_games: games.len(), games }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub game_pk: u64,
    pub game_type: String,
    pub season: String,
    /// ISO 8601 timestamp exactly as the upstream sent it. Parsed lazily,
    /// only when a split-admission double header has to be ordered.
    pub game_date: String,
    pub official_date: String,
    pub status: GameStatus,
    pub teams: Matchup,
    pub double_header: DoubleHeader,
    pub game_number: u8,
}

impl Game {
    pub fn is_live(&self) -> bool {
        self.status.abstract_state == AbstractState::Live
    }

    /// True when either side's display name matches `team_name`, ignoring case.
    pub fn involves(&self, team_name: &str) -> bool {
        let wanted = team_name.to_lowercase();
        self.teams.home.team.name.to_lowercase() == wanted
            || self.teams.away.team.name.to_lowercase() == wanted
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Matchup {
    pub away: ScheduleTeam,
    pub home: ScheduleTeam,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleTeam {
    pub team: TeamRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub league_record: Option<LeagueRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_winner: Option<bool>,
}

/// A team as named by the schedule feed at fetch time. Not tied to the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TeamRef {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeagueRecord {
    pub wins: u16,
    pub losses: u16,
    pub pct: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatus {
    #[serde(rename = "abstractGameState")]
    pub abstract_state: AbstractState,
    pub detailed_state: String,
    #[serde(rename = "startTimeTBD")]
    pub start_time_tbd: bool,
}

/// Coarse game state. Codes the upstream adds later are carried as `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AbstractState {
    #[default]
    Preview,
    Live,
    Final,
    Other(String),
}

impl AbstractState {
    /// Map the upstream `abstractGameCode` ("P", "L", "F"), falling back to
    /// the long-form `abstractGameState` when the code is missing.
    pub fn from_wire(code: Option<&str>, state: Option<&str>) -> Self {
        match (code, state) {
            (Some("P"), _) | (None, Some("Preview")) => AbstractState::Preview,
            (Some("L"), _) | (None, Some("Live")) => AbstractState::Live,
            (Some("F"), _) | (None, Some("Final")) => AbstractState::Final,
            (_, Some(other)) | (Some(other), None) => AbstractState::Other(other.to_owned()),
            (None, None) => AbstractState::default(),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AbstractState::Preview => "Preview",
            AbstractState::Live => "Live",
            AbstractState::Final => "Final",
            AbstractState::Other(code) => code,
        }
    }
}

impl Serialize for AbstractState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum DoubleHeader {
    #[default]
    #[serde(rename = "N")]
    None,
    /// Traditional twin bill: one ticket, second game starts after the first ends.
    #[serde(rename = "Y")]
    SingleAdmission,
    /// Separately ticketed games with their own start times.
    #[serde(rename = "S")]
    SplitAdmission,
}

impl DoubleHeader {
    /// Absent or unrecognised markers are treated as "not a double header".
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("Y") => DoubleHeader::SingleAdmission,
            Some("S") => DoubleHeader::SplitAdmission,
            _ => DoubleHeader::None,
        }
    }
}
