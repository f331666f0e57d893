//! MLB Stats API raw wire types: serde shapes for deserializing responses.
//! These map to the clean domain types in client.rs.
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Teams  (GET /teams?sportId=1)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamsResponse {
    pub copyright: Option<String>,
    pub teams: Option<Vec<ApiTeam>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ApiTeam {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub link: Option<String>,
    pub abbreviation: Option<String>,
    pub spring_league: Option<ApiLeagueRef>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ApiLeagueRef {
    pub id: Option<u32>,
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Schedule  (GET /schedule?date=YYYY-MM-DD&sportId=1)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub copyright: Option<String>,
    pub total_games: Option<u32>,
    pub total_games_in_progress: Option<u32>,
    pub dates: Option<Vec<ApiDate>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ApiDate {
    pub date: Option<String>,
    pub total_games: Option<u32>,
    #[serde(default)]
    pub games: Vec<ApiGame>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ApiGame {
    pub game_pk: Option<u64>,
    pub link: Option<String>,
    pub game_type: Option<String>,
    pub season: Option<String>,
    pub game_date: Option<String>, // ISO 8601, e.g. "2024-04-01T17:05:00Z"
    pub official_date: Option<String>,
    pub status: Option<ApiStatus>,
    pub teams: Option<ApiMatchup>,
    /// "N", "Y" (single admission) or "S" (split admission).
    pub double_header: Option<String>,
    pub game_number: Option<u8>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ApiStatus {
    pub abstract_game_state: Option<String>,
    pub abstract_game_code: Option<String>,
    pub coded_game_state: Option<String>,
    pub detailed_state: Option<String>,
    pub status_code: Option<String>,
    #[serde(rename = "startTimeTBD", default)]
    pub start_time_tbd: bool,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ApiMatchup {
    pub away: Option<ApiScheduleTeam>,
    pub home: Option<ApiScheduleTeam>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ApiScheduleTeam {
    pub league_record: Option<ApiLeagueRecord>,
    pub score: Option<u16>,
    pub team: Option<ApiTeam>,
    pub is_winner: Option<bool>,
    pub split_squad: Option<bool>,
    pub series_number: Option<u16>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ApiLeagueRecord {
    pub wins: Option<u16>,
    pub losses: Option<u16>,
    pub pct: Option<String>,
}
