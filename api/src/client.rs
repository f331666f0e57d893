use crate::statsapi::{ApiDate, ApiGame, ApiScheduleTeam, ApiTeam, ScheduleResponse, TeamsResponse};
use crate::{
    AbstractState, DoubleHeader, Game, GameStatus, LeagueRecord, Matchup, ScheduleDay,
    ScheduleTeam, Team, TeamRef,
};
use chrono::NaiveDate;
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const STATS_API_V1: &str = "https://statsapi.mlb.com/api/v1";
const MLB_SPORT_ID: u32 = 1;

/// MLB Stats API client for the team directory and daily schedule.
#[derive(Debug, Clone)]
pub struct MlbApi {
    client: Client,
    base_url: String,
    timeout: Duration,
    season: Option<u16>,
}

impl Default for MlbApi {
    fn default() -> Self {
        Self::new(STATS_API_V1, Duration::from_secs(10))
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    /// Decoded fine, but a field the domain model needs is missing or invalid.
    Malformed(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Malformed(msg) => write!(f, "Malformed payload: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// True when the upstream answered but the body broke the expected shape.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, ApiError::Parsing(..) | ApiError::Malformed(_))
    }
}

impl MlbApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("mlb-api/", env!("CARGO_PKG_VERSION")))
                .connect_timeout(timeout)
                .build()
                .unwrap_or_default(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            timeout,
            season: None,
        }
    }

    /// Restrict the team directory fetch to one season's clubs.
    pub fn with_season(mut self, season: Option<u16>) -> Self {
        self.season = season;
        self
    }

    /// Fetch every MLB club as an `{id, name}` directory entry.
    /// Records missing either field are skipped.
    pub async fn fetch_teams(&self) -> ApiResult<Vec<Team>> {
        let mut url = format!("{}/teams?sportId={MLB_SPORT_ID}", self.base_url);
        if let Some(season) = self.season {
            url.push_str(&format!("&season={season}"));
        }
        let raw: TeamsResponse = self.get(&url).await?;
        let teams = raw
            .teams
            .unwrap_or_default()
            .iter()
            .filter_map(map_team)
            .collect();
        Ok(teams)
    }

    /// Fetch the day buckets the schedule endpoint returns for `date`.
    /// Normally exactly one; callers decide what to do otherwise.
    pub async fn fetch_schedule(&self, date: NaiveDate) -> ApiResult<Vec<ScheduleDay>> {
        let url = format!(
            "{}/schedule?date={}&sportId={MLB_SPORT_ID}&language=en",
            self.base_url,
            date.format("%Y-%m-%d")
        );
        let raw: ScheduleResponse = self.get(&url).await?;
        raw.dates.unwrap_or_default().into_iter().map(map_date).collect()
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.to_owned()))?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Mapping: Stats API wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_team(t: &ApiTeam) -> Option<Team> {
    Some(Team {
        id: t.id?,
        name: t.name.clone()?,
    })
}

fn map_date(d: ApiDate) -> ApiResult<ScheduleDay> {
    let raw_date = d
        .date
        .ok_or_else(|| ApiError::Malformed("schedule date bucket without a date".into()))?;
    let date = NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d")
        .map_err(|e| ApiError::Malformed(format!("invalid bucket date {raw_date:?}: {e}")))?;
    let games = d.games.into_iter().map(map_game).collect();
    Ok(ScheduleDay::new(date, games))
}

fn map_game(g: ApiGame) -> Game {
    let status = g.status.unwrap_or_default();
    let teams = g.teams.unwrap_or_default();

    Game {
        game_pk: g.game_pk.unwrap_or_default(),
        game_type: g.game_type.unwrap_or_default(),
        season: g.season.unwrap_or_default(),
        game_date: g.game_date.unwrap_or_default(),
        official_date: g.official_date.unwrap_or_default(),
        status: GameStatus {
            abstract_state: AbstractState::from_wire(
                status.abstract_game_code.as_deref(),
                status.abstract_game_state.as_deref(),
            ),
            detailed_state: status.detailed_state.unwrap_or_default(),
            start_time_tbd: status.start_time_tbd,
        },
        teams: Matchup {
            away: map_schedule_team(teams.away.unwrap_or_default()),
            home: map_schedule_team(teams.home.unwrap_or_default()),
        },
        double_header: DoubleHeader::from_code(g.double_header.as_deref()),
        game_number: g.game_number.unwrap_or(1),
    }
}

fn map_schedule_team(t: ApiScheduleTeam) -> ScheduleTeam {
    let team = t.team.unwrap_or_default();
    ScheduleTeam {
        team: TeamRef {
            id: team.id.unwrap_or_default(),
            name: team.name.unwrap_or_default(),
        },
        score: t.score,
        league_record: t.league_record.map(|r| LeagueRecord {
            wins: r.wins.unwrap_or_default(),
            losses: r.losses.unwrap_or_default(),
            pct: r.pct.unwrap_or_default(),
        }),
        is_winner: t.is_winner,
    }
}
