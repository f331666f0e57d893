use crate::error::ScheduleError;
use crate::schedule::normalizer::{NormalizedScheduleDay, normalize};
use crate::state::directory::TeamDirectory;
use crate::state::sources::ScheduleSource;
use chrono::NaiveDate;
use log::debug;

/// Answers one schedule request: validate, fetch, normalize.
///
/// Upstream failures are not retried here; a failed fetch fails the request.
pub struct ScheduleService<S> {
    directory: TeamDirectory,
    source: S,
}

impl<S: ScheduleSource> ScheduleService<S> {
    pub fn new(directory: TeamDirectory, source: S) -> Self {
        Self { directory, source }
    }

    pub fn directory(&self) -> &TeamDirectory {
        &self.directory
    }

    pub async fn get_schedule(
        &self,
        team_id: &str,
        date: &str,
    ) -> Result<NormalizedScheduleDay, ScheduleError> {
        let id = parse_team_id(team_id)?;
        let my_team = self
            .directory
            .resolve(id)
            .await
            .ok_or(ScheduleError::TeamNotFound(id))?;
        let date = parse_date(date)?;

        debug!("fetching schedule for {date} ({my_team})");
        let days = self.source.fetch_schedule(date).await?;
        let day = match <[_; 1]>::try_from(days) {
            Ok([day]) => day,
            Err(days) => {
                return Err(ScheduleError::UpstreamContractViolation(format!(
                    "expected one date bucket for {date}, got {}",
                    days.len()
                )));
            }
        };
        if day.date != date {
            return Err(ScheduleError::UpstreamContractViolation(format!(
                "requested {date}, schedule source answered for {}",
                day.date
            )));
        }

        normalize(&my_team, &day)
    }
}

fn parse_team_id(raw: &str) -> Result<u32, ScheduleError> {
    raw.trim()
        .parse()
        .map_err(|e| ScheduleError::InvalidRequest(format!("invalid teamId {raw:?}: {e}")))
}

/// Strict `YYYY-MM-DD`: zero-padded, no sign, no surrounding text.
fn parse_date(raw: &str) -> Result<NaiveDate, ScheduleError> {
    let invalid = || ScheduleError::InvalidRequest(format!("invalid date {raw:?}, expected YYYY-MM-DD"));
    let bytes = raw.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlb_api::client::{ApiError, ApiResult};
    use mlb_api::{Game, Matchup, ScheduleDay, ScheduleTeam, Team, TeamRef};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a canned answer and counts how often it was asked.
    struct CannedSchedule {
        answer: fn() -> ApiResult<Vec<ScheduleDay>>,
        calls: AtomicUsize,
    }

    impl CannedSchedule {
        fn new(answer: fn() -> ApiResult<Vec<ScheduleDay>>) -> Self {
            Self { answer, calls: AtomicUsize::new(0) }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ScheduleSource for CannedSchedule {
        async fn fetch_schedule(&self, _date: NaiveDate) -> ApiResult<Vec<ScheduleDay>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.answer)()
        }
    }

    fn opening_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
    }

    fn game(pk: u64, home: &str, away: &str) -> Game {
        Game {
            game_pk: pk,
            teams: Matchup {
                home: ScheduleTeam { team: TeamRef { id: 0, name: home.into() }, ..Default::default() },
                away: ScheduleTeam { team: TeamRef { id: 0, name: away.into() }, ..Default::default() },
            },
            ..Default::default()
        }
    }

    fn opening_day_slate() -> ApiResult<Vec<ScheduleDay>> {
        Ok(vec![ScheduleDay::new(
            opening_day(),
            vec![
                game(1, "Chicago Cubs", "St. Louis Cardinals"),
                game(2, "Boston Red Sox", "New York Yankees"),
                game(3, "Atlanta Braves", "New York Mets"),
                game(4, "Seattle Mariners", "Houston Astros"),
                game(5, "Los Angeles Dodgers", "San Diego Padres"),
            ],
        )])
    }

    async fn service_with(answer: fn() -> ApiResult<Vec<ScheduleDay>>) -> ScheduleService<CannedSchedule> {
        let directory = TeamDirectory::new();
        directory
            .replace(vec![Team { id: 121, name: "New York Mets".into() }])
            .await;
        ScheduleService::new(directory, CannedSchedule::new(answer))
    }

    #[tokio::test]
    async fn returns_my_team_first() {
        let service = service_with(opening_day_slate).await;
        let day = service.get_schedule("121", "2024-04-01").await.unwrap();

        assert_eq!(day.date(), opening_day());
        let pks: Vec<u64> = day.games().iter().map(|g| g.game_pk).collect();
        assert_eq!(pks, vec![3, 1, 2, 4, 5]);
    }

    #[tokio::test]
    async fn malformed_team_id_is_invalid_request() {
        let service = service_with(opening_day_slate).await;
        for raw in ["", "mets", "12.5", "-1"] {
            let err = service.get_schedule(raw, "2024-04-01").await.unwrap_err();
            assert!(matches!(err, ScheduleError::InvalidRequest(_)), "{raw}: {err}");
        }
        assert_eq!(service.source.calls(), 0);
    }

    #[tokio::test]
    async fn unknown_team_is_not_found() {
        let service = service_with(opening_day_slate).await;
        let err = service.get_schedule("147", "2024-04-01").await.unwrap_err();
        assert!(matches!(err, ScheduleError::TeamNotFound(147)));
        assert_eq!(service.source.calls(), 0);
    }

    #[tokio::test]
    async fn every_team_is_unknown_before_first_refresh() {
        let service = ScheduleService::new(TeamDirectory::new(), CannedSchedule::new(opening_day_slate));
        let err = service.get_schedule("121", "2024-04-01").await.unwrap_err();
        assert!(matches!(err, ScheduleError::TeamNotFound(121)));
    }

    #[tokio::test]
    async fn malformed_date_never_reaches_upstream() {
        let service = service_with(opening_day_slate).await;
        for raw in ["2024-13-40", "2024-4-1", "04/01/2024", "2024-04-01T00:00:00Z", "+2024-04-01", ""] {
            let err = service.get_schedule("121", raw).await.unwrap_err();
            assert!(matches!(err, ScheduleError::InvalidRequest(_)), "{raw}: {err}");
        }
        assert_eq!(service.source.calls(), 0);
    }

    #[tokio::test]
    async fn upstream_failure_is_unavailable_and_not_retried() {
        let service = service_with(|| Err(ApiError::Other("connection reset".into()))).await;
        let err = service.get_schedule("121", "2024-04-01").await.unwrap_err();
        assert!(matches!(err, ScheduleError::UpstreamUnavailable(_)), "{err}");
        assert_eq!(service.source.calls(), 1);
    }

    #[tokio::test]
    async fn wrong_bucket_count_is_contract_violation() {
        let empty = service_with(|| Ok(vec![])).await;
        let err = empty.get_schedule("121", "2024-04-01").await.unwrap_err();
        assert!(matches!(err, ScheduleError::UpstreamContractViolation(_)), "{err}");

        let doubled = service_with(|| {
            let mut days = opening_day_slate()?;
            days.push(days[0].clone());
            Ok(days)
        })
        .await;
        let err = doubled.get_schedule("121", "2024-04-01").await.unwrap_err();
        assert!(matches!(err, ScheduleError::UpstreamContractViolation(_)), "{err}");
    }

    #[tokio::test]
    async fn bucket_for_another_date_is_contract_violation() {
        let service = service_with(opening_day_slate).await;
        let err = service.get_schedule("121", "2024-04-02").await.unwrap_err();
        assert!(matches!(err, ScheduleError::UpstreamContractViolation(_)), "{err}");
    }

    #[tokio::test]
    async fn three_games_for_my_team_is_contract_violation() {
        let service = service_with(|| {
            Ok(vec![ScheduleDay::new(
                opening_day(),
                vec![
                    game(1, "New York Mets", "Atlanta Braves"),
                    game(2, "Atlanta Braves", "New York Mets"),
                    game(3, "New York Mets", "Atlanta Braves"),
                ],
            )])
        })
        .await;
        let err = service.get_schedule("121", "2024-04-01").await.unwrap_err();
        assert!(matches!(err, ScheduleError::UpstreamContractViolation(_)), "{err}");
    }
}
