use crate::error::ScheduleError;
use chrono::{DateTime, FixedOffset, NaiveDate};
use log::warn;
use mlb_api::{DoubleHeader, Game, ScheduleDay};
use serde::Serialize;

/// A schedule day with the requested team's games moved to the front.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormalizedScheduleDay(ScheduleDay);

impl NormalizedScheduleDay {
    pub fn date(&self) -> NaiveDate {
        self.0.date
    }

    pub fn games(&self) -> &[Game] {
        &self.0.games
    }

    pub fn into_inner(self) -> ScheduleDay {
        self.0
    }
}

/// Reorder `day` so that games featuring `my_team` come first.
///
/// Other games keep their received relative order. Two games for `my_team`
/// are treated as a double header and ordered by [`order_double_header`];
/// three or more is rejected. `day` itself is never modified.
pub fn normalize(my_team: &str, day: &ScheduleDay) -> Result<NormalizedScheduleDay, ScheduleError> {
    let (mine, others): (Vec<&Game>, Vec<&Game>) =
        day.games.iter().partition(|game| game.involves(my_team));

    let mut games: Vec<Game> = match mine.len() {
        0 | 1 => mine.into_iter().cloned().collect(),
        2 => order_double_header(mine[0], mine[1])?.to_vec(),
        n => {
            return Err(ScheduleError::UpstreamContractViolation(format!(
                "{n} games for {my_team} on {}, at most two are supported",
                day.date
            )));
        }
    };
    games.extend(others.into_iter().cloned());

    Ok(NormalizedScheduleDay(ScheduleDay {
        date: day.date,
        total_games: day.total_games,
        games,
    }))
}

/// Order the two games of a double header for display.
///
/// The marker on the first received game picks how chronology is decided:
/// single admission puts the game with a to-be-determined start second, split
/// admission compares start timestamps, anything else keeps received order.
/// If the chronologically second game is live it is listed first.
pub fn order_double_header(first: &Game, second: &Game) -> Result<[Game; 2], ScheduleError> {
    let (chrono_first, chrono_second) = match first.double_header {
        DoubleHeader::SingleAdmission => {
            match (first.status.start_time_tbd, second.status.start_time_tbd) {
                (false, true) => (first, second),
                (true, false) => (second, first),
                (tbd, _) => {
                    warn!(
                        "single-admission double header {} / {} has startTimeTBD={tbd} on both games, keeping received order",
                        first.game_pk, second.game_pk
                    );
                    (first, second)
                }
            }
        }
        DoubleHeader::SplitAdmission => {
            if start_time(first)? > start_time(second)? {
                (second, first)
            } else {
                (first, second)
            }
        }
        DoubleHeader::None => (first, second),
    };

    if chrono_second.is_live() {
        Ok([chrono_second.clone(), chrono_first.clone()])
    } else {
        Ok([chrono_first.clone(), chrono_second.clone()])
    }
}

fn start_time(game: &Game) -> Result<DateTime<FixedOffset>, ScheduleError> {
    DateTime::parse_from_rfc3339(&game.game_date).map_err(|e| {
        ScheduleError::NormalizationFailure(format!(
            "game {} has unparseable gameDate {:?}: {e}",
            game.game_pk, game.game_date
        ))
    })
}
