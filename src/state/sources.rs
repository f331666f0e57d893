use chrono::NaiveDate;
use mlb_api::client::{ApiResult, MlbApi};
use mlb_api::{ScheduleDay, Team};
use std::future::Future;

/// Upstream list of every team, consumed wholesale on each refresh.
pub trait TeamSource: Send + Sync {
    fn fetch_teams(&self) -> impl Future<Output = ApiResult<Vec<Team>>> + Send;
}

/// Upstream schedule for one calendar date, as day buckets.
pub trait ScheduleSource: Send + Sync {
    fn fetch_schedule(&self, date: NaiveDate)
    -> impl Future<Output = ApiResult<Vec<ScheduleDay>>> + Send;
}

impl TeamSource for MlbApi {
    async fn fetch_teams(&self) -> ApiResult<Vec<Team>> {
        MlbApi::fetch_teams(self).await
    }
}

impl ScheduleSource for MlbApi {
    async fn fetch_schedule(&self, date: NaiveDate) -> ApiResult<Vec<ScheduleDay>> {
        MlbApi::fetch_schedule(self, date).await
    }
}
