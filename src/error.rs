use mlb_api::client::ApiError;
use thiserror::Error;

/// Every way a schedule request can fail. All of them are answered with an
/// error body; none of them stop the process.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("team {0} not found")]
    TeamNotFound(u32),

    #[error("schedule source unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("schedule source contract violation: {0}")]
    UpstreamContractViolation(String),

    #[error("could not order double header: {0}")]
    NormalizationFailure(String),
}

impl From<ApiError> for ScheduleError {
    fn from(err: ApiError) -> Self {
        if err.is_contract_violation() {
            ScheduleError::UpstreamContractViolation(err.to_string())
        } else {
            ScheduleError::UpstreamUnavailable(err.to_string())
        }
    }
}
