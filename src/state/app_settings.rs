use anyhow::{Context, bail};
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_REFRESH_SECS: u64 = 30 * 60;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Status answered when a team id is missing from the directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotFoundPolicy {
    #[default]
    NotFound,
    BadRequest,
}

impl NotFoundPolicy {
    pub fn status_code(self) -> u16 {
        match self {
            NotFoundPolicy::NotFound => 404,
            NotFoundPolicy::BadRequest => 400,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub bind: SocketAddr,
    pub api_base: String,
    pub teams_season: Option<u16>,
    pub refresh_interval: Duration,
    pub http_timeout: Duration,
    pub team_not_found: NotFoundPolicy,
}

impl AppSettings {
    pub fn load() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset or blank keys use defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind = get("MLB_SCHEDULE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_owned());
        let bind = bind
            .trim()
            .parse::<SocketAddr>()
            .with_context(|| format!("MLB_SCHEDULE_BIND is not a socket address: {bind}"))?;

        let teams_season = get("MLB_TEAMS_SEASON")
            .map(|s| s.trim().parse::<u16>())
            .transpose()
            .context("MLB_TEAMS_SEASON must be a year")?;

        let refresh_secs = positive_secs(get("MLB_DIRECTORY_REFRESH_SECS"), DEFAULT_REFRESH_SECS)
            .context("MLB_DIRECTORY_REFRESH_SECS")?;
        let timeout_secs = positive_secs(get("MLB_HTTP_TIMEOUT_SECS"), DEFAULT_HTTP_TIMEOUT_SECS)
            .context("MLB_HTTP_TIMEOUT_SECS")?;

        let team_not_found = match get("MLB_TEAM_NOT_FOUND_STATUS").as_deref().map(str::trim) {
            None | Some("404") => NotFoundPolicy::NotFound,
            Some("400") => NotFoundPolicy::BadRequest,
            Some(other) => bail!("MLB_TEAM_NOT_FOUND_STATUS must be 404 or 400, got {other}"),
        };

        Ok(Self {
            bind,
            api_base: get("MLB_API_BASE").unwrap_or_else(|| mlb_api::client::STATS_API_V1.to_owned()),
            teams_season,
            refresh_interval: Duration::from_secs(refresh_secs),
            http_timeout: Duration::from_secs(timeout_secs),
            team_not_found,
        })
    }
}

fn positive_secs(raw: Option<String>, default: u64) -> anyhow::Result<u64> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let secs: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("expected a number of seconds, got {raw}"))?;
    if secs == 0 {
        bail!("interval must be greater than zero");
    }
    Ok(secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> anyhow::Result<AppSettings> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_match_reference_deployment() {
        let settings = settings_from(&[]).unwrap();
        assert_eq!(settings.bind, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(settings.api_base, "https://statsapi.mlb.com/api/v1");
        assert_eq!(settings.teams_season, None);
        assert_eq!(settings.refresh_interval, Duration::from_secs(1800));
        assert_eq!(settings.http_timeout, Duration::from_secs(10));
        assert_eq!(settings.team_not_found, NotFoundPolicy::NotFound);
    }

    #[test]
    fn overrides_are_applied() {
        let settings = settings_from(&[
            ("MLB_SCHEDULE_BIND", "127.0.0.1:9000"),
            ("MLB_TEAMS_SEASON", "2021"),
            ("MLB_DIRECTORY_REFRESH_SECS", "60"),
            ("MLB_TEAM_NOT_FOUND_STATUS", "400"),
        ])
        .unwrap();
        assert_eq!(settings.bind.port(), 9000);
        assert_eq!(settings.teams_season, Some(2021));
        assert_eq!(settings.refresh_interval, Duration::from_secs(60));
        assert_eq!(settings.team_not_found.status_code(), 400);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let settings = settings_from(&[("MLB_HTTP_TIMEOUT_SECS", "  ")]).unwrap();
        assert_eq!(settings.http_timeout, Duration::from_secs(10));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(settings_from(&[("MLB_DIRECTORY_REFRESH_SECS", "0")]).is_err());
        assert!(settings_from(&[("MLB_HTTP_TIMEOUT_SECS", "soon")]).is_err());
        assert!(settings_from(&[("MLB_TEAM_NOT_FOUND_STATUS", "410")]).is_err());
        assert!(settings_from(&[("MLB_SCHEDULE_BIND", "localhost")]).is_err());
    }
}
