use crate::state::directory::TeamDirectory;
use crate::state::sources::TeamSource;
use log::{error, info};
use mlb_api::client::ApiResult;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{MissedTickBehavior, interval};

/// Periodic team directory refresh, every 30 minutes by default.
/// The first fetch runs immediately so the directory fills in at startup.
/// A failed fetch leaves the committed snapshot alone until the next tick.
pub struct DirectoryRefresher<S> {
    source: S,
    directory: TeamDirectory,
    period: Duration,
    shutdown: watch::Receiver<bool>,
}

impl<S: TeamSource> DirectoryRefresher<S> {
    pub fn new(
        source: S,
        directory: TeamDirectory,
        period: Duration,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self { source, directory, period, shutdown }
    }

    /// Runs until the shutdown flag flips to `true` or its sender is dropped.
    /// An in-flight fetch is abandoned on shutdown.
    pub async fn run(self) {
        let Self { source, directory, period, mut shutdown } = self;
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = wait_for_shutdown(&mut shutdown) => break,
                _ = async {
                    ticker.tick().await;
                    let _ = refresh_once(&source, &directory).await;
                } => {}
            }
        }

        info!("team directory refresher stopped");
    }
}

/// Fetch the full team set and commit it. Returns the new generation.
pub async fn refresh_once<S: TeamSource>(source: &S, directory: &TeamDirectory) -> ApiResult<u64> {
    match source.fetch_teams().await {
        Ok(teams) => {
            let count = teams.len();
            let generation = directory.replace(teams).await;
            info!("team directory refreshed: {count} teams (generation {generation})");
            Ok(generation)
        }
        Err(e) => {
            error!("team directory refresh failed, keeping current snapshot: {e}");
            Err(e)
        }
    }
}

async fn wait_for_shutdown(shutdown: &mut watch::Receiver<bool>) {
    // A dropped sender counts as shutdown too.
    let _ = shutdown.wait_for(|stop| *stop).await;
}
