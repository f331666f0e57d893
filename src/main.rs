use anyhow::Context;
use log::{info, warn};
use mlb_api::client::MlbApi;
use mlb_schedule::schedule::service::ScheduleService;
use mlb_schedule::server;
use mlb_schedule::state::app_settings::AppSettings;
use mlb_schedule::state::directory::TeamDirectory;
use mlb_schedule::state::refresher::DirectoryRefresher;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    better_panic::install();
    init_logging()?;

    let settings = AppSettings::load()?;
    let api = MlbApi::new(settings.api_base.clone(), settings.http_timeout)
        .with_season(settings.teams_season);
    let directory = TeamDirectory::new();

    // Team directory refresh thread (first fetch immediately, then every interval)
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let refresher = DirectoryRefresher::new(
        api.clone(),
        directory.clone(),
        settings.refresh_interval,
        shutdown_rx,
    );
    let refresher_task = tokio::spawn(refresher.run());

    let service = Arc::new(ScheduleService::new(directory, api));
    let app = server::router(service, settings.team_not_found);

    let listener = TcpListener::bind(settings.bind)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind))?;
    info!("serving schedule API on http://{}", settings.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    let _ = shutdown_tx.send(true);
    if let Err(e) = refresher_task.await {
        warn!("team directory refresher ended abnormally: {e}");
    }

    Ok(())
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("mlb-schedule {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "mlb-schedule - a team's MLB schedule for a date, its own games first

Usage:
  mlb-schedule
  mlb-schedule --help
  mlb-schedule --version

Endpoints:
  GET /api/v1/schedule?teamId=<id>&date=<YYYY-MM-DD>
  GET /api/v1/liveness
  GET /api/v1/readiness

Environment:
  MLB_SCHEDULE_BIND            Listen address (default 0.0.0.0:8080)
  MLB_API_BASE                 Stats API base URL (default https://statsapi.mlb.com/api/v1)
  MLB_TEAMS_SEASON             Season filter for the team directory fetch
  MLB_DIRECTORY_REFRESH_SECS   Team directory refresh interval (default 1800)
  MLB_HTTP_TIMEOUT_SECS        Upstream request timeout (default 10)
  MLB_TEAM_NOT_FOUND_STATUS    404 (default) or 400 for unknown team ids
  RUST_LOG                     Log filter (default info)"
}

fn init_logging() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("could not listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
