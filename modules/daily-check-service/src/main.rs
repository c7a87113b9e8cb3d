//! Daily Check Service — records a member's daily well-being ratings.
//!
//! Serves the JSON API and an index page on the same port.
//! Default: http://0.0.0.0:443/

mod config;
mod dashboard;
mod day;
mod error;
mod repository;
mod routes;
mod service;
mod store;

use config::Config;
use error::Result;
use repository::Repository;
use routes::AppState;
use service::{DayService, SystemClock};
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;
use store::Store;
use tokio::sync::oneshot;

/// How long in-flight requests may keep running after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(20);

#[tokio::main]
async fn main() {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if !dotenv_loaded {
        log::warn!("no env file loaded");
    }

    if let Err(e) = run(Config::from_env()).await {
        log::error!("daily check service failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<()> {
    log::info!("Opening database at: {}", config.db_path.display());
    let store = Arc::new(Store::open(&config.db_path)?);

    let service = DayService::new(Repository::new(store.clone()), Box::new(SystemClock));
    let state = Arc::new(AppState {
        service,
        api_url: config.api_url.clone(),
    });
    let app = routes::router(state, &config.web_dir);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("Daily Check Service listening on http://{}", addr);

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                stop_rx.await.ok();
            })
            .into_future(),
    );

    tokio::select! {
        joined = &mut server => {
            store.flush()?;
            return match joined {
                Ok(served) => Ok(served?),
                Err(e) => Err(std::io::Error::other(e).into()),
            };
        }
        _ = shutdown_signal() => {}
    }

    log::warn!("shutting down from quit signaled");
    stop_tx.send(()).ok();

    match tokio::time::timeout(SHUTDOWN_GRACE, &mut server).await {
        Ok(Ok(served)) => served?,
        Ok(Err(e)) => log::error!("server task failed during shutdown: {}", e),
        Err(_) => {
            log::error!(
                "in-flight requests still running after {}s, forcing shutdown",
                SHUTDOWN_GRACE.as_secs()
            );
            server.abort();
        }
    }

    store.flush()?;
    log::info!("Daily Check Service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                log::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
