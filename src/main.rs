use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use flowline::config::Config;
use flowline::modules::time_entries::adapters::in_memory_store::InMemoryTimerStore;
use flowline::modules::time_entries::adapters::in_memory_tasks::InMemoryTaskDirectory;
use flowline::shared::infrastructure::realtime::hub::SyncHub;
use flowline::shell;
use flowline::shell::state::AppState;
use flowline::shell::workers::TimerBroadcaster;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    let store: Arc<InMemoryTimerStore> = Arc::new(InMemoryTimerStore::new());
    let tasks: Arc<InMemoryTaskDirectory> = Arc::new(InMemoryTaskDirectory::new());
    let hub = Arc::new(SyncHub::new());

    let state = AppState::new(
        Arc::clone(&store) as _,
        Arc::clone(&tasks) as _,
        Arc::clone(&hub),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let broadcaster = TimerBroadcaster::new(
        store,
        tasks,
        hub,
        config.broadcast_interval,
        config.broadcast_backoff,
    );
    let worker = tokio::spawn(broadcaster.run(shutdown_rx));

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "listening");
    axum::serve(listener, shell::http::router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await?;

    let _ = shutdown_tx.send(true);
    let _ = worker.await;

    Ok(())
}
