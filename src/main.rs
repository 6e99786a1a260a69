//! Fundflow - fund transfer orchestration service entry point.
//!
//! Bootstrap order: CLI flags -> config -> logging -> PostgreSQL (with
//! bounded retry) -> schema -> gateways -> orchestrator -> HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use fundflow::account::HttpAccountGateway;
use fundflow::config::AppConfig;
use fundflow::ledger::HttpLedgerGateway;
use fundflow::reference::UuidReferenceAllocator;
use fundflow::transfer::api::{AppState, create_app};
use fundflow::transfer::{FundTransferOrchestrator, PgTransferStore};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

async fn connect_postgres(url: &str) -> anyhow::Result<PgPool> {
    let max_retries = 10;
    let mut retry_delay_ms = 1000u64;

    for attempt in 1..=max_retries {
        match PgPoolOptions::new()
            .max_connections(10)
            .connect(url)
            .await
        {
            Ok(pool) => {
                tracing::info!(attempt, "connected to PostgreSQL");
                return Ok(pool);
            }
            Err(e) if attempt < max_retries => {
                tracing::warn!(
                    attempt,
                    error = %e,
                    "PostgreSQL connection failed, retrying in {}ms",
                    retry_delay_ms
                );
                tokio::time::sleep(Duration::from_millis(retry_delay_ms)).await;
                retry_delay_ms = (retry_delay_ms * 2).min(30_000);
            }
            Err(e) => return Err(e).context("failed to connect to PostgreSQL"),
        }
    }
    unreachable!("connect loop either returns or errors")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env);
    let _log_guard = fundflow::logging::init_logging(&config);

    tracing::info!("Starting fundflow fund-transfer service in {} mode", env);

    let pool = connect_postgres(&config.postgres_url).await?;
    let store = PgTransferStore::new(pool);
    store
        .ensure_schema()
        .await
        .map_err(|e| anyhow::anyhow!("failed to bootstrap fund_transfers schema: {e}"))?;

    let accounts = HttpAccountGateway::new(&config.account_service)
        .map_err(|e| anyhow::anyhow!("account gateway: {e}"))?;
    let ledger = HttpLedgerGateway::new(&config.ledger_service)
        .map_err(|e| anyhow::anyhow!("ledger gateway: {e}"))?;

    let orchestrator = Arc::new(FundTransferOrchestrator::with_retries(
        Arc::new(accounts),
        Arc::new(ledger),
        Arc::new(store),
        Arc::new(UuidReferenceAllocator),
        config.transfer.balance_retries,
    ));

    let app = create_app(Arc::new(AppState { orchestrator }));

    let port = get_port_override().unwrap_or(config.gateway.port);
    let addr: SocketAddr = format!("{}:{}", config.gateway.host, port)
        .parse()
        .context("invalid gateway listen address")?;
    tracing::info!("fund transfer API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind gateway listener")?;
    axum::serve(listener, app.into_make_service())
        .await
        .context("server error")?;

    Ok(())
}
