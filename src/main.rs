use clap::Parser;
use employee_payroll::application::service::EmployeeService;
use employee_payroll::config::Config;
use employee_payroll::interfaces::http::{AppState, build_router};
use miette::{IntoDiagnostic, Result};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let store = config.open_store().into_diagnostic()?;
    let notifier = config.notifier().into_diagnostic()?;
    let app = build_router(AppState::new(EmployeeService::new(store, notifier)));

    let listener = tokio::net::TcpListener::bind(config.bind).await.into_diagnostic()?;
    info!("Server listening on {}", listener.local_addr().into_diagnostic()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .into_diagnostic()?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
