// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use anyhow::Context;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use crate::application::chart_renderer::ChartRenderer;
use crate::application::controller::DashboardController;
use crate::application::data_loader::DataLoader;
use crate::application::data_source::DashboardDataSource;
use crate::application::mock_data::MockDataSource;
use crate::domain::state::DashboardState;
use crate::domain::theme::ChartConfig;
use crate::infrastructure::config::{load_dashboard_settings, DataSourceKind, DataSourceSettings};
use crate::infrastructure::http_data_source::HttpDataSource;
use crate::infrastructure::virtual_dom::VirtualDom;
use crate::presentation::app_state::AppState;

fn build_data_source(settings: &DataSourceSettings) -> anyhow::Result<Arc<dyn DashboardDataSource>> {
    Ok(match settings.kind {
        DataSourceKind::Mock => Arc::new(MockDataSource::new(std::time::Duration::from_millis(
            settings.simulated_delay_ms,
        ))),
        DataSourceKind::Http => {
            let url = settings
                .url
                .clone()
                .context("data_source.url is required when data_source.kind = \"http\"")?;
            Arc::new(HttpDataSource::new(
                url,
                std::time::Duration::from_millis(settings.timeout_ms),
            )?)
        }
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let settings = load_dashboard_settings()?;

    // Data source (infrastructure layer)
    let source = build_data_source(&settings.data_source)?;
    let data_source = source.name();

    // Page model, renderer and loader (application layer)
    let page = VirtualDom::with_dashboard_page();
    let renderer = ChartRenderer::new(ChartConfig::default(), Arc::new(page.clone()), Arc::new(page.clone()));
    let loader = DataLoader::new(source, renderer, Arc::new(page.clone()));

    let ui = settings.ui.clone();
    let state = DashboardState::new(
        ui.initial_viewport_width,
        ui.breakpoint_px,
        ui.refresh_interval(),
        ui.real_time_enabled,
    );
    let (controller, controller_task) = DashboardController::spawn(state, ui, loader, Arc::new(page.clone()));

    // Create application state
    let (closing, closing_rx) = watch::channel(false);
    let app_state = Arc::new(AppState {
        controller: controller.clone(),
        page,
        data_source,
        closing: closing_rx,
    });

    // Build router (presentation layer)
    let router = presentation::router(app_state);

    // Start server
    let addr = settings.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Starting hr-analytics-dashboard on {} (data source: {})", addr, data_source);

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
            // open snapshot streams would otherwise hold the server up
            closing.send_replace(true);
        })
        .await?;

    controller.shutdown().await;
    controller_task.await?;

    Ok(())
}
