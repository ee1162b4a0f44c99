// Data loader - one refresh cycle: fetch, store, render, KPIs, timestamp
use crate::application::chart_renderer::{ChartRenderer, RenderReport};
use crate::application::data_source::DashboardDataSource;
use crate::application::errors::FetchError;
use crate::application::fragments;
use crate::application::page_surface::DomSurface;
use crate::domain::dashboard::DashboardData;
use crate::domain::state::DashboardState;
use crate::infrastructure::virtual_dom::{DAILY_PULSE_KPIS, FINANCIAL_KPIS, LAST_UPDATED};
use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::Instant;

pub const FETCH_FAILED_MESSAGE: &str = "Failed to load dashboard data";

#[derive(Clone)]
pub struct DataLoader {
    source: Arc<dyn DashboardDataSource>,
    renderer: ChartRenderer,
    dom: Arc<dyn DomSurface>,
}

impl DataLoader {
    pub fn new(source: Arc<dyn DashboardDataSource>, renderer: ChartRenderer, dom: Arc<dyn DomSurface>) -> Self {
        Self { source, renderer, dom }
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// First half of a cycle; safe to run off the controller task
    pub async fn fetch(&self) -> Result<DashboardData, FetchError> {
        let started = Instant::now();
        let result = self.source.fetch().await;
        tracing::debug!(
            "Fetch from {} finished in {}ms (ok={})",
            self.source.name(),
            started.elapsed().as_millis(),
            result.is_ok()
        );
        result
    }

    /// Second half of a cycle. A failed fetch leaves the previous data in
    /// place and raises exactly one notification. Render failures are
    /// reported together and never hold back the KPI and timestamp updates.
    pub async fn apply(
        &self,
        state: &mut DashboardState,
        fetched: Result<DashboardData, FetchError>,
    ) -> Result<RenderReport, FetchError> {
        let data = match fetched {
            Ok(data) => Arc::new(data),
            Err(e) => {
                tracing::error!("Failed to load dashboard data: {}", e);
                self.dom.notify(FETCH_FAILED_MESSAGE);
                return Err(e);
            }
        };
        state.dashboard_data = Some(data.clone());

        let report = self.renderer.render_all(&data).await;
        for (chart, e) in &report.failures {
            tracing::warn!(chart = %chart, "Chart render failed: {}", e);
        }
        if !report.is_clean() {
            self.dom.notify(&format!("Failed to render {} chart(s)", report.failures.len()));
        }

        self.update_kpis(&data);
        self.update_timestamp(state, Local::now());

        tracing::info!(
            rendered = report.rendered,
            failed = report.failures.len(),
            "Dashboard refreshed"
        );
        Ok(report)
    }

    /// Redraw from whatever data is already in state; nothing is fetched
    pub async fn redraw(&self, state: &DashboardState) -> Option<RenderReport> {
        let data = state.dashboard_data.clone()?;
        let report = self.renderer.render_all(&data).await;
        for (chart, e) in &report.failures {
            tracing::warn!(chart = %chart, "Chart redraw failed: {}", e);
        }
        Some(report)
    }

    pub fn update_kpis(&self, data: &DashboardData) {
        let financial = fragments::kpi_cards(&data.kpis.financial_widgets());
        if !self.dom.set_inner_html(FINANCIAL_KPIS, financial.into_string()) {
            tracing::debug!("No #{} container; skipping KPIs", FINANCIAL_KPIS);
        }

        let pulse = fragments::kpi_cards(&data.kpis.daily_pulse_widgets());
        self.dom.set_inner_html(DAILY_PULSE_KPIS, pulse.into_string());
    }

    pub fn update_timestamp(&self, state: &mut DashboardState, now: DateTime<Local>) {
        state.last_updated = now;
        self.dom
            .set_text(LAST_UPDATED, now.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string());
    }
}
