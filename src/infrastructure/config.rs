use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    pub server: ServerSettings,
    pub ui: UiSettings,
    pub data_source: DataSourceSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Timings and thresholds of the page controller
#[derive(Debug, Deserialize, Clone)]
pub struct UiSettings {
    pub breakpoint_px: u32,
    pub initial_viewport_width: u32,
    pub resize_debounce_ms: u64,
    pub loading_overlay_delay_ms: u64,
    pub loading_overlay_fade_ms: u64,
    pub sidebar_redraw_delay_ms: u64,
    pub scrollspy_threshold: f64,
    pub refresh_interval_ms: u64,
    pub real_time_enabled: bool,
}

impl UiSettings {
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn loading_overlay_delay(&self) -> Duration {
        Duration::from_millis(self.loading_overlay_delay_ms)
    }

    pub fn loading_overlay_fade(&self) -> Duration {
        Duration::from_millis(self.loading_overlay_fade_ms)
    }

    pub fn sidebar_redraw_delay(&self) -> Duration {
        Duration::from_millis(self.sidebar_redraw_delay_ms)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            breakpoint_px: 1200,
            initial_viewport_width: 1440,
            resize_debounce_ms: 250,
            loading_overlay_delay_ms: 1000,
            loading_overlay_fade_ms: 300,
            sidebar_redraw_delay_ms: 300,
            scrollspy_threshold: 0.3,
            refresh_interval_ms: 30_000,
            real_time_enabled: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    Mock,
    Http,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataSourceSettings {
    pub kind: DataSourceKind,
    pub url: Option<String>,
    pub simulated_delay_ms: u64,
    pub timeout_ms: u64,
}

fn builder_with_defaults() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    let ui = UiSettings::default();

    Ok(config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("ui.breakpoint_px", ui.breakpoint_px)?
        .set_default("ui.initial_viewport_width", ui.initial_viewport_width)?
        .set_default("ui.resize_debounce_ms", ui.resize_debounce_ms)?
        .set_default("ui.loading_overlay_delay_ms", ui.loading_overlay_delay_ms)?
        .set_default("ui.loading_overlay_fade_ms", ui.loading_overlay_fade_ms)?
        .set_default("ui.sidebar_redraw_delay_ms", ui.sidebar_redraw_delay_ms)?
        .set_default("ui.scrollspy_threshold", ui.scrollspy_threshold)?
        .set_default("ui.refresh_interval_ms", ui.refresh_interval_ms)?
        .set_default("ui.real_time_enabled", ui.real_time_enabled)?
        .set_default("data_source.kind", "mock")?
        .set_default("data_source.simulated_delay_ms", 500)?
        .set_default("data_source.timeout_ms", 10_000)?)
}

/// Defaults, then `config/dashboard.toml` if present, then
/// `HR_DASHBOARD__SECTION__KEY` environment overrides.
pub fn load_dashboard_settings() -> anyhow::Result<DashboardSettings> {
    let settings = builder_with_defaults()?
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("HR_DASHBOARD")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
