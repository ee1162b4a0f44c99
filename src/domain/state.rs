// Dashboard state - the single record owned by the UI controller
use super::dashboard::DashboardData;
use super::section::Section;
use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub sidebar_open: bool,
    pub current_section: Section,
    pub refresh_interval: Duration,
    pub last_updated: DateTime<Local>,
    pub dashboard_data: Option<Arc<DashboardData>>,
    pub real_time_enabled: bool,
    pub viewport_width: u32,
}

impl DashboardState {
    /// The sidebar starts open only on viewports wider than the breakpoint.
    pub fn new(
        viewport_width: u32,
        breakpoint_px: u32,
        refresh_interval: Duration,
        real_time_enabled: bool,
    ) -> Self {
        Self {
            sidebar_open: viewport_width > breakpoint_px,
            current_section: Section::Executive,
            refresh_interval,
            last_updated: Local::now(),
            dashboard_data: None,
            real_time_enabled,
            viewport_width,
        }
    }

    pub fn is_narrow(&self, breakpoint_px: u32) -> bool {
        self.viewport_width < breakpoint_px
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_opens_only_above_breakpoint() {
        let interval = Duration::from_millis(30_000);

        assert!(DashboardState::new(1440, 1200, interval, true).sidebar_open);
        assert!(!DashboardState::new(1200, 1200, interval, true).sidebar_open);
        assert!(!DashboardState::new(800, 1200, interval, true).sidebar_open);
    }

    #[test]
    fn test_defaults() {
        let state = DashboardState::new(1440, 1200, Duration::from_millis(30_000), true);

        assert_eq!(state.current_section, Section::Executive);
        assert_eq!(state.refresh_interval, Duration::from_secs(30));
        assert!(state.dashboard_data.is_none());
        assert!(state.real_time_enabled);
        assert!(!state.is_narrow(1200));
    }
}
