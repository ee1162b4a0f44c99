// Domain layer - Dashboard data, state and theme models
pub mod chart;
pub mod dashboard;
pub mod kpi;
pub mod section;
pub mod state;
pub mod theme;
