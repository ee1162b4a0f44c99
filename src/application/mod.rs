// Application layer - Refresh cycle, rendering and the UI controller
pub mod chart_renderer;
pub mod controller;
pub mod data_loader;
pub mod data_source;
pub mod errors;
pub mod fragments;
pub mod mock_data;
pub mod page_surface;
pub mod risk_prediction;

#[cfg(test)]
pub mod test_support;
