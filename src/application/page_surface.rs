// Page surface traits - what the controller and renderers draw into
use crate::application::errors::RenderError;
use crate::domain::theme::PlotCall;
use async_trait::async_trait;

/// DOM operations used by the controller. Operations on an id that is not
/// on the page are no-ops and return `false`.
pub trait DomSurface: Send + Sync {
    fn add_class(&self, id: &str, class: &str) -> bool;

    fn remove_class(&self, id: &str, class: &str) -> bool;

    fn set_inner_html(&self, id: &str, html: String) -> bool;

    fn set_text(&self, id: &str, text: String) -> bool;

    fn set_style(&self, id: &str, property: &str, value: &str) -> bool;

    fn remove_element(&self, id: &str) -> bool;

    /// Request a smooth scroll to the element with this id
    fn scroll_into_view(&self, id: &str) -> bool;

    /// Show a user-facing notification
    fn notify(&self, message: &str);
}

/// The charting library's draw call
#[async_trait]
pub trait ChartSurface: Send + Sync {
    /// Draw (or replace) the chart in `call.container_id`
    async fn new_plot(&self, call: PlotCall) -> Result<(), RenderError>;
}
