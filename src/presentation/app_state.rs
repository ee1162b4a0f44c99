// Application state for HTTP handlers
use crate::application::controller::ControllerClient;
use crate::infrastructure::virtual_dom::VirtualDom;
use tokio::sync::watch;

#[derive(Clone)]
pub struct AppState {
    pub controller: ControllerClient,
    pub page: VirtualDom,
    pub data_source: &'static str,
    /// Flips to true when the server starts shutting down
    pub closing: watch::Receiver<bool>,
}
