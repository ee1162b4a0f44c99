// Shared fixtures for controller and loader tests
use crate::application::data_source::DashboardDataSource;
use crate::application::errors::FetchError;
use crate::application::mock_data::generate_dashboard;
use crate::application::page_surface::DomSurface;
use crate::domain::dashboard::DashboardData;
use crate::infrastructure::virtual_dom::VirtualDom;
use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Same seed, same dashboard
pub fn fixed_dashboard() -> DashboardData {
    generate_dashboard(&mut StdRng::seed_from_u64(42))
}

pub struct FixedSource {
    data: DashboardData,
    calls: AtomicUsize,
}

impl FixedSource {
    pub fn new(data: DashboardData) -> Self {
        Self {
            data,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DashboardDataSource for FixedSource {
    async fn fetch(&self) -> Result<DashboardData, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.data.clone())
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

pub struct FailingSource;

#[async_trait]
impl DashboardDataSource for FailingSource {
    async fn fetch(&self) -> Result<DashboardData, FetchError> {
        Err(FetchError::Unavailable("backend is down".to_string()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DomCall {
    AddClass(String, String),
    RemoveClass(String, String),
    SetInnerHtml(String),
    SetText(String),
    SetStyle(String, String, String),
    RemoveElement(String),
    ScrollIntoView(String),
    Notify(String),
}

/// Forwards to a `VirtualDom` and keeps a log of every call
#[derive(Clone)]
pub struct RecordingDom {
    page: VirtualDom,
    calls: Arc<Mutex<Vec<DomCall>>>,
}

impl RecordingDom {
    pub fn new(page: VirtualDom) -> Self {
        Self {
            page,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn page(&self) -> VirtualDom {
        self.page.clone()
    }

    pub fn calls(&self) -> Vec<DomCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &DomCall) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    pub fn notifications(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                DomCall::Notify(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.page
            .snapshot()
            .elements
            .get(id)
            .map(|el| el.classes.contains(class))
            .unwrap_or(false)
    }

    fn record(&self, call: DomCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl DomSurface for RecordingDom {
    fn add_class(&self, id: &str, class: &str) -> bool {
        self.record(DomCall::AddClass(id.to_string(), class.to_string()));
        self.page.add_class(id, class)
    }

    fn remove_class(&self, id: &str, class: &str) -> bool {
        self.record(DomCall::RemoveClass(id.to_string(), class.to_string()));
        self.page.remove_class(id, class)
    }

    fn set_inner_html(&self, id: &str, html: String) -> bool {
        self.record(DomCall::SetInnerHtml(id.to_string()));
        self.page.set_inner_html(id, html)
    }

    fn set_text(&self, id: &str, text: String) -> bool {
        self.record(DomCall::SetText(id.to_string()));
        self.page.set_text(id, text)
    }

    fn set_style(&self, id: &str, property: &str, value: &str) -> bool {
        self.record(DomCall::SetStyle(id.to_string(), property.to_string(), value.to_string()));
        self.page.set_style(id, property, value)
    }

    fn remove_element(&self, id: &str) -> bool {
        self.record(DomCall::RemoveElement(id.to_string()));
        self.page.remove_element(id)
    }

    fn scroll_into_view(&self, id: &str) -> bool {
        self.record(DomCall::ScrollIntoView(id.to_string()));
        self.page.scroll_into_view(id)
    }

    fn notify(&self, message: &str) {
        self.record(DomCall::Notify(message.to_string()));
        self.page.notify(message)
    }
}
