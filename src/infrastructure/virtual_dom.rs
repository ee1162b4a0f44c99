// In-memory page model - records DOM mutations and draw calls so the
// browser shell can replay them from snapshots
use crate::application::chart_renderer::{CHART_SPECS, RISK_TABLE_CONTAINER};
use crate::application::errors::RenderError;
use crate::application::page_surface::{ChartSurface, DomSurface};
use crate::domain::section::Section;
use crate::domain::theme::PlotCall;
use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::watch;

pub const LOADING_OVERLAY: &str = "loading-overlay";
pub const SIDEBAR: &str = "sidebar";
pub const MAIN_CONTENT: &str = "main-content";
pub const SIDEBAR_TOGGLE: &str = "sidebar-toggle";
pub const FINANCIAL_KPIS: &str = "financial-kpis";
pub const DAILY_PULSE_KPIS: &str = "daily-pulse-kpis";
pub const LAST_UPDATED: &str = "last-updated-time";

const MAX_NOTIFICATIONS: usize = 20;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ElementSnapshot {
    pub classes: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub style: BTreeMap<String, String>,
}

impl ElementSnapshot {
    fn with_class(class: &str) -> Self {
        let mut element = Self::default();
        element.classes.insert(class.to_string());
        element
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotEntry {
    pub revision: u64,
    pub call: PlotCall,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub at: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrollRequest {
    pub seq: u64,
    pub target: String,
}

/// Everything the browser needs to bring its page in line with the model
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    pub version: u64,
    pub elements: BTreeMap<String, ElementSnapshot>,
    pub removed: Vec<String>,
    pub plots: BTreeMap<String, PlotEntry>,
    pub notifications: Vec<Notification>,
    pub scroll: Option<ScrollRequest>,
}

/// Highest notification id and scroll sequence already raised. A browser
/// that loads the page later starts from here, so one-shot effects raised
/// before it connected are not replayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplayCursor {
    pub notification: u64,
    pub scroll: u64,
}

impl PageSnapshot {
    pub fn replay_cursor(&self) -> ReplayCursor {
        ReplayCursor {
            notification: self.notifications.iter().map(|n| n.id).max().unwrap_or(0),
            scroll: self.scroll.as_ref().map(|s| s.seq).unwrap_or(0),
        }
    }
}

#[derive(Default)]
struct PageModel {
    page: PageSnapshot,
    next_notification: u64,
    next_scroll: u64,
}

#[derive(Clone)]
pub struct VirtualDom {
    model: Arc<RwLock<PageModel>>,
    version: Arc<watch::Sender<u64>>,
}

impl Default for VirtualDom {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualDom {
    /// An empty page with no elements
    pub fn new() -> Self {
        let (version, _) = watch::channel(0);
        Self {
            model: Arc::new(RwLock::new(PageModel::default())),
            version: Arc::new(version),
        }
    }

    /// The dashboard page: fixed widgets, one container per chart, one
    /// `.dashboard-section` and one `.sidebar-link` per section.
    pub fn with_dashboard_page() -> Self {
        let dom = Self::new();
        {
            let mut model = dom.model.write().unwrap_or_else(PoisonError::into_inner);
            let elements = &mut model.page.elements;

            for id in [
                LOADING_OVERLAY,
                MAIN_CONTENT,
                SIDEBAR_TOGGLE,
                FINANCIAL_KPIS,
                DAILY_PULSE_KPIS,
                RISK_TABLE_CONTAINER,
                LAST_UPDATED,
            ] {
                elements.insert(id.to_string(), ElementSnapshot::default());
            }
            elements.insert(SIDEBAR.to_string(), ElementSnapshot::with_class("sidebar"));

            for spec in &CHART_SPECS {
                elements.insert(spec.container_id.to_string(), ElementSnapshot::with_class("chart-container"));
            }
            for section in Section::ALL {
                elements.insert(
                    section.element_id().to_string(),
                    ElementSnapshot::with_class("dashboard-section"),
                );
                elements.insert(section.nav_id(), ElementSnapshot::with_class("sidebar-link"));
            }
        }
        dom
    }

    pub fn snapshot(&self) -> PageSnapshot {
        self.model
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .page
            .clone()
    }

    /// Receives the page version after every mutation
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }

    /// Apply `change` under the write lock; bump the version if it reports a change
    fn mutate<T>(&self, change: impl FnOnce(&mut PageModel) -> Option<T>) -> Option<T> {
        let mut model = self.model.write().unwrap_or_else(PoisonError::into_inner);
        let result = change(&mut *model);
        if result.is_some() {
            model.page.version += 1;
            let version = model.page.version;
            drop(model);
            self.version.send_replace(version);
        }
        result
    }

    fn with_element(&self, id: &str, change: impl FnOnce(&mut ElementSnapshot)) -> bool {
        self.mutate(|model| model.page.elements.get_mut(id).map(change))
            .is_some()
    }
}

impl DomSurface for VirtualDom {
    fn add_class(&self, id: &str, class: &str) -> bool {
        self.with_element(id, |el| {
            el.classes.insert(class.to_string());
        })
    }

    fn remove_class(&self, id: &str, class: &str) -> bool {
        self.with_element(id, |el| {
            el.classes.remove(class);
        })
    }

    fn set_inner_html(&self, id: &str, html: String) -> bool {
        self.with_element(id, |el| el.html = Some(html))
    }

    fn set_text(&self, id: &str, text: String) -> bool {
        self.with_element(id, |el| el.text = Some(text))
    }

    fn set_style(&self, id: &str, property: &str, value: &str) -> bool {
        self.with_element(id, |el| {
            el.style.insert(property.to_string(), value.to_string());
        })
    }

    fn remove_element(&self, id: &str) -> bool {
        self.mutate(|model| {
            model.page.elements.remove(id)?;
            model.page.removed.push(id.to_string());
            Some(())
        })
        .is_some()
    }

    fn scroll_into_view(&self, id: &str) -> bool {
        self.mutate(|model| {
            if !model.page.elements.contains_key(id) {
                return None;
            }
            model.next_scroll += 1;
            model.page.scroll = Some(ScrollRequest {
                seq: model.next_scroll,
                target: id.to_string(),
            });
            Some(())
        })
        .is_some()
    }

    fn notify(&self, message: &str) {
        self.mutate(|model| {
            model.next_notification += 1;
            let notifications = &mut model.page.notifications;
            notifications.push(Notification {
                id: model.next_notification,
                message: message.to_string(),
                at: Local::now(),
            });
            if notifications.len() > MAX_NOTIFICATIONS {
                let overflow = notifications.len() - MAX_NOTIFICATIONS;
                notifications.drain(..overflow);
            }
            Some(())
        });
    }
}

#[async_trait]
impl ChartSurface for VirtualDom {
    async fn new_plot(&self, call: PlotCall) -> Result<(), RenderError> {
        let container_id = call.container_id.clone();
        self.mutate(move |model| {
            if !model.page.elements.contains_key(&call.container_id) {
                return None;
            }
            let revision = model
                .page
                .plots
                .get(&call.container_id)
                .map(|entry| entry.revision + 1)
                .unwrap_or(1);
            model
                .page
                .plots
                .insert(call.container_id.clone(), PlotEntry { revision, call });
            Some(())
        })
        .ok_or(RenderError::MissingContainer(container_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::theme::ChartConfig;

    fn call(container_id: &str) -> PlotCall {
        let config = ChartConfig::default();
        PlotCall {
            container_id: container_id.to_string(),
            data: vec![],
            layout: config.base_layout(),
            config: config.plot_config(),
        }
    }

    #[test]
    fn test_dashboard_page_has_every_container() {
        let page = VirtualDom::with_dashboard_page().snapshot();

        for id in [LOADING_OVERLAY, SIDEBAR, MAIN_CONTENT, RISK_TABLE_CONTAINER, LAST_UPDATED] {
            assert!(page.elements.contains_key(id), "missing #{}", id);
        }
        let charts = page.elements.keys().filter(|id| id.ends_with("-chart")).count();
        assert_eq!(charts, 15);
        assert!(page.elements["nav-hr-ops"].classes.contains("sidebar-link"));
        assert!(page.elements["hr-ops"].classes.contains("dashboard-section"));
    }

    #[test]
    fn test_class_changes_and_missing_elements() {
        let dom = VirtualDom::with_dashboard_page();

        assert!(dom.add_class(SIDEBAR, "active"));
        assert!(dom.snapshot().elements[SIDEBAR].classes.contains("active"));
        assert!(dom.remove_class(SIDEBAR, "active"));
        assert!(!dom.snapshot().elements[SIDEBAR].classes.contains("active"));

        assert!(!dom.add_class("no-such-id", "active"));
        assert!(!dom.set_text("no-such-id", "x".to_string()));
        assert!(!dom.scroll_into_view("no-such-id"));
    }

    #[test]
    fn test_removed_elements_are_reported() {
        let dom = VirtualDom::with_dashboard_page();

        assert!(dom.remove_element(LOADING_OVERLAY));
        assert!(!dom.remove_element(LOADING_OVERLAY));

        let page = dom.snapshot();
        assert!(!page.elements.contains_key(LOADING_OVERLAY));
        assert_eq!(page.removed, vec![LOADING_OVERLAY.to_string()]);
    }

    #[test]
    fn test_notifications_are_capped() {
        let dom = VirtualDom::new();
        for i in 0..25 {
            dom.notify(&format!("message {}", i));
        }

        let page = dom.snapshot();
        assert_eq!(page.notifications.len(), MAX_NOTIFICATIONS);
        assert_eq!(page.notifications[0].id, 6);
        assert_eq!(page.notifications.last().unwrap().message, "message 24");
    }

    #[test]
    fn test_replay_cursor_covers_raised_effects() {
        let dom = VirtualDom::with_dashboard_page();
        assert_eq!(dom.snapshot().replay_cursor(), ReplayCursor::default());

        dom.notify("Failed to load dashboard data");
        dom.notify("Failed to load dashboard data");
        assert!(dom.scroll_into_view("hr-ops"));

        let cursor = dom.snapshot().replay_cursor();
        assert_eq!(cursor, ReplayCursor { notification: 2, scroll: 1 });
        assert!(dom.snapshot().notifications.iter().all(|n| n.id <= cursor.notification));
    }

    #[tokio::test]
    async fn test_replotting_bumps_revision() {
        let dom = VirtualDom::with_dashboard_page();

        dom.new_plot(call("talent-pipeline-chart")).await.unwrap();
        dom.new_plot(call("talent-pipeline-chart")).await.unwrap();

        let page = dom.snapshot();
        assert_eq!(page.plots.len(), 1);
        assert_eq!(page.plots["talent-pipeline-chart"].revision, 2);

        let err = dom.new_plot(call("nowhere-chart")).await.unwrap_err();
        assert_eq!(err, RenderError::MissingContainer("nowhere-chart".to_string()));
    }

    #[tokio::test]
    async fn test_subscribers_see_new_versions() {
        let dom = VirtualDom::with_dashboard_page();
        let mut versions = dom.subscribe();

        dom.set_text(LAST_UPDATED, "now".to_string());

        versions.changed().await.unwrap();
        assert_eq!(*versions.borrow(), dom.snapshot().version);
    }
}
