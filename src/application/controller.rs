// UI controller - single-writer actor owning the dashboard state.
// Browser events, timers and fetch results all arrive on one queue.
use crate::application::data_loader::DataLoader;
use crate::application::errors::FetchError;
use crate::application::page_surface::DomSurface;
use crate::domain::dashboard::DashboardData;
use crate::domain::section::Section;
use crate::domain::state::DashboardState;
use crate::infrastructure::config::UiSettings;
use crate::infrastructure::virtual_dom::{LOADING_OVERLAY, MAIN_CONTENT, SIDEBAR};
use anyhow::anyhow;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

const QUEUE_CAPACITY: usize = 100;

/// Events forwarded by the browser shell
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum UiEvent {
    Refresh,
    ToggleSidebar,
    Navigate {
        section: String,
    },
    AnchorClick {
        href: String,
    },
    Resize {
        width: u32,
    },
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        meta: bool,
    },
    SectionVisible {
        element_id: String,
        ratio: f64,
    },
    SetRealTime {
        enabled: bool,
    },
}

#[derive(Debug)]
pub enum ControllerMessage {
    Ui(UiEvent),
    ResizeSettled { generation: u64 },
    DataArrived { seq: u64, result: Result<DashboardData, FetchError> },
    TimerTick,
    FadeLoadingOverlay,
    RemoveLoadingOverlay,
    RedrawCharts,
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Shortcut {
    Refresh,
    ToggleSidebar,
}

/// Keys that act together with Ctrl or Meta. The page shell reads the same
/// table to decide which keydowns get `preventDefault`.
pub const SHORTCUTS: [(&str, Shortcut); 2] = [("r", Shortcut::Refresh), ("b", Shortcut::ToggleSidebar)];

impl Shortcut {
    pub fn from_key(key: &str, ctrl: bool, meta: bool) -> Option<Shortcut> {
        if !(ctrl || meta) {
            return None;
        }
        SHORTCUTS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, shortcut)| *shortcut)
    }
}

/// Posts delayed and repeating messages back onto the controller queue.
/// Holds a weak sender so pending timers never keep the controller alive.
#[derive(Clone)]
struct Scheduler {
    tx: mpsc::WeakSender<ControllerMessage>,
}

impl Scheduler {
    fn after(&self, delay: Duration, message: ControllerMessage) -> JoinHandle<()> {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(tx) = tx.upgrade() {
                let _ = tx.send(message).await;
            }
        })
    }

    fn every(&self, period: Duration, message: fn() -> ControllerMessage) -> JoinHandle<()> {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let Some(tx) = tx.upgrade() else { break };
                if tx.send(message()).await.is_err() {
                    break;
                }
            }
        })
    }

    fn fetch(&self, seq: u64, loader: DataLoader) -> JoinHandle<()> {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = loader.fetch().await;
            if let Some(tx) = tx.upgrade() {
                let _ = tx.send(ControllerMessage::DataArrived { seq, result }).await;
            }
        })
    }
}

pub struct DashboardController {
    state: DashboardState,
    settings: UiSettings,
    loader: DataLoader,
    dom: Arc<dyn DomSurface>,
    scheduler: Scheduler,
    resize_generation: u64,
    pending_resize: Option<JoinHandle<()>>,
    refresh_seq: u64,
    applied_seq: u64,
    timer: Option<JoinHandle<()>>,
}

/// Cheap handle used by HTTP handlers to talk to the controller task
#[derive(Clone)]
pub struct ControllerClient {
    tx: mpsc::Sender<ControllerMessage>,
}

impl ControllerClient {
    pub async fn dispatch(&self, event: UiEvent) -> anyhow::Result<()> {
        self.tx
            .send(ControllerMessage::Ui(event))
            .await
            .map_err(|_| anyhow!("dashboard controller has stopped"))
    }

    pub fn is_running(&self) -> bool {
        !self.tx.is_closed()
    }

    pub async fn shutdown(&self) {
        let _ = self.tx.send(ControllerMessage::Shutdown).await;
    }
}

impl DashboardController {
    fn new(
        state: DashboardState,
        settings: UiSettings,
        loader: DataLoader,
        dom: Arc<dyn DomSurface>,
    ) -> (Self, mpsc::Sender<ControllerMessage>, mpsc::Receiver<ControllerMessage>) {
        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        let controller = Self {
            state,
            settings,
            loader,
            dom,
            scheduler: Scheduler { tx: tx.downgrade() },
            resize_generation: 0,
            pending_resize: None,
            refresh_seq: 0,
            applied_seq: 0,
            timer: None,
        };
        (controller, tx, rx)
    }

    /// Start the controller task. It runs until `shutdown` is called or
    /// every client has been dropped.
    pub fn spawn(
        state: DashboardState,
        settings: UiSettings,
        loader: DataLoader,
        dom: Arc<dyn DomSurface>,
    ) -> (ControllerClient, JoinHandle<()>) {
        let (controller, tx, rx) = Self::new(state, settings, loader, dom);
        let handle = tokio::spawn(controller.run(rx));
        (ControllerClient { tx }, handle)
    }

    async fn run(mut self, mut rx: mpsc::Receiver<ControllerMessage>) {
        self.start();
        while let Some(message) = rx.recv().await {
            if !self.handle(message).await {
                break;
            }
        }
        self.stop_timer();
        if let Some(pending) = self.pending_resize.take() {
            pending.abort();
        }
        tracing::info!("Dashboard controller stopped");
    }

    fn start(&mut self) {
        tracing::info!(source = self.loader.source_name(), "Starting dashboard controller");
        self.scheduler
            .after(self.settings.loading_overlay_delay(), ControllerMessage::FadeLoadingOverlay);
        self.sync_sidebar_classes();
        self.loader.update_timestamp(&mut self.state, Local::now());
        self.refresh();
        if self.state.real_time_enabled {
            self.start_timer();
        }
    }

    /// Returns false once the controller should stop
    async fn handle(&mut self, message: ControllerMessage) -> bool {
        match message {
            ControllerMessage::Ui(event) => self.on_event(event),
            ControllerMessage::ResizeSettled { generation } => self.on_resize_settled(generation).await,
            ControllerMessage::DataArrived { seq, result } => self.on_data(seq, result).await,
            ControllerMessage::TimerTick => {
                if self.state.real_time_enabled {
                    self.refresh();
                }
            }
            ControllerMessage::FadeLoadingOverlay => {
                self.dom.set_style(LOADING_OVERLAY, "opacity", "0");
                self.scheduler
                    .after(self.settings.loading_overlay_fade(), ControllerMessage::RemoveLoadingOverlay);
            }
            ControllerMessage::RemoveLoadingOverlay => {
                self.dom.remove_element(LOADING_OVERLAY);
            }
            ControllerMessage::RedrawCharts => {
                self.loader.redraw(&self.state).await;
            }
            ControllerMessage::Shutdown => return false,
        }
        true
    }

    fn on_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Refresh => self.refresh(),
            UiEvent::ToggleSidebar => self.toggle_sidebar(),
            UiEvent::Navigate { section } => self.navigate(&section),
            UiEvent::AnchorClick { href } => self.follow_anchor(&href),
            UiEvent::Resize { width } => self.on_resize(width),
            UiEvent::Key { key, ctrl, meta } => match Shortcut::from_key(&key, ctrl, meta) {
                Some(Shortcut::Refresh) => self.refresh(),
                Some(Shortcut::ToggleSidebar) => self.toggle_sidebar(),
                None => {}
            },
            UiEvent::SectionVisible { element_id, ratio } => self.on_section_visible(&element_id, ratio),
            UiEvent::SetRealTime { enabled } => self.set_real_time(enabled),
        }
    }

    /// Spawn a fetch tagged with the next sequence number. In-flight fetches
    /// are left to finish; their results are dropped if a newer one landed.
    fn refresh(&mut self) {
        self.refresh_seq += 1;
        tracing::info!(seq = self.refresh_seq, "Refreshing dashboard data");
        self.scheduler.fetch(self.refresh_seq, self.loader.clone());
    }

    async fn on_data(&mut self, seq: u64, result: Result<DashboardData, FetchError>) {
        if seq <= self.applied_seq {
            tracing::debug!(seq, applied = self.applied_seq, "Discarding stale fetch result");
            return;
        }
        self.applied_seq = seq;
        // failures are logged and surfaced by the loader
        let _ = self.loader.apply(&mut self.state, result).await;
    }

    fn toggle_sidebar(&mut self) {
        self.set_sidebar(!self.state.sidebar_open);
    }

    fn close_sidebar(&mut self) {
        self.set_sidebar(false);
    }

    fn set_sidebar(&mut self, open: bool) {
        self.state.sidebar_open = open;
        self.sync_sidebar_classes();
        self.scheduler
            .after(self.settings.sidebar_redraw_delay(), ControllerMessage::RedrawCharts);
    }

    fn sync_sidebar_classes(&self) {
        if self.state.sidebar_open {
            self.dom.add_class(SIDEBAR, "active");
            self.dom.add_class(MAIN_CONTENT, "sidebar-open");
        } else {
            self.dom.remove_class(SIDEBAR, "active");
            self.dom.remove_class(MAIN_CONTENT, "sidebar-open");
        }
    }

    fn navigate(&mut self, key: &str) {
        let Some(section) = Section::from_nav_key(key) else {
            tracing::warn!("Unknown dashboard section: {}", key);
            return;
        };
        self.dom.scroll_into_view(section.element_id());
        if self.state.is_narrow(self.settings.breakpoint_px) && self.state.sidebar_open {
            self.close_sidebar();
        }
    }

    fn follow_anchor(&self, href: &str) {
        let Some(target) = href.strip_prefix('#').filter(|id| !id.is_empty()) else {
            return;
        };
        if !self.dom.scroll_into_view(target) {
            tracing::debug!("Anchor target #{} not on page", target);
        }
    }

    fn on_section_visible(&mut self, element_id: &str, ratio: f64) {
        if ratio < self.settings.scrollspy_threshold {
            return;
        }
        let Some(section) = Section::from_element_id(element_id) else {
            return;
        };
        for other in Section::ALL {
            self.dom.remove_class(&other.nav_id(), "active");
        }
        self.dom.add_class(&section.nav_id(), "active");
        self.state.current_section = section;
    }

    fn on_resize(&mut self, width: u32) {
        self.state.viewport_width = width;
        self.resize_generation += 1;
        if let Some(pending) = self.pending_resize.take() {
            pending.abort();
        }
        self.pending_resize = Some(self.scheduler.after(
            self.settings.resize_debounce(),
            ControllerMessage::ResizeSettled {
                generation: self.resize_generation,
            },
        ));
    }

    async fn on_resize_settled(&mut self, generation: u64) {
        // an aborted timer may already have posted its message
        if generation != self.resize_generation {
            return;
        }
        self.pending_resize = None;
        if self.state.is_narrow(self.settings.breakpoint_px) && self.state.sidebar_open {
            self.close_sidebar();
        }
        self.loader.redraw(&self.state).await;
    }

    fn set_real_time(&mut self, enabled: bool) {
        self.state.real_time_enabled = enabled;
        if enabled {
            self.start_timer();
        } else {
            self.stop_timer();
        }
    }

    fn start_timer(&mut self) {
        if self.timer.is_some() {
            return;
        }
        let period = self.state.refresh_interval;
        tracing::info!("Real-time refresh every {}ms", period.as_millis());
        self.timer = Some(self.scheduler.every(period, || ControllerMessage::TimerTick));
    }

    fn stop_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
            tracing::info!("Real-time refresh stopped");
        }
    }
}
