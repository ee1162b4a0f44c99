// Page shell - static markup plus the glue script that replays snapshots
// and forwards browser events to the controller
use crate::application::chart_renderer::{CHART_SPECS, RISK_TABLE_CONTAINER};
use crate::application::controller::SHORTCUTS;
use crate::domain::section::Section;
use crate::infrastructure::virtual_dom::{
    ReplayCursor, DAILY_PULSE_KPIS, FINANCIAL_KPIS, LAST_UPDATED, LOADING_OVERLAY, MAIN_CONTENT, SIDEBAR,
    SIDEBAR_TOGGLE,
};
use maud::{html, Markup, PreEscaped, DOCTYPE};

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";
const BOOTSTRAP_JS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/js/bootstrap.bundle.min.js";
const FONT_AWESOME_CSS: &str = "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css";
const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const STYLE: &str = r#"
body { background: #f8f9fa; font-family: "Segoe UI", sans-serif; }
#loading-overlay { position: fixed; inset: 0; background: #fff; z-index: 2000;
  display: flex; align-items: center; justify-content: center; transition: opacity .3s; }
.sidebar { position: fixed; top: 0; left: -260px; width: 260px; height: 100vh;
  background: #1f2937; padding-top: 1rem; transition: left .3s; z-index: 1000; }
.sidebar.active { left: 0; }
.sidebar-link { display: block; color: #cbd5e1; padding: .75rem 1.25rem; text-decoration: none; }
.sidebar-link.active, .sidebar-link:hover { color: #fff; background: #374151; }
.main-content { transition: margin-left .3s; padding: 1.5rem; }
.main-content.sidebar-open { margin-left: 260px; }
.dashboard-section { padding-top: 1rem; margin-bottom: 2rem; }
.chart-container { min-height: 360px; }
.kpi-card { background: #fff; border-radius: .5rem; padding: 1rem; border-left: 4px solid #0d6efd; }
.kpi-card.danger { border-left-color: #dc3545; }
.kpi-card.warning { border-left-color: #ffc107; }
.kpi-card.success { border-left-color: #198754; }
.kpi-value { font-size: 1.5rem; font-weight: 600; }
.kpi-label { color: #6c757d; }
#notifications { position: fixed; top: 1rem; right: 1rem; z-index: 3000; width: 320px; }
"#;

const SCRIPT: &str = r##"
(() => {
  const seen = window.DASHBOARD_SEEN;
  const state = {
    version: -1, classes: {}, html: {}, text: {}, revisions: {},
    notification: seen.notification, scroll: seen.scroll,
  };

  const send = (event) => fetch('/api/events', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify(event),
  }).catch((e) => console.warn('event not delivered', e));

  const notify = (message) => {
    const box = document.createElement('div');
    box.className = 'alert alert-warning shadow-sm';
    box.textContent = message;
    document.getElementById('notifications').appendChild(box);
    setTimeout(() => box.remove(), 5000);
  };

  const apply = (snap) => {
    if (snap.version <= state.version) return;
    state.version = snap.version;

    for (const [id, el] of Object.entries(snap.elements)) {
      const node = document.getElementById(id);
      if (!node) continue;
      const before = state.classes[id] || [];
      before.filter((c) => !el.classes.includes(c)).forEach((c) => node.classList.remove(c));
      el.classes.forEach((c) => node.classList.add(c));
      state.classes[id] = el.classes;
      if (el.html !== undefined && state.html[id] !== el.html) {
        node.innerHTML = el.html;
        state.html[id] = el.html;
        node.querySelectorAll('[data-bs-toggle="tooltip"]').forEach((t) => new bootstrap.Tooltip(t));
      }
      if (el.text !== undefined && state.text[id] !== el.text) {
        node.textContent = el.text;
        state.text[id] = el.text;
      }
      for (const [prop, value] of Object.entries(el.style)) node.style.setProperty(prop, value);
    }

    snap.removed.forEach((id) => document.getElementById(id)?.remove());

    for (const [id, entry] of Object.entries(snap.plots)) {
      if (state.revisions[id] === entry.revision || !document.getElementById(id)) continue;
      state.revisions[id] = entry.revision;
      const call = entry.call;
      Plotly.newPlot(id, call.data, call.layout, call.config);
    }

    snap.notifications.filter((n) => n.id > state.notification).forEach((n) => {
      state.notification = n.id;
      notify(n.message);
    });

    if (snap.scroll && snap.scroll.seq > state.scroll) {
      state.scroll = snap.scroll.seq;
      document.getElementById(snap.scroll.target)?.scrollIntoView({ behavior: 'smooth' });
    }
  };

  const follow = async () => {
    for (;;) {
      try {
        const response = await fetch('/api/dashboard/stream');
        const reader = response.body.getReader();
        const decoder = new TextDecoder();
        let buffered = '';
        for (;;) {
          const { value, done } = await reader.read();
          if (done) break;
          buffered += decoder.decode(value, { stream: true });
          let newline;
          while ((newline = buffered.indexOf('\n')) >= 0) {
            const line = buffered.slice(0, newline);
            buffered = buffered.slice(newline + 1);
            if (line.trim()) apply(JSON.parse(line));
          }
        }
      } catch (e) {
        console.warn('snapshot stream interrupted', e);
      }
      await new Promise((r) => setTimeout(r, 2000));
    }
  };

  document.querySelectorAll('.sidebar-link').forEach((link) => {
    link.addEventListener('click', (e) => {
      e.preventDefault();
      send({ type: 'navigate', section: link.dataset.section });
    });
  });

  document.querySelectorAll('a[href^="#"]:not(.sidebar-link)').forEach((anchor) => {
    anchor.addEventListener('click', (e) => {
      e.preventDefault();
      send({ type: 'anchorClick', href: anchor.getAttribute('href') });
    });
  });

  document.getElementById('sidebar-toggle').addEventListener('click', () => send({ type: 'toggleSidebar' }));
  document.getElementById('refresh-button').addEventListener('click', () => send({ type: 'refresh' }));

  window.addEventListener('resize', () => send({ type: 'resize', width: window.innerWidth }));

  document.addEventListener('keydown', (e) => {
    if (!(e.ctrlKey || e.metaKey) || !window.DASHBOARD_SHORTCUTS.includes(e.key)) return;
    e.preventDefault();
    send({ type: 'key', key: e.key, ctrl: e.ctrlKey, meta: e.metaKey });
  });

  const observer = new IntersectionObserver((entries) => {
    entries.filter((entry) => entry.isIntersecting).forEach((entry) => {
      send({ type: 'sectionVisible', elementId: entry.target.id, ratio: entry.intersectionRatio });
    });
  }, { threshold: [0.3] });
  document.querySelectorAll('.dashboard-section').forEach((section) => observer.observe(section));

  fetch('/api/dashboard').then((r) => r.json()).then(apply).catch((e) => console.warn(e));
  send({ type: 'resize', width: window.innerWidth });
  follow();
})();
"##;

fn sidebar() -> Markup {
    html! {
        nav id=(SIDEBAR) class="sidebar" {
            h5 class="text-white px-4 mb-4" {
                i class="fas fa-users me-2" {}
                "HR Analytics"
            }
            @for section in Section::ALL {
                a id=(section.nav_id()) class="sidebar-link" href={ "#" (section.element_id()) }
                    data-section=(section.nav_key())
                {
                    i class={ "fas " (section.icon()) " me-2" } {}
                    (section.title())
                }
            }
        }
    }
}

fn chart_card(title: &str, container_id: &str) -> Markup {
    html! {
        div class="col-lg-6 mb-4" {
            div class="card shadow-sm" {
                div class="card-header" { (title) }
                div class="card-body" {
                    div id=(container_id) class="chart-container" {}
                }
            }
        }
    }
}

fn section_block(section: Section) -> Markup {
    html! {
        section id=(section.element_id()) class="dashboard-section" {
            h2 class="h4 mb-3" {
                i class={ "fas " (section.icon()) " me-2" } {}
                (section.title())
            }
            @if section == Section::Executive {
                div id=(FINANCIAL_KPIS) class="row" {}
            }
            @if section == Section::RealTime {
                div id=(DAILY_PULSE_KPIS) class="row" {}
            }
            div class="row" {
                @for spec in CHART_SPECS.iter().filter(|spec| spec.section == section) {
                    (chart_card(spec.title, spec.container_id))
                }
                @if section == Section::RealTime {
                    div class="col-12 mb-4" {
                        div class="card shadow-sm" {
                            div class="card-header" { "Live Risk Monitoring" }
                            div id=(RISK_TABLE_CONTAINER) class="card-body table-responsive" {}
                        }
                    }
                }
            }
        }
    }
}

/// Notifications and scroll requests at or below `seen` are treated as
/// already shown by this page load.
pub fn render_page(seen: ReplayCursor) -> Markup {
    let shortcut_keys: Vec<&str> = SHORTCUTS.iter().map(|(key, _)| *key).collect();
    let shortcut_json = serde_json::to_string(&shortcut_keys).unwrap_or_else(|_| "[]".to_string());
    let seen_json = serde_json::to_string(&seen)
        .unwrap_or_else(|_| r#"{"notification":0,"scroll":0}"#.to_string());

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Enterprise HR Analytics" }
                link rel="stylesheet" href=(BOOTSTRAP_CSS);
                link rel="stylesheet" href=(FONT_AWESOME_CSS);
                style { (PreEscaped(STYLE)) }
            }
            body {
                div id=(LOADING_OVERLAY) {
                    div class="spinner-border text-primary" role="status" {}
                }
                div id="notifications" {}
                (sidebar())
                main id=(MAIN_CONTENT) class="main-content" {
                    header class="d-flex align-items-center mb-4" {
                        button id=(SIDEBAR_TOGGLE) class="btn btn-outline-secondary me-3" type="button" {
                            i class="fas fa-bars" {}
                        }
                        h1 class="h3 mb-0 flex-grow-1" { "Enterprise HR Analytics" }
                        span class="text-muted me-3" {
                            "Last updated: "
                            span id=(LAST_UPDATED) {}
                        }
                        button id="refresh-button" class="btn btn-primary" type="button" {
                            i class="fas fa-sync-alt me-1" {}
                            "Refresh"
                        }
                    }
                    @for s in Section::ALL {
                        (section_block(s))
                    }
                }
                script src=(PLOTLY_JS) {}
                script src=(BOOTSTRAP_JS) {}
                script { (PreEscaped(format!("window.DASHBOARD_SHORTCUTS = {};", shortcut_json))) }
                script { (PreEscaped(format!("window.DASHBOARD_SEEN = {};", seen_json))) }
                script { (PreEscaped(SCRIPT)) }
            }
        }
    }
}
