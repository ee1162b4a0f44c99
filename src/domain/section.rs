// Dashboard sections - navigation keys and page anchors
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Executive,
    HrOps,
    Strategic,
    RealTime,
    Advanced,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Executive,
        Section::HrOps,
        Section::Strategic,
        Section::RealTime,
        Section::Advanced,
    ];

    /// Key used by `.sidebar-link[data-section]`
    pub fn nav_key(&self) -> &'static str {
        match self {
            Section::Executive => "executive",
            Section::HrOps => "hrOps",
            Section::Strategic => "strategic",
            Section::RealTime => "realTime",
            Section::Advanced => "advanced",
        }
    }

    /// Id of the `.dashboard-section` element
    pub fn element_id(&self) -> &'static str {
        match self {
            Section::Executive => "executive",
            Section::HrOps => "hr-ops",
            Section::Strategic => "strategic",
            Section::RealTime => "real-time",
            Section::Advanced => "advanced",
        }
    }

    /// Id of the sidebar link pointing at this section
    pub fn nav_id(&self) -> String {
        format!("nav-{}", self.element_id())
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Executive => "Executive Summary",
            Section::HrOps => "HR Operations",
            Section::Strategic => "Strategic Planning",
            Section::RealTime => "Real-Time Dashboard",
            Section::Advanced => "Advanced Analytics",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Section::Executive => "fa-coins",
            Section::HrOps => "fa-bullseye",
            Section::Strategic => "fa-chart-bar",
            Section::RealTime => "fa-bolt",
            Section::Advanced => "fa-brain",
        }
    }

    pub fn from_nav_key(key: &str) -> Option<Section> {
        Self::ALL.into_iter().find(|s| s.nav_key() == key)
    }

    pub fn from_element_id(id: &str) -> Option<Section> {
        Self::ALL.into_iter().find(|s| s.element_id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_key_and_element_id_round_trip() {
        for section in Section::ALL {
            assert_eq!(Section::from_nav_key(section.nav_key()), Some(section));
            assert_eq!(Section::from_element_id(section.element_id()), Some(section));
        }
    }

    #[test]
    fn test_camel_case_keys_map_to_kebab_ids() {
        assert_eq!(Section::from_nav_key("hrOps").map(|s| s.element_id()), Some("hr-ops"));
        assert_eq!(Section::from_element_id("real-time"), Some(Section::RealTime));
        assert_eq!(Section::from_element_id("realtime"), None);
        assert_eq!(Section::from_nav_key("payroll"), None);
    }
}
