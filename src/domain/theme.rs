// Chart theme and the draw-call shape handed to Plotly
use super::chart::Trace;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub t: u32,
    pub r: u32,
    pub b: u32,
    pub l: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub paper_bgcolor: String,
    pub plot_bgcolor: String,
    pub font: Font,
    pub colorway: Vec<String>,
    pub margin: Margin,
}

/// Shared, read-only chart configuration applied to every draw call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub theme: Theme,
    pub responsive: bool,
    pub display_mode_bar: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            theme: Theme {
                paper_bgcolor: "rgba(0,0,0,0)".to_string(),
                plot_bgcolor: "rgba(0,0,0,0)".to_string(),
                font: Font {
                    family: "Inter, sans-serif".to_string(),
                    color: "#374151".to_string(),
                },
                colorway: ["#2563eb", "#059669", "#dc2626", "#d97706", "#7c3aed", "#0891b2"]
                    .iter()
                    .map(|c| c.to_string())
                    .collect(),
                margin: Margin { t: 20, r: 20, b: 40, l: 40 },
            },
            responsive: true,
            display_mode_bar: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLayout {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tickangle: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotLayout {
    pub paper_bgcolor: String,
    pub plot_bgcolor: String,
    pub font: Font,
    pub colorway: Vec<String>,
    pub margin: Margin,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<AxisLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<AxisLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barmode: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotConfig {
    pub responsive: bool,
    pub display_mode_bar: bool,
}

impl ChartConfig {
    /// Theme layout with an empty title; chart adapters add their axes on top.
    pub fn base_layout(&self) -> PlotLayout {
        PlotLayout {
            paper_bgcolor: self.theme.paper_bgcolor.clone(),
            plot_bgcolor: self.theme.plot_bgcolor.clone(),
            font: self.theme.font.clone(),
            colorway: self.theme.colorway.clone(),
            margin: self.theme.margin,
            title: String::new(),
            xaxis: None,
            yaxis: None,
            barmode: None,
        }
    }

    pub fn plot_config(&self) -> PlotConfig {
        PlotConfig {
            responsive: self.responsive,
            display_mode_bar: self.display_mode_bar,
        }
    }
}

/// `Plotly.newPlot(containerId, data, layout, config)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotCall {
    pub container_id: String,
    pub data: Vec<Trace>,
    pub layout: PlotLayout,
    pub config: PlotConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let config = ChartConfig::default();

        assert_eq!(config.theme.colorway.len(), 6);
        assert_eq!(config.theme.margin, Margin { t: 20, r: 20, b: 40, l: 40 });
        assert!(config.responsive);
        assert!(!config.display_mode_bar);
    }

    #[test]
    fn test_plot_config_serializes_for_plotly() {
        let value = serde_json::to_value(ChartConfig::default().plot_config()).unwrap();
        assert_eq!(value["displayModeBar"], false);
        assert_eq!(value["responsive"], true);
    }

    #[test]
    fn test_base_layout_omits_unset_axes() {
        let value = serde_json::to_value(ChartConfig::default().base_layout()).unwrap();
        assert_eq!(value["title"], "");
        assert!(value.get("xaxis").is_none());
        assert!(value.get("barmode").is_none());
        assert_eq!(value["font"]["family"], "Inter, sans-serif");
    }
}
