// Chart domain models - Plotly trace shapes and chart payloads
use serde::{Deserialize, Serialize};
use std::fmt;

/// The sixteen named charts the dashboard knows about.
///
/// Serialized names match the keys of `DashboardData.charts` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartName {
    RiskHeatmap,
    #[serde(rename = "workforceROI")]
    WorkforceRoi,
    AttritionForecast,
    AttritionAnalysis,
    RecruitmentPerformance,
    EmployeeEngagement,
    PerformanceAnalytics,
    WorkforceDemographics,
    CompensationIntelligence,
    #[serde(rename = "learningROI")]
    LearningRoi,
    ManagerPerformance,
    RiskMonitoring,
    TalentPipeline,
    JourneyMapping,
    CompensationAnalytics,
    WorkforcePlanning,
}

impl ChartName {
    pub const ALL: [ChartName; 16] = [
        ChartName::RiskHeatmap,
        ChartName::WorkforceRoi,
        ChartName::AttritionForecast,
        ChartName::AttritionAnalysis,
        ChartName::RecruitmentPerformance,
        ChartName::EmployeeEngagement,
        ChartName::PerformanceAnalytics,
        ChartName::WorkforceDemographics,
        ChartName::CompensationIntelligence,
        ChartName::LearningRoi,
        ChartName::ManagerPerformance,
        ChartName::RiskMonitoring,
        ChartName::TalentPipeline,
        ChartName::JourneyMapping,
        ChartName::CompensationAnalytics,
        ChartName::WorkforcePlanning,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ChartName::RiskHeatmap => "riskHeatmap",
            ChartName::WorkforceRoi => "workforceROI",
            ChartName::AttritionForecast => "attritionForecast",
            ChartName::AttritionAnalysis => "attritionAnalysis",
            ChartName::RecruitmentPerformance => "recruitmentPerformance",
            ChartName::EmployeeEngagement => "employeeEngagement",
            ChartName::PerformanceAnalytics => "performanceAnalytics",
            ChartName::WorkforceDemographics => "workforceDemographics",
            ChartName::CompensationIntelligence => "compensationIntelligence",
            ChartName::LearningRoi => "learningROI",
            ChartName::ManagerPerformance => "managerPerformance",
            ChartName::RiskMonitoring => "riskMonitoring",
            ChartName::TalentPipeline => "talentPipeline",
            ChartName::JourneyMapping => "journeyMapping",
            ChartName::CompensationAnalytics => "compensationAnalytics",
            ChartName::WorkforcePlanning => "workforcePlanning",
        }
    }
}

impl fmt::Display for ChartName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Axis values are either category labels or numbers (salaries, hours).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValues {
    Numbers(Vec<f64>),
    Labels(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapTrace {
    pub x: Vec<String>,
    pub y: Vec<String>,
    pub z: Vec<Vec<f64>>,
    pub colorscale: String,
    pub reversescale: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterTrace {
    pub x: AxisValues,
    pub y: Vec<f64>,
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBars {
    #[serde(rename = "type")]
    pub kind: String,
    pub array: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarTrace {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_y: Option<ErrorBars>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieTrace {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunburstTrace {
    pub ids: Vec<String>,
    pub labels: Vec<String>,
    pub parents: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelTrace {
    pub y: Vec<String>,
    pub x: Vec<f64>,
}

/// A single Plotly trace, tagged the way Plotly expects (`"type": "pie"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Heatmap(HeatmapTrace),
    Scatter(ScatterTrace),
    Bar(BarTrace),
    Pie(PieTrace),
    Sunburst(SunburstTrace),
    Funnel(FunnelTrace),
}

/// One row of the risk-monitoring table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskRow {
    pub employee_id: u32,
    pub job_role: String,
    pub department: String,
    pub risk_score: f64,
}

impl RiskRow {
    /// Rows above this score get highlighted in the table
    pub const CRITICAL_THRESHOLD: f64 = 0.8;

    pub fn is_critical(&self) -> bool {
        self.risk_score > Self::CRITICAL_THRESHOLD
    }
}

/// Payload for one chart. Shapes are not validated here; the renderer
/// rejects a payload whose shape doesn't match its chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartPayload {
    Traces(Vec<Trace>),
    Trace(Trace),
    Table(Vec<RiskRow>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    Single,
    Many,
    Table,
}

impl ChartPayload {
    pub fn shape(&self) -> PayloadShape {
        match self {
            ChartPayload::Trace(_) => PayloadShape::Single,
            ChartPayload::Traces(_) => PayloadShape::Many,
            ChartPayload::Table(_) => PayloadShape::Table,
        }
    }
}

impl fmt::Display for PayloadShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PayloadShape::Single => "single-trace",
            PayloadShape::Many => "multi-trace",
            PayloadShape::Table => "table",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trace_serializes_with_plotly_type_tag() {
        let trace = Trace::Pie(PieTrace {
            labels: vec!["A".to_string()],
            values: vec![12.5],
        });

        let value = serde_json::to_value(&trace).unwrap();
        assert_eq!(value, json!({"type": "pie", "labels": ["A"], "values": [12.5]}));
    }

    #[test]
    fn test_bar_error_bars_use_plotly_field_names() {
        let trace = Trace::Bar(BarTrace {
            x: vec!["QA".to_string()],
            y: vec![70000.0],
            name: None,
            error_y: Some(ErrorBars {
                kind: "data".to_string(),
                array: vec![6000.0],
            }),
        });

        let value = serde_json::to_value(&trace).unwrap();
        assert_eq!(value["error_y"]["type"], "data");
        assert!(value.get("name").is_none());
    }

    #[test]
    fn test_payload_untagged_decoding() {
        let table: ChartPayload = serde_json::from_value(json!([
            {"employeeId": 1000, "jobRole": "QA", "department": "Data", "riskScore": 0.91}
        ]))
        .unwrap();
        assert_eq!(table.shape(), PayloadShape::Table);

        let many: ChartPayload = serde_json::from_value(json!([
            {"type": "scatter", "x": [50000.0], "y": [0.4], "mode": "markers", "name": "Tech"}
        ]))
        .unwrap();
        assert_eq!(many.shape(), PayloadShape::Many);

        let single: ChartPayload =
            serde_json::from_value(json!({"type": "funnel", "y": ["Junior"], "x": [100.0]})).unwrap();
        assert_eq!(single.shape(), PayloadShape::Single);
    }

    #[test]
    fn test_chart_names_use_wire_keys() {
        assert_eq!(serde_json::to_value(ChartName::WorkforceRoi).unwrap(), "workforceROI");
        assert_eq!(serde_json::to_value(ChartName::LearningRoi).unwrap(), "learningROI");
        for chart in ChartName::ALL {
            assert_eq!(serde_json::to_value(chart).unwrap(), chart.key());
        }
    }
}
