// Dashboard domain model
use super::chart::{ChartName, ChartPayload};
use super::kpi::KpiSet;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One complete fetch result. Replaced wholesale on every refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub kpis: KpiSet,
    #[serde(deserialize_with = "known_charts")]
    pub charts: BTreeMap<ChartName, ChartPayload>,
}

impl DashboardData {
    pub fn new(kpis: KpiSet, charts: BTreeMap<ChartName, ChartPayload>) -> Self {
        Self { kpis, charts }
    }

    pub fn chart(&self, name: ChartName) -> Option<&ChartPayload> {
        self.charts.get(&name)
    }
}

/// Chart keys this dashboard has no slot for are skipped. A malformed
/// payload under a known key still fails the decode.
fn known_charts<'de, D>(deserializer: D) -> Result<BTreeMap<ChartName, ChartPayload>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
    let mut charts = BTreeMap::new();

    for (key, payload) in raw {
        let Ok(name) = serde_json::from_value::<ChartName>(Value::String(key.clone())) else {
            tracing::warn!("Skipping unknown chart '{}'", key);
            continue;
        };
        let payload = serde_json::from_value(payload)
            .map_err(|e| D::Error::custom(format!("chart '{}': {}", key, e)))?;
        charts.insert(name, payload);
    }
    Ok(charts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::fixed_dashboard;
    use serde_json::json;

    #[test]
    fn test_unknown_chart_keys_are_skipped() {
        let data = fixed_dashboard();
        let mut wire = serde_json::to_value(&data).unwrap();
        wire["charts"]["payrollForecast"] = json!([{"type": "bar", "x": ["Q1"], "y": [1.0]}]);

        let decoded: DashboardData = serde_json::from_value(wire).unwrap();

        assert_eq!(decoded.charts.len(), data.charts.len());
        assert!(decoded.charts.keys().eq(data.charts.keys()));
    }

    #[test]
    fn test_bad_payload_under_known_key_fails() {
        let mut wire = serde_json::to_value(fixed_dashboard()).unwrap();
        wire["charts"]["riskHeatmap"] = json!("not a chart");

        let err = serde_json::from_value::<DashboardData>(wire).unwrap_err();

        assert!(err.to_string().contains("riskHeatmap"), "got {}", err);
    }
}
