// KPI domain models
use serde::{Deserialize, Serialize};

/// The eight headline metrics shown as summary widgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSet {
    pub replacement_cost: f64,
    pub recruiting_spend: f64,
    pub revenue_at_risk: f64,
    pub current_attrition: f64,
    pub new_hires: u32,
    pub open_positions: u32,
    pub interviews_today: u32,
    pub exit_interviews: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Info,
    Danger,
    Warning,
    Primary,
}

impl Tone {
    pub fn css_class(&self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Info => "info",
            Tone::Danger => "danger",
            Tone::Warning => "warning",
            Tone::Primary => "primary",
        }
    }
}

/// A KPI ready for display: formatted value plus icon, tone and an
/// optional explanation of how it is calculated.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiWidget {
    pub label: &'static str,
    pub value: String,
    pub icon: &'static str,
    pub tone: Tone,
    pub tooltip: Option<&'static str>,
}

impl KpiWidget {
    fn new(label: &'static str, value: impl ToString, icon: &'static str, tone: Tone) -> Self {
        Self {
            label,
            value: value.to_string(),
            icon,
            tone,
            tooltip: None,
        }
    }

    fn with_tooltip(mut self, tooltip: &'static str) -> Self {
        self.tooltip = Some(tooltip);
        self
    }
}

impl KpiSet {
    /// Cards for the `financial-kpis` row
    pub fn financial_widgets(&self) -> Vec<KpiWidget> {
        vec![
            KpiWidget::new("Replacement Cost", self.replacement_cost, "fa-money-bill-wave", Tone::Success)
                .with_tooltip("Sum of replacement cost (monthly salary × 3) for high-risk employees."),
            KpiWidget::new("Recruiting Spend", self.recruiting_spend, "fa-search-dollar", Tone::Info)
                .with_tooltip("Estimated recruiting spend (number of high-risk employees × 15,000)."),
            KpiWidget::new(
                "Revenue at Risk",
                self.revenue_at_risk,
                "fa-exclamation-triangle",
                Tone::Danger,
            )
            .with_tooltip("Sum of monthly salaries × 6 for high-risk, critical roles."),
            KpiWidget::new("Current Attrition (%)", self.current_attrition, "fa-user-minus", Tone::Warning)
                .with_tooltip("Percentage of employees flagged as attrition risk."),
        ]
    }

    /// Cards for the `daily-pulse-kpis` row
    pub fn daily_pulse_widgets(&self) -> Vec<KpiWidget> {
        vec![
            KpiWidget::new("New Hires (MTD)", self.new_hires, "fa-user-plus", Tone::Primary),
            KpiWidget::new("Open Positions", self.open_positions, "fa-briefcase", Tone::Warning),
            KpiWidget::new("Interviews Today", self.interviews_today, "fa-comments", Tone::Info),
            KpiWidget::new("Exit Interviews", self.exit_interviews, "fa-door-open", Tone::Danger),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> KpiSet {
        KpiSet {
            replacement_cost: 2850.0,
            recruiting_spend: 180.0,
            revenue_at_risk: 1245.0,
            current_attrition: 14.2,
            new_hires: 23,
            open_positions: 15,
            interviews_today: 38,
            exit_interviews: 7,
        }
    }

    #[test]
    fn test_financial_widgets_format_values() {
        let widgets = sample().financial_widgets();

        let values: Vec<&str> = widgets.iter().map(|w| w.value.as_str()).collect();
        assert_eq!(values, vec!["2850", "180", "1245", "14.2"]);
        assert!(widgets.iter().all(|w| w.tooltip.is_some()));
        assert_eq!(widgets[2].tone.css_class(), "danger");
    }

    #[test]
    fn test_daily_pulse_widgets() {
        let widgets = sample().daily_pulse_widgets();

        assert_eq!(widgets.len(), 4);
        assert_eq!(widgets[0].label, "New Hires (MTD)");
        assert_eq!(widgets[3].value, "7");
    }

    #[test]
    fn test_kpis_use_camel_case_on_the_wire() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["replacementCost"], 2850.0);
        assert_eq!(value["exitInterviews"], 7);
    }
}
