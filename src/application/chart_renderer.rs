// Chart renderer - one adapter per chart, mapping a payload onto a draw call
use crate::application::errors::RenderError;
use crate::application::fragments;
use crate::application::page_surface::{ChartSurface, DomSurface};
use crate::domain::chart::PayloadShape::{Many, Single};
use crate::domain::chart::{ChartName, ChartName as C, ChartPayload, PayloadShape, RiskRow};
use crate::domain::dashboard::DashboardData;
use crate::domain::section::{Section, Section as S};
use crate::domain::theme::{AxisLayout, ChartConfig, PlotCall, PlotLayout};
use futures::future::join_all;
use std::sync::Arc;

pub const RISK_TABLE_CONTAINER: &str = "risk-monitoring-table";

/// Static description of one chart adapter
#[derive(Debug, Clone, Copy)]
pub struct ChartSpec {
    pub chart: ChartName,
    pub container_id: &'static str,
    pub title: &'static str,
    pub section: Section,
    pub shape: PayloadShape,
    pub x_title: Option<&'static str>,
    pub y_title: Option<&'static str>,
    pub x_tick_angle: Option<i32>,
    pub barmode: Option<&'static str>,
}

impl ChartSpec {
    const fn new(
        chart: ChartName,
        container_id: &'static str,
        title: &'static str,
        section: Section,
        shape: PayloadShape,
    ) -> Self {
        Self {
            chart,
            container_id,
            title,
            section,
            shape,
            x_title: None,
            y_title: None,
            x_tick_angle: None,
            barmode: None,
        }
    }

    const fn axes(mut self, x_title: &'static str, y_title: &'static str) -> Self {
        self.x_title = Some(x_title);
        self.y_title = Some(y_title);
        self
    }

    const fn tick_angle(mut self, angle: i32) -> Self {
        self.x_tick_angle = Some(angle);
        self
    }

    const fn grouped(mut self) -> Self {
        self.barmode = Some("group");
        self
    }

    /// Theme layout plus this chart's axis titles and options
    pub fn layout(&self, config: &ChartConfig) -> PlotLayout {
        let mut layout = config.base_layout();
        layout.xaxis = self.x_title.map(|title| AxisLayout {
            title: title.to_string(),
            tickangle: self.x_tick_angle,
        });
        layout.yaxis = self.y_title.map(|title| AxisLayout {
            title: title.to_string(),
            tickangle: None,
        });
        layout.barmode = self.barmode.map(str::to_string);
        layout
    }
}

pub const CHART_SPECS: [ChartSpec; 15] = [
    ChartSpec::new(C::RiskHeatmap, "risk-heatmap-chart", "Business Risk Heatmap", S::Executive, Single),
    ChartSpec::new(C::WorkforceRoi, "workforce-roi-chart", "Workforce ROI Metrics", S::Executive, Many)
        .axes("Average Salary", "Risk Score"),
    ChartSpec::new(
        C::AttritionForecast,
        "attrition-forecast-chart",
        "Predictive Attrition Forecast",
        S::Executive,
        Single,
    )
    .axes("Month", "Attrition Rate (%)"),
    ChartSpec::new(C::AttritionAnalysis, "attrition-analysis-chart", "Attrition Analysis", S::HrOps, Single)
        .axes("Department", "Attrition Rate"),
    ChartSpec::new(
        C::RecruitmentPerformance,
        "recruitment-performance-chart",
        "Recruitment Performance",
        S::HrOps,
        Many,
    )
    .axes("Days to Fill", "Conversion Rate"),
    ChartSpec::new(C::EmployeeEngagement, "employee-engagement-chart", "Employee Engagement", S::HrOps, Many)
        .axes("Department", "Average Score")
        .grouped(),
    ChartSpec::new(
        C::PerformanceAnalytics,
        "performance-analytics-chart",
        "Performance Analytics",
        S::HrOps,
        Single,
    ),
    ChartSpec::new(
        C::WorkforceDemographics,
        "workforce-demographics-chart",
        "Workforce Demographics",
        S::Strategic,
        Single,
    ),
    ChartSpec::new(
        C::CompensationIntelligence,
        "compensation-intelligence-chart",
        "Compensation Intelligence",
        S::Strategic,
        Many,
    )
    .axes("Average Salary", "Risk Score"),
    ChartSpec::new(C::LearningRoi, "learning-roi-chart", "Learning & Development ROI", S::Strategic, Single)
        .axes("Training Hours", "Score"),
    ChartSpec::new(
        C::ManagerPerformance,
        "manager-performance-chart",
        "Manager Performance",
        S::Strategic,
        Many,
    )
    .axes("Manager Satisfaction", "Team Risk Score"),
    ChartSpec::new(C::TalentPipeline, "talent-pipeline-chart", "Talent Pipeline", S::RealTime, Single),
    ChartSpec::new(
        C::JourneyMapping,
        "journey-mapping-chart",
        "Employee Journey Mapping",
        S::Advanced,
        Single,
    )
    .axes("Tenure", "Job Satisfaction"),
    ChartSpec::new(
        C::CompensationAnalytics,
        "compensation-analytics-chart",
        "Compensation Analytics",
        S::Advanced,
        Single,
    )
    .axes("Job Role", "Average Salary")
    .tick_angle(-45),
    ChartSpec::new(C::WorkforcePlanning, "workforce-planning-chart", "Workforce Planning", S::Advanced, Single)
        .axes("Month", "Headcount"),
];

/// Outcome of drawing every chart once
#[derive(Debug, Default)]
pub struct RenderReport {
    pub rendered: usize,
    pub failures: Vec<(ChartName, RenderError)>,
}

impl RenderReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Clone)]
pub struct ChartRenderer {
    config: Arc<ChartConfig>,
    charts: Arc<dyn ChartSurface>,
    dom: Arc<dyn DomSurface>,
}

impl ChartRenderer {
    pub fn new(config: ChartConfig, charts: Arc<dyn ChartSurface>, dom: Arc<dyn DomSurface>) -> Self {
        Self {
            config: Arc::new(config),
            charts,
            dom,
        }
    }

    /// Build the draw call for one chart without issuing it
    pub fn plot_call(&self, spec: &ChartSpec, data: &DashboardData) -> Result<PlotCall, RenderError> {
        let payload = data
            .chart(spec.chart)
            .ok_or(RenderError::MissingPayload(spec.chart))?;

        let traces = match (spec.shape, payload) {
            (PayloadShape::Single, ChartPayload::Trace(trace)) => vec![trace.clone()],
            (PayloadShape::Many, ChartPayload::Traces(traces)) => traces.clone(),
            (expected, other) => {
                return Err(RenderError::ShapeMismatch {
                    chart: spec.chart,
                    expected,
                    actual: other.shape(),
                });
            }
        };

        Ok(PlotCall {
            container_id: spec.container_id.to_string(),
            data: traces,
            layout: spec.layout(&self.config),
            config: self.config.plot_config(),
        })
    }

    pub async fn render_chart(&self, spec: &ChartSpec, data: &DashboardData) -> Result<(), RenderError> {
        let call = self.plot_call(spec, data)?;
        self.charts.new_plot(call).await
    }

    /// Risk table is plain HTML rather than a chart
    pub fn render_risk_table(&self, data: &DashboardData) -> Result<(), RenderError> {
        let rows: &[RiskRow] = match data.chart(ChartName::RiskMonitoring) {
            Some(ChartPayload::Table(rows)) => rows,
            // an empty JSON array decodes as an empty trace list
            Some(ChartPayload::Traces(traces)) if traces.is_empty() => &[],
            Some(other) => {
                return Err(RenderError::ShapeMismatch {
                    chart: ChartName::RiskMonitoring,
                    expected: PayloadShape::Table,
                    actual: other.shape(),
                });
            }
            None => return Err(RenderError::MissingPayload(ChartName::RiskMonitoring)),
        };

        let html = fragments::risk_table(rows).into_string();
        if !self.dom.set_inner_html(RISK_TABLE_CONTAINER, html) {
            return Err(RenderError::MissingContainer(RISK_TABLE_CONTAINER.to_string()));
        }
        Ok(())
    }

    /// Issue every draw call together, wait for all of them, then fill the table
    pub async fn render_all(&self, data: &DashboardData) -> RenderReport {
        let draws = CHART_SPECS.iter().map(|spec| async move {
            (spec.chart, self.render_chart(spec, data).await)
        });
        let mut results = join_all(draws).await;
        results.push((ChartName::RiskMonitoring, self.render_risk_table(data)));

        let mut report = RenderReport::default();
        for (chart, result) in results {
            match result {
                Ok(()) => report.rendered += 1,
                Err(e) => report.failures.push((chart, e)),
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::mock_data::generate_dashboard;
    use crate::domain::chart::{PieTrace, Trace};
    use crate::infrastructure::virtual_dom::VirtualDom;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixture() -> (VirtualDom, ChartRenderer, DashboardData) {
        let dom = VirtualDom::with_dashboard_page();
        let renderer = ChartRenderer::new(
            ChartConfig::default(),
            Arc::new(dom.clone()),
            Arc::new(dom.clone()),
        );
        let data = generate_dashboard(&mut StdRng::seed_from_u64(11));
        (dom, renderer, data)
    }

    fn spec(chart: ChartName) -> &'static ChartSpec {
        CHART_SPECS.iter().find(|s| s.chart == chart).unwrap()
    }

    #[test]
    fn test_specs_cover_every_plotted_chart_once() {
        for chart in ChartName::ALL {
            let count = CHART_SPECS.iter().filter(|s| s.chart == chart).count();
            let expected = if chart == ChartName::RiskMonitoring { 0 } else { 1 };
            assert_eq!(count, expected, "{}", chart);
        }
        assert!(CHART_SPECS.iter().all(|s| s.container_id.ends_with("-chart")));
    }

    #[test]
    fn test_layout_merges_axes_into_theme() {
        let layout = spec(ChartName::CompensationAnalytics).layout(&ChartConfig::default());

        let xaxis = layout.xaxis.unwrap();
        assert_eq!(xaxis.title, "Job Role");
        assert_eq!(xaxis.tickangle, Some(-45));
        assert_eq!(layout.yaxis.unwrap().title, "Average Salary");
        assert_eq!(layout.title, "");
        assert_eq!(layout.colorway.len(), 6);

        let engagement = spec(ChartName::EmployeeEngagement).layout(&ChartConfig::default());
        assert_eq!(engagement.barmode.as_deref(), Some("group"));

        let heatmap = spec(ChartName::RiskHeatmap).layout(&ChartConfig::default());
        assert!(heatmap.xaxis.is_none());
    }

    #[test]
    fn test_single_trace_is_wrapped() {
        let (_, renderer, data) = fixture();

        let call = renderer.plot_call(spec(ChartName::PerformanceAnalytics), &data).unwrap();
        assert_eq!(call.container_id, "performance-analytics-chart");
        assert_eq!(call.data.len(), 1);

        let many = renderer.plot_call(spec(ChartName::RecruitmentPerformance), &data).unwrap();
        assert_eq!(many.data.len(), 4);
    }

    #[test]
    fn test_shape_mismatch_is_a_render_error() {
        let (_, renderer, mut data) = fixture();
        data.charts.insert(
            ChartName::WorkforceRoi,
            ChartPayload::Trace(Trace::Pie(PieTrace { labels: vec![], values: vec![] })),
        );

        let err = renderer.plot_call(spec(ChartName::WorkforceRoi), &data).unwrap_err();
        assert_eq!(
            err,
            RenderError::ShapeMismatch {
                chart: ChartName::WorkforceRoi,
                expected: PayloadShape::Many,
                actual: PayloadShape::Single,
            }
        );
    }

    #[tokio::test]
    async fn test_render_is_idempotent() {
        let (dom, renderer, data) = fixture();

        renderer.render_all(&data).await;
        let first = dom.snapshot();
        renderer.render_all(&data).await;
        renderer.render_all(&data).await;
        let later = dom.snapshot();

        assert_eq!(first.plots.len(), 15);
        for (id, entry) in &first.plots {
            assert_eq!(later.plots[id].call, entry.call);
        }
        assert_eq!(
            first.elements[RISK_TABLE_CONTAINER].html,
            later.elements[RISK_TABLE_CONTAINER].html
        );
    }

    #[tokio::test]
    async fn test_one_bad_chart_does_not_block_the_rest() {
        let (dom, renderer, mut data) = fixture();
        data.charts.remove(&ChartName::TalentPipeline);

        let report = renderer.render_all(&data).await;

        assert_eq!(report.rendered, 15);
        assert_eq!(
            report.failures,
            vec![(ChartName::TalentPipeline, RenderError::MissingPayload(ChartName::TalentPipeline))]
        );
        assert!(!report.is_clean());
        assert!(dom.snapshot().plots.contains_key("workforce-planning-chart"));
    }

    #[tokio::test]
    async fn test_missing_container_is_reported() {
        let dom = VirtualDom::new();
        let renderer = ChartRenderer::new(
            ChartConfig::default(),
            Arc::new(dom.clone()),
            Arc::new(dom.clone()),
        );
        let data = generate_dashboard(&mut StdRng::seed_from_u64(3));

        let report = renderer.render_all(&data).await;

        assert_eq!(report.rendered, 0);
        assert_eq!(report.failures.len(), 16);
        assert!(matches!(report.failures[0].1, RenderError::MissingContainer(_)));
    }
}
