// Mock data source - synthetic workforce metrics for every chart
//
// Values are uniform draws scaled into a per-chart range. The random source
// is passed in so callers decide between entropy and a fixed seed.
use crate::application::data_source::DashboardDataSource;
use crate::application::errors::FetchError;
use crate::domain::chart::{
    AxisValues, BarTrace, ChartName, ChartPayload, ErrorBars, FunnelTrace, HeatmapTrace, PieTrace,
    RiskRow, ScatterTrace, SunburstTrace, Trace,
};
use crate::domain::dashboard::DashboardData;
use crate::domain::kpi::KpiSet;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::ops::Range;
use std::time::Duration;

pub const RISK_RANGE: Range<f64> = 0.1..0.9;
pub const SALARY_RANGE: Range<f64> = 40_000.0..140_000.0;
pub const ATTRITION_RATE_RANGE: Range<f64> = 10.0..20.0;
pub const DEPARTMENT_ATTRITION_RANGE: Range<f64> = 0.05..0.35;
pub const SCORE_RANGE: Range<f64> = 3.0..5.0;
pub const SHARE_RANGE: Range<f64> = 10.0..40.0;
pub const HEADCOUNT_RANGE: Range<f64> = 20.0..60.0;
pub const HIGH_RISK_RANGE: Range<f64> = 0.7..1.0;
pub const AVERAGE_SALARY_RANGE: Range<f64> = 60_000.0..110_000.0;
pub const SALARY_SPREAD_RANGE: Range<f64> = 5_000.0..15_000.0;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const DEPARTMENTS: [&str; 3] = ["Tech", "Product", "Data"];
const ROLES: [&str; 4] = ["Data Scientist", "Software Engineer", "Product Manager", "Data Analyst"];

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn draws<R: Rng + ?Sized>(rng: &mut R, count: usize, range: Range<f64>) -> Vec<f64> {
    (0..count).map(|_| rng.gen_range(range.clone())).collect()
}

fn lines_and_markers(x: AxisValues, y: Vec<f64>) -> Trace {
    Trace::Scatter(ScatterTrace {
        x,
        y,
        mode: "lines+markers".to_string(),
        name: None,
    })
}

/// Risk score per department (rows) and role (columns)
pub fn generate_heatmap<R: Rng + ?Sized>(rng: &mut R, departments: &[&str], roles: &[&str]) -> Trace {
    let z = departments
        .iter()
        .map(|_| draws(rng, roles.len(), RISK_RANGE))
        .collect();

    Trace::Heatmap(HeatmapTrace {
        x: labels(roles),
        y: labels(departments),
        z,
        colorscale: "RdYlGn".to_string(),
        reversescale: true,
    })
}

/// One single-point marker trace per category: salary against risk
pub fn generate_scatter<R: Rng + ?Sized>(rng: &mut R, categories: &[&str]) -> Vec<Trace> {
    categories
        .iter()
        .map(|category| {
            Trace::Scatter(ScatterTrace {
                x: AxisValues::Numbers(vec![rng.gen_range(SALARY_RANGE)]),
                y: vec![rng.gen_range(RISK_RANGE)],
                mode: "markers".to_string(),
                name: Some(category.to_string()),
            })
        })
        .collect()
}

/// Monthly attrition rate for the first `months` months of the year
pub fn generate_time_series<R: Rng + ?Sized>(rng: &mut R, months: usize) -> Trace {
    let months = months.min(MONTHS.len());
    lines_and_markers(
        AxisValues::Labels(labels(&MONTHS[..months])),
        draws(rng, months, ATTRITION_RATE_RANGE),
    )
}

pub fn generate_bar<R: Rng + ?Sized>(rng: &mut R, categories: &[&str]) -> Trace {
    Trace::Bar(BarTrace {
        x: labels(categories),
        y: draws(rng, categories.len(), DEPARTMENT_ATTRITION_RANGE),
        name: None,
        error_y: None,
    })
}

/// Two engagement metrics side by side for every category
pub fn generate_grouped_bar<R: Rng + ?Sized>(rng: &mut R, categories: &[&str]) -> Vec<Trace> {
    ["Job Satisfaction", "Work-Life Balance"]
        .into_iter()
        .map(|metric| {
            Trace::Bar(BarTrace {
                x: labels(categories),
                y: draws(rng, categories.len(), SCORE_RANGE),
                name: Some(metric.to_string()),
                error_y: None,
            })
        })
        .collect()
}

pub fn generate_pie<R: Rng + ?Sized>(rng: &mut R, slices: &[&str]) -> Trace {
    Trace::Pie(PieTrace {
        labels: labels(slices),
        values: draws(rng, slices.len(), SHARE_RANGE),
    })
}

/// Departments split by segment. A department's value is the sum of its
/// segments so Plotly can lay the rings out proportionally.
pub fn generate_sunburst<R: Rng + ?Sized>(rng: &mut R, departments: &[&str], segments: &[&str]) -> Trace {
    let mut trace = SunburstTrace {
        ids: Vec::new(),
        labels: Vec::new(),
        parents: Vec::new(),
        values: Vec::new(),
    };

    for department in departments {
        let leaves = draws(rng, segments.len(), HEADCOUNT_RANGE);

        trace.ids.push(department.to_string());
        trace.labels.push(department.to_string());
        trace.parents.push(String::new());
        trace.values.push(leaves.iter().sum());

        for (segment, value) in segments.iter().zip(leaves) {
            trace.ids.push(format!("{department}/{segment}"));
            trace.labels.push(segment.to_string());
            trace.parents.push(department.to_string());
            trace.values.push(value);
        }
    }

    Trace::Sunburst(trace)
}

pub fn generate_line<R: Rng + ?Sized>(rng: &mut R, categories: &[&str]) -> Trace {
    lines_and_markers(
        AxisValues::Labels(labels(categories)),
        draws(rng, categories.len(), SCORE_RANGE),
    )
}

fn department_for_role(role: &str) -> &'static str {
    if role.contains("Engineer") {
        "Tech"
    } else if role.contains("Product") {
        "Product"
    } else {
        "Data"
    }
}

/// High-risk employees, one per role, with ids counting up from 1000
pub fn generate_table<R: Rng + ?Sized>(rng: &mut R, roles: &[&str]) -> Vec<RiskRow> {
    roles
        .iter()
        .zip(1000u32..)
        .map(|(role, employee_id)| {
            let score: f64 = rng.gen_range(HIGH_RISK_RANGE);
            RiskRow {
                employee_id,
                job_role: role.to_string(),
                department: department_for_role(role).to_string(),
                // three decimals, rounded down so the score stays below 1.0
                risk_score: (score * 1000.0).floor() / 1000.0,
            }
        })
        .collect()
}

/// Funnel narrowing by 20 per level. Deterministic.
pub fn generate_funnel(levels: &[&str]) -> Trace {
    let x = (0..levels.len())
        .map(|i| (100.0 - 20.0 * i as f64).max(0.0))
        .collect();

    Trace::Funnel(FunnelTrace { y: labels(levels), x })
}

/// Average salary per category with a spread shown as error bars
pub fn generate_bar_with_error<R: Rng + ?Sized>(rng: &mut R, categories: &[&str]) -> Trace {
    let y = draws(rng, categories.len(), AVERAGE_SALARY_RANGE);
    let spread = draws(rng, categories.len(), SALARY_SPREAD_RANGE);

    Trace::Bar(BarTrace {
        x: labels(categories),
        y,
        name: None,
        error_y: Some(ErrorBars {
            kind: "data".to_string(),
            array: spread,
        }),
    })
}

/// Baseline KPI record
pub fn generate_kpis() -> KpiSet {
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

fn generate_payload<R: Rng + ?Sized>(rng: &mut R, chart: ChartName) -> ChartPayload {
    match chart {
        ChartName::RiskHeatmap => ChartPayload::Trace(generate_heatmap(rng, &DEPARTMENTS, &ROLES)),
        ChartName::WorkforceRoi => ChartPayload::Traces(generate_scatter(rng, &DEPARTMENTS)),
        ChartName::AttritionForecast => ChartPayload::Trace(generate_time_series(rng, 12)),
        ChartName::AttritionAnalysis => ChartPayload::Trace(generate_bar(rng, &DEPARTMENTS)),
        ChartName::RecruitmentPerformance => ChartPayload::Traces(generate_scatter(rng, &ROLES)),
        ChartName::EmployeeEngagement => ChartPayload::Traces(generate_grouped_bar(rng, &DEPARTMENTS)),
        ChartName::PerformanceAnalytics => {
            ChartPayload::Trace(generate_pie(rng, &["Excellent", "Good", "Average", "Poor"]))
        }
        ChartName::WorkforceDemographics => {
            ChartPayload::Trace(generate_sunburst(rng, &["Tech", "Product"], &["Male", "Female"]))
        }
        ChartName::CompensationIntelligence => ChartPayload::Traces(generate_scatter(rng, &ROLES)),
        ChartName::LearningRoi => ChartPayload::Trace(generate_line(
            rng,
            &["0-20h", "21-40h", "41-60h", "61-80h", "80+h"],
        )),
        ChartName::ManagerPerformance => {
            ChartPayload::Traces(generate_scatter(rng, &["Manager A", "Manager B", "Manager C"]))
        }
        ChartName::RiskMonitoring => ChartPayload::Table(generate_table(
            rng,
            &["Data Scientist", "Product Manager", "Software Engineer"],
        )),
        ChartName::TalentPipeline => {
            ChartPayload::Trace(generate_funnel(&["Junior", "Mid", "Senior", "Lead"]))
        }
        ChartName::JourneyMapping => {
            ChartPayload::Trace(generate_line(rng, &["<1yr", "1-3yrs", "3-5yrs", "5+yrs"]))
        }
        ChartName::CompensationAnalytics => ChartPayload::Trace(generate_bar_with_error(rng, &ROLES)),
        ChartName::WorkforcePlanning => ChartPayload::Trace(generate_time_series(rng, 12)),
    }
}

/// A full dashboard snapshot with every chart populated
pub fn generate_dashboard<R: Rng + ?Sized>(rng: &mut R) -> DashboardData {
    let charts: BTreeMap<ChartName, ChartPayload> = ChartName::ALL
        .into_iter()
        .map(|chart| (chart, generate_payload(rng, chart)))
        .collect();

    DashboardData::new(generate_kpis(), charts)
}

/// In-process data source that answers after a simulated network delay
#[derive(Debug, Clone)]
pub struct MockDataSource {
    delay: Duration,
}

impl MockDataSource {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl DashboardDataSource for MockDataSource {
    async fn fetch(&self) -> Result<DashboardData, FetchError> {
        tokio::time::sleep(self.delay).await;

        let mut rng = StdRng::from_entropy();
        Ok(generate_dashboard(&mut rng))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
