// HTML fragments for non-chart widgets. maud escapes every interpolated
// value, so row data from a backend cannot inject markup.
use crate::domain::chart::RiskRow;
use crate::domain::kpi::KpiWidget;
use maud::{html, Markup};

pub fn kpi_cards(widgets: &[KpiWidget]) -> Markup {
    html! {
        @for kpi in widgets {
            div class="col-md-3 mb-3" {
                div class={ "kpi-card " (kpi.tone.css_class()) }
                    data-bs-toggle=[kpi.tooltip.map(|_| "tooltip")]
                    title=[kpi.tooltip]
                {
                    div class="kpi-value" {
                        i class={ "fas " (kpi.icon) " me-2" } {}
                        (kpi.value)
                    }
                    div class="kpi-label" { (kpi.label) }
                }
            }
        }
    }
}

pub fn risk_table(rows: &[RiskRow]) -> Markup {
    html! {
        table class="table table-hover" {
            thead {
                tr {
                    th { "Employee ID" }
                    th { "Job Role" }
                    th { "Department" }
                    th { "Risk Score" }
                }
            }
            tbody {
                @for row in rows {
                    tr class=[row.is_critical().then_some("table-danger")] {
                        td { (row.employee_id) }
                        td { (row.job_role) }
                        td { (row.department) }
                        td { (format!("{:.3}", row.risk_score)) }
                    }
                }
            }
        }
    }
}
