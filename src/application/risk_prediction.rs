// Attrition-risk prediction. No trained model is wired in; every employee
// gets the same mock score, classified into a risk band.
use crate::application::errors::PredictionError;
use serde::Serialize;
use serde_json::Value;

const MOCK_RISK_SCORE: f64 = 0.75;
const MOCK_CONFIDENCE: f64 = 0.92;
const TOP_RISK_FACTORS: [&str; 3] = [
    "Low satisfaction score",
    "Below market salary",
    "Limited growth opportunities",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn classify(score: f64) -> Self {
        if score > 0.65 {
            RiskLevel::High
        } else if score > 0.35 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub employee_id: i64,
    pub attrition_risk_score: f64,
    pub risk_level: RiskLevel,
    pub confidence: f64,
    pub top_risk_factors: Vec<String>,
}

/// Accepts a JSON integer, a float (truncated toward zero) or an integer string
pub fn parse_employee_id(body: &Value) -> Result<i64, PredictionError> {
    let raw = body
        .get("employee_id")
        .filter(|v| !v.is_null())
        .ok_or(PredictionError::MissingEmployeeId)?;

    match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .map(f64::trunc)
                    .filter(|f| *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                    .map(|f| f as i64)
            })
            .ok_or(PredictionError::InvalidEmployeeId),
        Value::String(s) => s.trim().parse().map_err(|_| PredictionError::InvalidEmployeeId),
        _ => Err(PredictionError::InvalidEmployeeId),
    }
}

pub fn predict(body: &Value) -> Result<Prediction, PredictionError> {
    let employee_id = parse_employee_id(body)?;
    let score = (MOCK_RISK_SCORE * 10_000.0).round() / 10_000.0;

    tracing::debug!(employee_id, score, "Attrition risk predicted");
    Ok(Prediction {
        employee_id,
        attrition_risk_score: score,
        risk_level: RiskLevel::classify(score),
        confidence: MOCK_CONFIDENCE,
        top_risk_factors: TOP_RISK_FACTORS.iter().map(|f| f.to_string()).collect(),
    })
}
