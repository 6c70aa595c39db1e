use serde::Serialize;

use crate::models::calculator_result::CalculatorResult;
use crate::services::emissions_service::{DisplayBreakdown, EmissionsBreakdown};

#[derive(Debug, Clone, Serialize)]
pub struct BreakdownResponse {
    #[serde(flatten)]
    pub breakdown: EmissionsBreakdown,
    pub display: DisplayBreakdown,
}

impl From<EmissionsBreakdown> for BreakdownResponse {
    fn from(breakdown: EmissionsBreakdown) -> Self {
        Self {
            display: breakdown.display(),
            breakdown,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SavedResultResponse {
    pub result: CalculatorResult,
    pub breakdown: BreakdownResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalculatorHistoryResponse {
    /// Sum of every saved monthly total.
    pub total_kg: f64,
    pub latest: Option<CalculatorResult>,
    pub items: Vec<CalculatorResult>,
}

impl From<Vec<CalculatorResult>> for CalculatorHistoryResponse {
    fn from(items: Vec<CalculatorResult>) -> Self {
        Self {
            total_kg: items.iter().map(|r| r.result_kg).sum(),
            latest: items.first().cloned(),
            items,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CalculatorResultList {
    pub total: usize,
    pub items: Vec<CalculatorResult>,
}

impl From<Vec<CalculatorResult>> for CalculatorResultList {
    fn from(items: Vec<CalculatorResult>) -> Self {
        Self {
            total: items.len(),
            items,
        }
    }
}
