use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

pub const MONTHLY_CALCULATOR: &str = "monthly";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CalculatorResult {
    pub id: Uuid,
    pub user_id: Uuid,
    pub calculator_type: String,
    pub inputs: JsonValue,
    pub result_kg: f64,
    pub created_at: DateTime<Utc>,
}
