use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::calculator_result::{CalculatorResult, MONTHLY_CALCULATOR};
use crate::services::emissions_service::{self, CalculatorInputs, EmissionsBreakdown};

pub const EMPTY_RESULT_NOTICE: &str = "請先輸入數據後再儲存";

const RESULT_COLUMNS: &str = "id, user_id, calculator_type, inputs, result_kg, created_at";

#[derive(Clone)]
pub struct CalculatorService {
    pool: PgPool,
}

impl CalculatorService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Computes and stores one monthly result. A zero total is refused.
    pub async fn save(
        &self,
        user_id: Uuid,
        inputs: &CalculatorInputs,
    ) -> Result<(CalculatorResult, EmissionsBreakdown)> {
        let breakdown = emissions_service::calculate(inputs);
        if breakdown.total_monthly_kg == 0.0 {
            return Err(Error::BadRequest(EMPTY_RESULT_NOTICE.to_string()));
        }

        let result = sqlx::query_as::<_, CalculatorResult>(&format!(
            r#"
            INSERT INTO calculator_results (user_id, calculator_type, inputs, result_kg)
            VALUES ($1, $2, $3, $4)
            RETURNING {RESULT_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(MONTHLY_CALCULATOR)
        .bind(serde_json::to_value(inputs)?)
        .bind(breakdown.total_monthly_kg)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(%user_id, result_kg = result.result_kg, "calculator result saved");
        Ok((result, breakdown))
    }

    pub async fn history(&self, user_id: Uuid) -> Result<Vec<CalculatorResult>> {
        let rows = sqlx::query_as::<_, CalculatorResult>(&format!(
            "SELECT {RESULT_COLUMNS} FROM calculator_results WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_all(&self) -> Result<Vec<CalculatorResult>> {
        let rows = sqlx::query_as::<_, CalculatorResult>(&format!(
            "SELECT {RESULT_COLUMNS} FROM calculator_results ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
