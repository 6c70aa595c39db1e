use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::Result;
use crate::models::survey_response::SurveyType;
use crate::models::user_role::Role;

#[derive(Debug, Clone, Serialize)]
pub struct AdminStats {
    pub total_users: i64,
    pub completed_survey: i64,
    pub total_lessons_completed: i64,
    pub total_calculations: i64,
    pub avg_emissions: f64,
    pub survey_breakdown: BTreeMap<String, i64>,
    pub persona_distribution: BTreeMap<String, i64>,
    pub college_distribution: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserSummary {
    pub user_id: Uuid,
    pub username: Option<String>,
    pub persona: Option<String>,
    pub college: Option<String>,
    pub grade: Option<String>,
    pub response_count: i64,
    pub completed_lessons: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct AdminService {
    pool: PgPool,
}

impl AdminService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn is_admin(&self, user_id: Uuid) -> Result<bool> {
        let is_admin: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM user_roles WHERE user_id = $1 AND role = $2)",
        )
        .bind(user_id)
        .bind(Role::Admin.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(is_admin)
    }

    pub async fn stats(&self) -> Result<AdminStats> {
        let total_users = self.count("SELECT COUNT(*) FROM profiles").await?;
        let completed_survey = self
            .count("SELECT COUNT(*) FROM profiles WHERE persona IS NOT NULL AND persona <> ''")
            .await?;
        let total_lessons_completed = self
            .count("SELECT COUNT(*) FROM learning_progress WHERE completed")
            .await?;
        let total_calculations = self.count("SELECT COUNT(*) FROM calculator_results").await?;

        let avg_emissions: f64 =
            sqlx::query_scalar("SELECT COALESCE(AVG(result_kg), 0)::float8 FROM calculator_results")
                .fetch_one(&self.pool)
                .await?;

        let mut survey_breakdown: BTreeMap<String, i64> = SurveyType::ALL
            .into_iter()
            .map(|t| (t.as_str().to_string(), 0))
            .collect();
        survey_breakdown.extend(
            self.grouped("SELECT survey_type, COUNT(*) FROM survey_responses GROUP BY survey_type")
                .await?,
        );

        let persona_distribution = self
            .grouped(
                "SELECT persona, COUNT(*) FROM profiles \
                 WHERE persona IS NOT NULL AND persona <> '' GROUP BY persona",
            )
            .await?;
        let college_distribution = self
            .grouped(
                "SELECT college, COUNT(*) FROM profiles \
                 WHERE college IS NOT NULL AND college <> '' GROUP BY college",
            )
            .await?;

        Ok(AdminStats {
            total_users,
            completed_survey,
            total_lessons_completed,
            total_calculations,
            avg_emissions,
            survey_breakdown,
            persona_distribution,
            college_distribution,
        })
    }

    pub async fn users(&self) -> Result<Vec<UserSummary>> {
        let rows = sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT
                p.user_id,
                p.username,
                p.persona,
                p.college,
                p.grade,
                (SELECT COUNT(*) FROM survey_responses s WHERE s.user_id = p.user_id) AS response_count,
                (SELECT COUNT(*) FROM learning_progress l
                  WHERE l.user_id = p.user_id AND l.completed) AS completed_lessons,
                p.created_at
            FROM profiles p
            ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn count(&self, sql: &str) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(sql).fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn grouped(&self, sql: &str) -> Result<BTreeMap<String, i64>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().collect())
    }
}
