use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::learning_progress::LearningProgress;
use crate::services::curriculum_service::Catalogue;

const PROGRESS_COLUMNS: &str =
    "id, user_id, module_id, lesson_title, completed, completed_at, created_at";

#[derive(Clone)]
pub struct LearningService {
    pool: PgPool,
}

impl LearningService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<LearningProgress>> {
        let rows = sqlx::query_as::<_, LearningProgress>(&format!(
            "SELECT {PROGRESS_COLUMNS} FROM learning_progress WHERE user_id = $1 ORDER BY created_at ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn completed_count(&self, user_id: Uuid) -> Result<u32> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM learning_progress WHERE user_id = $1 AND completed",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    /// Flips one lesson. The first toggle creates the row as completed.
    pub async fn toggle(
        &self,
        user_id: Uuid,
        catalogue: &Catalogue,
        module_id: &str,
        lesson_title: &str,
    ) -> Result<LearningProgress> {
        if !catalogue.contains(module_id, lesson_title) {
            return Err(Error::BadRequest(format!(
                "unknown lesson: {} / {}",
                module_id, lesson_title
            )));
        }

        let row = sqlx::query_as::<_, LearningProgress>(&format!(
            r#"
            INSERT INTO learning_progress (user_id, module_id, lesson_title, completed, completed_at)
            VALUES ($1, $2, $3, TRUE, NOW())
            ON CONFLICT (user_id, module_id, lesson_title) DO UPDATE
            SET completed = NOT learning_progress.completed,
                completed_at = CASE WHEN learning_progress.completed THEN NULL ELSE NOW() END
            RETURNING {PROGRESS_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(module_id)
        .bind(lesson_title)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(%user_id, module_id, lesson_title, completed = row.completed, "lesson toggled");
        Ok(row)
    }
}
