use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::error::Result;
use crate::models::persona::Persona;
use crate::models::personal_info::{College, Grade};
use crate::models::profile::Profile;

const PROFILE_COLUMNS: &str = "id, user_id, username, persona, college, grade, created_at, updated_at";

#[derive(Clone)]
pub struct ProfileService {
    pool: PgPool,
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, user_id: Uuid) -> Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    /// Creates the profile on first call; afterwards only the username moves.
    pub async fn upsert_username(&self, user_id: Uuid, username: &str) -> Result<Profile> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            r#"
            INSERT INTO profiles (user_id, username)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE
            SET username = EXCLUDED.username,
                updated_at = NOW()
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(%user_id, "profile username updated");
        Ok(profile)
    }

    /// Writes the survey outcome. An existing username is never replaced by
    /// the email-derived default.
    pub async fn record_survey_outcome(
        conn: &mut PgConnection,
        user_id: Uuid,
        default_username: Option<&str>,
        persona: Persona,
        college: College,
        grade: Grade,
    ) -> Result<Profile> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            r#"
            INSERT INTO profiles (user_id, username, persona, college, grade)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE
            SET username = COALESCE(profiles.username, EXCLUDED.username),
                persona = EXCLUDED.persona,
                college = EXCLUDED.college,
                grade = EXCLUDED.grade,
                updated_at = NOW()
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(default_username)
        .bind(persona.label())
        .bind(college.label())
        .bind(grade.label())
        .fetch_one(conn)
        .await?;
        Ok(profile)
    }
}

/// Local part of an email address, used as the default username.
pub fn username_from_email(email: &str) -> Option<&str> {
    email
        .split_once('@')
        .map(|(local, _)| local)
        .filter(|local| !local.is_empty())
}
