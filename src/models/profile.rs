use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::persona::Persona;
use super::personal_info::College;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: Option<String>,
    pub persona: Option<String>,
    pub college: Option<String>,
    pub grade: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Stored persona, if the initial survey has been submitted and the label
    /// is one we know.
    pub fn persona(&self) -> Option<Persona> {
        self.persona.as_deref().and_then(|p| p.parse().ok())
    }

    pub fn college(&self) -> Option<College> {
        self.college.as_deref().and_then(|c| c.parse().ok())
    }

    /// Gated pages open once a persona is on the profile.
    pub fn is_quiz_completed(&self) -> bool {
        self.persona.as_deref().is_some_and(|p| !p.is_empty())
    }
}
