use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::persona::Persona;
use crate::models::profile::Profile;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfilePayload {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub profile: Option<Profile>,
    pub persona: Option<Persona>,
    pub is_quiz_completed: bool,
}

impl From<Option<Profile>> for ProfileResponse {
    fn from(profile: Option<Profile>) -> Self {
        let persona = profile.as_ref().and_then(Profile::persona);
        let is_quiz_completed = profile.as_ref().is_some_and(Profile::is_quiz_completed);
        Self {
            profile,
            persona,
            is_quiz_completed,
        }
    }
}
