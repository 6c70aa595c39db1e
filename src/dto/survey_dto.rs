use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::persona::Persona;
use crate::models::personal_info::PersonalInfo;
use crate::models::profile::Profile;
use crate::models::survey_response::{SurveyAnswer, SurveyResponse};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitSurveyPayload {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    /// Initial survey answers (q1..q10), stored verbatim.
    #[serde(default)]
    pub survey_answers: BTreeMap<String, SurveyAnswer>,
    #[serde(default)]
    pub knowledge_answers: BTreeMap<String, SurveyAnswer>,
    #[serde(default)]
    pub college_answers: BTreeMap<String, SurveyAnswer>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SurveyOutcomeResponse {
    pub persona: Persona,
    pub persona_en: &'static str,
    pub knowledge_score: i32,
    pub college_score: i32,
    pub profile: Profile,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SurveyResponsesQuery {
    pub survey_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SurveyResponsesResponse {
    pub items: Vec<SurveyResponse>,
    /// Summed score per survey type present in `items`.
    pub totals: BTreeMap<String, i64>,
}

impl From<Vec<SurveyResponse>> for SurveyResponsesResponse {
    fn from(items: Vec<SurveyResponse>) -> Self {
        let mut totals = BTreeMap::new();
        for item in &items {
            *totals.entry(item.survey_type.clone()).or_insert(0) +=
                i64::from(item.score.unwrap_or(0));
        }
        Self { items, totals }
    }
}
