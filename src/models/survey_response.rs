use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SurveyResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub survey_type: String,
    pub question_id: String,
    pub question_text: Option<String>,
    pub answer: JsonValue,
    pub is_correct: Option<bool>,
    pub score: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurveyType {
    #[serde(rename = "initial")]
    Initial,
    #[serde(rename = "knowledge")]
    Knowledge,
    #[serde(rename = "college")]
    College,
    #[serde(rename = "postQuiz")]
    PostQuiz,
}

impl SurveyType {
    pub const ALL: [SurveyType; 4] = [
        SurveyType::Initial,
        SurveyType::Knowledge,
        SurveyType::College,
        SurveyType::PostQuiz,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SurveyType::Initial => "initial",
            SurveyType::Knowledge => "knowledge",
            SurveyType::College => "college",
            SurveyType::PostQuiz => "postQuiz",
        }
    }
}

impl FromStr for SurveyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SurveyType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown survey type: {}", s))
    }
}

/// A single answer as submitted by the client.
///
/// Scale questions travel as strings (`"4"`); a bare JSON number is accepted
/// and kept in its string form so stored answers look the same either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, from = "RawAnswer")]
pub enum SurveyAnswer {
    Choice(String),
    Multi(Vec<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAnswer {
    Text(String),
    Number(serde_json::Number),
    List(Vec<String>),
}

impl From<RawAnswer> for SurveyAnswer {
    fn from(raw: RawAnswer) -> Self {
        match raw {
            RawAnswer::Text(s) => SurveyAnswer::Choice(s),
            RawAnswer::Number(n) => SurveyAnswer::Choice(n.to_string()),
            RawAnswer::List(values) => SurveyAnswer::Multi(values),
        }
    }
}

impl SurveyAnswer {
    /// The single-choice value, if this answer is one.
    pub fn as_choice(&self) -> Option<&str> {
        match self {
            SurveyAnswer::Choice(value) => Some(value.as_str()),
            SurveyAnswer::Multi(_) => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            SurveyAnswer::Choice(value) => value.trim().is_empty(),
            SurveyAnswer::Multi(values) => values.is_empty(),
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            SurveyAnswer::Choice(value) => JsonValue::String(value.clone()),
            SurveyAnswer::Multi(values) => {
                JsonValue::Array(values.iter().cloned().map(JsonValue::String).collect())
            }
        }
    }
}

/// A response row waiting to be inserted.
#[derive(Debug, Clone)]
pub struct NewSurveyResponse {
    pub survey_type: SurveyType,
    pub question_id: String,
    pub question_text: Option<String>,
    pub answer: JsonValue,
    pub is_correct: Option<bool>,
    pub score: i32,
}
