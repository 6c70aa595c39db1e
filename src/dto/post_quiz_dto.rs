use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::survey_response::SurveyResponse;
use crate::services::curriculum_service::AnswerKey;
use crate::services::grading_service::{GradedAnswer, PostQuizScore, POST_QUIZ_POINTS};
use crate::services::unlock_service::GateStatus;

const OPTION_VALUES: [&str; 4] = ["A", "B", "C", "D"];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitPostQuizPayload {
    #[serde(default)]
    pub answers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionOption {
    pub value: &'static str,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostQuizQuestion {
    pub id: &'static str,
    pub question: &'static str,
    pub options: Vec<QuestionOption>,
}

impl From<&AnswerKey> for PostQuizQuestion {
    fn from(key: &AnswerKey) -> Self {
        Self {
            id: key.question_id,
            question: key.prompt.unwrap_or_default(),
            options: OPTION_VALUES
                .iter()
                .zip(key.options)
                .map(|(&value, text)| QuestionOption {
                    value,
                    label: format!("({}) {}", value, text),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PostQuizView {
    Locked { gate: GateStatus, notice: String },
    Open { gate: GateStatus, questions: Vec<PostQuizQuestion> },
    Completed { score: PostQuizScore },
}

/// Rebuilds the graded answers from stored post-quiz rows.
pub fn graded_from_rows(rows: &[SurveyResponse], keys: &[AnswerKey]) -> Vec<GradedAnswer> {
    rows.iter()
        .map(|r| {
            let correct_answer = keys
                .iter()
                .find(|k| k.question_id == r.question_id)
                .map(|k| k.correct.to_string())
                .unwrap_or_default();
            GradedAnswer {
                question_id: r.question_id.clone(),
                question_text: r.question_text.clone(),
                answer: r.answer.as_str().unwrap_or_default().to_string(),
                correct_answer,
                is_correct: r.is_correct.unwrap_or(false),
                points_earned: r.score.unwrap_or(0),
                max_points: POST_QUIZ_POINTS,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::curriculum_service::POST_QUIZ_KEYS;

    #[test]
    fn options_are_lettered_in_order() {
        let question = PostQuizQuestion::from(&POST_QUIZ_KEYS[3]);
        assert_eq!(question.id, "post_q4");
        assert_eq!(question.options.len(), 4);
        assert_eq!(question.options[1].value, "B");
        assert_eq!(question.options[1].label, "(B) Environmental (環境)");
    }
}
