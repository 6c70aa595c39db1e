use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::personal_info::College;
use crate::models::survey_response::{NewSurveyResponse, SurveyAnswer, SurveyType};
use crate::services::curriculum_service::{college_keys, AnswerKey, KNOWLEDGE_KEYS, POST_QUIZ_KEYS};

pub const SURVEY_POINTS: i32 = 1;
pub const POST_QUIZ_POINTS: i32 = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradedAnswer {
    pub question_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_text: Option<String>,
    pub answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub points_earned: i32,
    pub max_points: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostQuizScore {
    pub correct: usize,
    pub total: usize,
    pub percentage: f64,
    pub points: i32,
    pub graded: Vec<GradedAnswer>,
}

pub struct GradingService;

impl GradingService {
    /// Knowledge answers q3..q5, one point each.
    pub fn grade_knowledge(answers: &BTreeMap<String, SurveyAnswer>) -> Vec<NewSurveyResponse> {
        Self::grade_survey_section(SurveyType::Knowledge, &KNOWLEDGE_KEYS, answers)
    }

    /// College quiz answers against the key for the college's quiz.
    pub fn grade_college(
        college: College,
        answers: &BTreeMap<String, SurveyAnswer>,
    ) -> Vec<NewSurveyResponse> {
        Self::grade_survey_section(SurveyType::College, college_keys(college), answers)
    }

    fn grade_survey_section(
        survey_type: SurveyType,
        keys: &[AnswerKey],
        answers: &BTreeMap<String, SurveyAnswer>,
    ) -> Vec<NewSurveyResponse> {
        answers
            .iter()
            .map(|(question_id, answer)| {
                let is_correct = keys
                    .iter()
                    .find(|k| k.question_id == question_id)
                    .is_some_and(|k| answer.as_choice() == Some(k.correct));
                NewSurveyResponse {
                    survey_type,
                    question_id: question_id.clone(),
                    question_text: None,
                    answer: answer.to_json(),
                    is_correct: Some(is_correct),
                    score: if is_correct { SURVEY_POINTS } else { 0 },
                }
            })
            .collect()
    }

    /// Number of post-quiz questions without a non-blank answer.
    pub fn unanswered_post_quiz(answers: &BTreeMap<String, String>) -> usize {
        POST_QUIZ_KEYS
            .iter()
            .filter(|k| {
                answers
                    .get(k.question_id)
                    .map_or(true, |a| a.trim().is_empty())
            })
            .count()
    }

    pub fn grade_post_quiz(answers: &BTreeMap<String, String>) -> PostQuizScore {
        let graded: Vec<GradedAnswer> = POST_QUIZ_KEYS
            .iter()
            .map(|k| {
                let given = answers.get(k.question_id).cloned().unwrap_or_default();
                let is_correct = given == k.correct;
                GradedAnswer {
                    question_id: k.question_id.to_string(),
                    question_text: k.prompt.map(str::to_string),
                    answer: given,
                    correct_answer: k.correct.to_string(),
                    is_correct,
                    points_earned: if is_correct { POST_QUIZ_POINTS } else { 0 },
                    max_points: POST_QUIZ_POINTS,
                }
            })
            .collect();

        Self::score(graded)
    }

    /// Rebuild a score from stored rows, for learners who already submitted.
    pub fn score(graded: Vec<GradedAnswer>) -> PostQuizScore {
        let total = graded.len();
        let correct = graded.iter().filter(|g| g.is_correct).count();
        let points = graded.iter().map(|g| g.points_earned).sum();
        let percentage = if total == 0 {
            0.0
        } else {
            correct as f64 / total as f64 * 100.0
        };
        PostQuizScore {
            correct,
            total,
            percentage,
            points,
            graded,
        }
    }

    pub fn post_quiz_rows(score: &PostQuizScore) -> Vec<NewSurveyResponse> {
        score
            .graded
            .iter()
            .map(|g| NewSurveyResponse {
                survey_type: SurveyType::PostQuiz,
                question_id: g.question_id.clone(),
                question_text: g.question_text.clone(),
                answer: serde_json::Value::String(g.answer.clone()),
                is_correct: Some(g.is_correct),
                score: g.points_earned,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choices(pairs: &[(&str, &str)]) -> BTreeMap<String, SurveyAnswer> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), SurveyAnswer::Choice(v.to_string())))
            .collect()
    }

    fn post_answers(values: [&str; 5]) -> BTreeMap<String, String> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("post_q{}", i + 1), v.to_string()))
            .collect()
    }

    #[test]
    fn knowledge_is_graded_against_key() {
        let rows = GradingService::grade_knowledge(&choices(&[("q3", "B"), ("q4", "A"), ("q5", "B")]));
        let scores: Vec<_> = rows.iter().map(|r| (r.question_id.as_str(), r.score)).collect();
        assert_eq!(scores, vec![("q3", 1), ("q4", 0), ("q5", 1)]);
        assert!(rows.iter().all(|r| r.survey_type == SurveyType::Knowledge));
    }

    #[test]
    fn college_answers_use_the_quiz_college_key() {
        let rows = GradingService::grade_college(
            College::Other,
            &choices(&[("q-工程-1", "C"), ("q-工程-2", "A"), ("q-工程-3", "B")]),
        );
        let correct: Vec<_> = rows.iter().map(|r| r.is_correct).collect();
        assert_eq!(correct, vec![Some(true), Some(false), Some(true)]);
    }

    #[test]
    fn unknown_question_ids_score_zero() {
        let rows = GradingService::grade_college(College::Medicine, &choices(&[("q-工程-1", "C")]));
        assert_eq!(rows[0].is_correct, Some(false));
        assert_eq!(rows[0].score, 0);
    }

    #[test]
    fn perfect_post_quiz_scores_one_hundred() {
        let score = GradingService::grade_post_quiz(&post_answers(["A", "B", "B", "B", "B"]));
        assert_eq!(score.correct, 5);
        assert_eq!(score.points, 100);
        assert_eq!(score.percentage, 100.0);
    }

    #[test]
    fn post_quiz_awards_twenty_per_correct_answer() {
        let score = GradingService::grade_post_quiz(&post_answers(["A", "C", "B", "D", "B"]));
        assert_eq!(score.correct, 3);
        assert_eq!(score.points, 60);
        assert_eq!(score.percentage, 60.0);
        assert_eq!(GradingService::post_quiz_rows(&score).len(), 5);
    }

    #[test]
    fn unanswered_counts_missing_and_blank() {
        let mut answers = post_answers(["A", "B", "", "B", "B"]);
        answers.remove("post_q5");
        assert_eq!(GradingService::unanswered_post_quiz(&answers), 2);
    }
}
