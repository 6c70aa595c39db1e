use std::collections::BTreeMap;

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::survey_dto::SubmitSurveyPayload;
use crate::error::{Error, Result};
use crate::models::persona::Persona;
use crate::models::personal_info::CompletePersonalInfo;
use crate::models::profile::Profile;
use crate::models::survey_response::{NewSurveyResponse, SurveyAnswer, SurveyResponse, SurveyType};
use crate::services::grading_service::GradingService;
use crate::services::persona_service::PersonaService;
use crate::services::profile_service::ProfileService;

pub const PERSONAL_INFO_NOTICE: &str = "請先完成所有個人資料的選擇！";
pub const KNOWLEDGE_NOTICE: &str = "請完成所有基本知識題 (Q3-Q5)！";
pub const COLLEGE_QUIZ_NOTICE: &str = "請完成您學群的三題進階知識題！";

const KNOWLEDGE_QUESTIONS: [&str; 3] = ["q3", "q4", "q5"];
const COLLEGE_QUIZ_REQUIRED: usize = 3;

const RESPONSE_COLUMNS: &str =
    "id, user_id, survey_type, question_id, question_text, answer, is_correct, score, created_at";

#[derive(Debug, Clone)]
pub struct SurveyOutcome {
    pub persona: Persona,
    pub knowledge_score: i32,
    pub college_score: i32,
    pub profile: Profile,
}

#[derive(Clone)]
pub struct SurveyService {
    pool: PgPool,
}

impl SurveyService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Checks the submission in display order and stops at the first gap.
    pub fn validate(payload: &SubmitSurveyPayload) -> Result<CompletePersonalInfo> {
        let info = payload
            .personal_info
            .complete()
            .ok_or_else(|| Error::BadRequest(PERSONAL_INFO_NOTICE.to_string()))?;

        if !KNOWLEDGE_QUESTIONS
            .iter()
            .all(|q| is_answered(&payload.knowledge_answers, q))
        {
            return Err(Error::BadRequest(KNOWLEDGE_NOTICE.to_string()));
        }

        let prefix = format!("q-{}", info.college.quiz_college().label());
        let answered = payload
            .college_answers
            .iter()
            .filter(|(id, answer)| id.starts_with(&prefix) && !answer.is_blank())
            .count();
        if answered < COLLEGE_QUIZ_REQUIRED {
            return Err(Error::BadRequest(COLLEGE_QUIZ_NOTICE.to_string()));
        }

        Ok(info)
    }

    pub async fn submit(
        &self,
        user_id: Uuid,
        default_username: Option<&str>,
        payload: &SubmitSurveyPayload,
    ) -> Result<SurveyOutcome> {
        let info = Self::validate(payload)?;

        let initial: Vec<NewSurveyResponse> = payload
            .survey_answers
            .iter()
            .map(|(question_id, answer)| NewSurveyResponse {
                survey_type: SurveyType::Initial,
                question_id: question_id.clone(),
                question_text: None,
                answer: answer.to_json(),
                is_correct: None,
                score: 0,
            })
            .collect();
        let knowledge = GradingService::grade_knowledge(&payload.knowledge_answers);
        let college = GradingService::grade_college(info.college, &payload.college_answers);
        let persona = PersonaService::classify_answers(&payload.survey_answers);

        let mut tx = self.pool.begin().await?;
        insert_responses(&mut tx, user_id, &initial).await?;
        insert_responses(&mut tx, user_id, &knowledge).await?;
        insert_responses(&mut tx, user_id, &college).await?;
        let profile = ProfileService::record_survey_outcome(
            &mut tx,
            user_id,
            default_username,
            persona,
            info.college,
            info.grade,
        )
        .await?;
        tx.commit().await?;

        tracing::info!(%user_id, persona = persona.label(), "initial survey submitted");

        Ok(SurveyOutcome {
            persona,
            knowledge_score: knowledge.iter().map(|r| r.score).sum(),
            college_score: college.iter().map(|r| r.score).sum(),
            profile,
        })
    }

    pub async fn list(
        &self,
        user_id: Uuid,
        survey_type: Option<SurveyType>,
    ) -> Result<Vec<SurveyResponse>> {
        let rows = sqlx::query_as::<_, SurveyResponse>(&format!(
            r#"
            SELECT {RESPONSE_COLUMNS}
            FROM survey_responses
            WHERE user_id = $1
              AND ($2::text IS NULL OR survey_type = $2)
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id)
        .bind(survey_type.map(SurveyType::as_str))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Every response across all users, newest first.
    pub async fn list_all(&self, survey_type: Option<SurveyType>) -> Result<Vec<SurveyResponse>> {
        let rows = sqlx::query_as::<_, SurveyResponse>(&format!(
            r#"
            SELECT {RESPONSE_COLUMNS}
            FROM survey_responses
            WHERE ($1::text IS NULL OR survey_type = $1)
            ORDER BY created_at DESC
            "#
        ))
        .bind(survey_type.map(SurveyType::as_str))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Post-quiz rows in question order; empty until the learner submits.
    pub async fn post_quiz_responses(&self, user_id: Uuid) -> Result<Vec<SurveyResponse>> {
        let rows = sqlx::query_as::<_, SurveyResponse>(&format!(
            r#"
            SELECT {RESPONSE_COLUMNS}
            FROM survey_responses
            WHERE user_id = $1 AND survey_type = 'postQuiz'
            ORDER BY question_id ASC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Inserts the graded post-quiz unless one is already on file.
    pub async fn record_post_quiz(&self, user_id: Uuid, rows: &[NewSurveyResponse]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        // serialise concurrent submissions from the same learner
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1::text))")
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await?;

        let existing: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM survey_responses WHERE user_id = $1 AND survey_type = 'postQuiz'",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;
        if existing > 0 {
            return Err(Error::Conflict("後測已完成，無法重複提交".to_string()));
        }

        insert_responses(&mut tx, user_id, rows).await?;
        tx.commit().await?;

        tracing::info!(%user_id, "post-quiz submitted");
        Ok(())
    }
}

fn is_answered(answers: &BTreeMap<String, SurveyAnswer>, question_id: &str) -> bool {
    answers.get(question_id).is_some_and(|a| !a.is_blank())
}

async fn insert_responses(
    conn: &mut PgConnection,
    user_id: Uuid,
    rows: &[NewSurveyResponse],
) -> Result<()> {
    for row in rows {
        sqlx::query(
            r#"
            INSERT INTO survey_responses
                (user_id, survey_type, question_id, question_text, answer, is_correct, score)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user_id)
        .bind(row.survey_type.as_str())
        .bind(&row.question_id)
        .bind(&row.question_text)
        .bind(&row.answer)
        .bind(row.is_correct)
        .bind(row.score)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::personal_info::{College, Grade, HasCourse, PersonalInfo};

    fn choice(v: &str) -> SurveyAnswer {
        SurveyAnswer::Choice(v.to_string())
    }

    fn complete_payload(college: College) -> SubmitSurveyPayload {
        let quiz = college.quiz_college().label();
        SubmitSurveyPayload {
            personal_info: PersonalInfo {
                grade: Some(Grade::Junior),
                college: Some(college),
                has_course: Some(HasCourse::Yes),
            },
            survey_answers: BTreeMap::from([
                ("q7".to_string(), choice("A")),
                ("q9".to_string(), choice("2")),
                ("q10".to_string(), choice("A")),
            ]),
            knowledge_answers: ["q3", "q4", "q5"]
                .into_iter()
                .map(|q| (q.to_string(), choice("B")))
                .collect(),
            college_answers: (1..=3)
                .map(|n| (format!("q-{quiz}-{n}"), choice("A")))
                .collect(),
        }
    }

    fn notice(result: Result<CompletePersonalInfo>) -> String {
        match result {
            Err(Error::BadRequest(msg)) => msg,
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[test]
    fn complete_submission_passes() {
        let info = SurveyService::validate(&complete_payload(College::Science)).unwrap();
        assert_eq!(info.college, College::Science);
    }

    #[test]
    fn missing_personal_info_is_reported_first() {
        let mut payload = complete_payload(College::Science);
        payload.personal_info.has_course = None;
        payload.knowledge_answers.clear();
        assert_eq!(notice(SurveyService::validate(&payload)), PERSONAL_INFO_NOTICE);
    }

    #[test]
    fn blank_knowledge_answer_is_rejected() {
        let mut payload = complete_payload(College::Science);
        payload.knowledge_answers.insert("q4".into(), choice(" "));
        assert_eq!(notice(SurveyService::validate(&payload)), KNOWLEDGE_NOTICE);
    }

    #[test]
    fn college_quiz_counts_only_own_prefix() {
        let mut payload = complete_payload(College::Medicine);
        payload.college_answers.remove("q-醫學-3");
        payload.college_answers.insert("q-工程-1".into(), choice("C"));
        assert_eq!(notice(SurveyService::validate(&payload)), COLLEGE_QUIZ_NOTICE);
    }

    #[test]
    fn other_college_answers_engineering_quiz() {
        let payload = complete_payload(College::Other);
        assert!(payload.college_answers.contains_key("q-工程-1"));
        assert!(SurveyService::validate(&payload).is_ok());
    }
}
