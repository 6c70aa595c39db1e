//! Access rules for the learner app: the post-quiz lesson gate and the
//! page-level navigation lock. Both are pure; callers supply the counts and
//! flags they read from storage.

use serde::Serialize;

use crate::models::page::Page;

pub const SURVEY_REQUIRED_NOTICE: &str = "請先完成「初始問卷」並提交，才能解鎖後續所有內容。";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateState {
    Locked,
    Unlocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressGate {
    required_lessons: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GateStatus {
    pub state: GateState,
    pub unlocked: bool,
    pub completed_lessons: u32,
    pub required_lessons: u32,
    pub progress_percent: f64,
}

impl ProgressGate {
    pub fn new(required_lessons: u32) -> Self {
        Self { required_lessons }
    }

    pub fn required_lessons(&self) -> u32 {
        self.required_lessons
    }

    pub fn state(&self, completed_lessons: u32) -> GateState {
        if completed_lessons >= self.required_lessons {
            GateState::Unlocked
        } else {
            GateState::Locked
        }
    }

    pub fn is_unlocked(&self, completed_lessons: u32) -> bool {
        self.state(completed_lessons) == GateState::Unlocked
    }

    pub fn status(&self, completed_lessons: u32) -> GateStatus {
        let state = self.state(completed_lessons);
        let progress_percent = if self.required_lessons == 0 {
            100.0
        } else {
            (completed_lessons as f64 / self.required_lessons as f64 * 100.0).min(100.0)
        };
        GateStatus {
            state,
            unlocked: state == GateState::Unlocked,
            completed_lessons,
            required_lessons: self.required_lessons,
            progress_percent,
        }
    }

    pub fn locked_notice(&self) -> String {
        format!(
            "請先完成教學平台的課程學習，完成至少 {} 個課程即可解鎖後測",
            self.required_lessons
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    SurveyRequired,
    LessonsRequired,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationDecision {
    pub page: Page,
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<DenyReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl NavigationDecision {
    fn allow(page: Page) -> Self {
        Self {
            page,
            allowed: true,
            reason: None,
            notice: None,
        }
    }

    fn deny(page: Page, reason: DenyReason, notice: String) -> Self {
        Self {
            page,
            allowed: false,
            reason: Some(reason),
            notice: Some(notice),
        }
    }
}

pub struct NavigationLock;

impl NavigationLock {
    /// Outer gate only: the survey is always reachable, everything else
    /// needs a submitted survey.
    pub fn can_navigate(page: Page, is_quiz_completed: bool) -> bool {
        page == Page::Survey || is_quiz_completed
    }

    /// Full decision including the post-quiz lesson gate, which is only
    /// consulted once the outer gate passes.
    pub fn decide(
        page: Page,
        is_quiz_completed: bool,
        gate: &ProgressGate,
        completed_lessons: u32,
    ) -> NavigationDecision {
        if !Self::can_navigate(page, is_quiz_completed) {
            return NavigationDecision::deny(
                page,
                DenyReason::SurveyRequired,
                SURVEY_REQUIRED_NOTICE.to_string(),
            );
        }
        if page == Page::PostQuiz && !gate.is_unlocked(completed_lessons) {
            return NavigationDecision::deny(page, DenyReason::LessonsRequired, gate.locked_notice());
        }
        NavigationDecision::allow(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_unlocks_exactly_at_threshold() {
        let gate = ProgressGate::new(3);
        for completed in 0..10u32 {
            assert_eq!(gate.is_unlocked(completed), completed >= 3, "count {completed}");
        }
    }

    #[test]
    fn gate_relocks_when_count_drops() {
        let gate = ProgressGate::new(3);
        assert_eq!(gate.state(3), GateState::Unlocked);
        assert_eq!(gate.state(2), GateState::Locked);
    }

    #[test]
    fn gate_status_caps_progress() {
        let gate = ProgressGate::new(3);
        let status = gate.status(6);
        assert!(status.unlocked);
        assert_eq!(status.progress_percent, 100.0);
        let status = gate.status(0);
        assert_eq!(status.state, GateState::Locked);
        assert_eq!(status.progress_percent, 0.0);
    }

    #[test]
    fn zero_threshold_is_always_unlocked() {
        let gate = ProgressGate::new(0);
        assert!(gate.is_unlocked(0));
        assert_eq!(gate.status(0).progress_percent, 100.0);
    }

    #[test]
    fn only_survey_is_open_before_the_survey_is_submitted() {
        for page in Page::ALL {
            assert_eq!(NavigationLock::can_navigate(page, false), page == Page::Survey);
            assert!(NavigationLock::can_navigate(page, true));
        }
    }

    #[test]
    fn locked_pages_carry_a_notice() {
        let gate = ProgressGate::new(3);
        let decision = NavigationLock::decide(Page::Calculator, false, &gate, 10);
        assert!(!decision.allowed);
        assert_eq!(decision.reason, Some(DenyReason::SurveyRequired));
        assert!(decision.notice.is_some());
    }

    #[test]
    fn post_quiz_needs_lessons_after_outer_gate() {
        let gate = ProgressGate::new(3);
        let locked = NavigationLock::decide(Page::PostQuiz, true, &gate, 2);
        assert_eq!(locked.reason, Some(DenyReason::LessonsRequired));

        let open = NavigationLock::decide(Page::PostQuiz, true, &gate, 3);
        assert!(open.allowed);

        // outer gate reported first even when lessons are also missing
        let both = NavigationLock::decide(Page::PostQuiz, false, &gate, 0);
        assert_eq!(both.reason, Some(DenyReason::SurveyRequired));
    }
}
