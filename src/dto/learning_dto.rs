use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::learning_progress::LearningProgress;
use crate::models::persona::Persona;
use crate::services::curriculum_service::{Catalogue, LearningPath, Module};
use crate::services::unlock_service::GateStatus;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ToggleLessonPayload {
    #[validate(length(min = 1))]
    pub module_id: String,
    #[validate(length(min = 1))]
    pub lesson_title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LessonView {
    pub title: &'static str,
    pub minutes: u32,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModuleView {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub lessons: Vec<LessonView>,
    pub completed_lessons: usize,
    pub total_lessons: usize,
    pub progress_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PathView {
    pub title: &'static str,
    pub description: &'static str,
    pub modules: Vec<ModuleView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LearningModulesResponse {
    pub persona: Persona,
    pub common: Vec<ModuleView>,
    pub persona_path: PathView,
    pub college_material: PathView,
    pub gate: GateStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct LearningProgressResponse {
    pub items: Vec<LearningProgress>,
    pub completed_lessons: u32,
    pub gate: GateStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToggleLessonResponse {
    pub progress: LearningProgress,
    pub gate: GateStatus,
}

/// Completed `(module_id, lesson_title)` pairs.
pub struct CompletedLessons(HashSet<(String, String)>);

impl CompletedLessons {
    pub fn from_rows(rows: &[LearningProgress]) -> Self {
        Self(
            rows.iter()
                .filter(|r| r.completed)
                .map(|r| (r.module_id.clone(), r.lesson_title.clone()))
                .collect(),
        )
    }

    pub fn contains(&self, module_id: &str, lesson_title: &str) -> bool {
        self.0
            .contains(&(module_id.to_string(), lesson_title.to_string()))
    }
}

impl ModuleView {
    pub fn build(module: &Module, done: &CompletedLessons) -> Self {
        let lessons: Vec<LessonView> = module
            .lessons
            .iter()
            .map(|l| LessonView {
                title: l.title,
                minutes: l.minutes,
                completed: done.contains(module.id, l.title),
            })
            .collect();
        let completed_lessons = lessons.iter().filter(|l| l.completed).count();
        let total_lessons = lessons.len();
        let progress_percent = if total_lessons == 0 {
            0.0
        } else {
            completed_lessons as f64 / total_lessons as f64 * 100.0
        };
        Self {
            id: module.id,
            title: module.title,
            description: module.description,
            lessons,
            completed_lessons,
            total_lessons,
            progress_percent,
        }
    }
}

impl PathView {
    pub fn build(path: &LearningPath, done: &CompletedLessons) -> Self {
        Self {
            title: path.title,
            description: path.description,
            modules: path.modules.iter().map(|m| ModuleView::build(m, done)).collect(),
        }
    }
}

impl LearningModulesResponse {
    pub fn build(
        persona: Persona,
        catalogue: &Catalogue,
        rows: &[LearningProgress],
        gate: GateStatus,
    ) -> Self {
        let done = CompletedLessons::from_rows(rows);
        Self {
            persona,
            common: catalogue
                .common
                .iter()
                .map(|m| ModuleView::build(m, &done))
                .collect(),
            persona_path: PathView::build(catalogue.persona, &done),
            college_material: PathView::build(catalogue.college, &done),
            gate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::curriculum_service::COMMON_MODULES;
    use chrono::Utc;
    use uuid::Uuid;

    fn row(module_id: &str, lesson_title: &str, completed: bool) -> LearningProgress {
        LearningProgress {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            module_id: module_id.to_string(),
            lesson_title: lesson_title.to_string(),
            completed,
            completed_at: completed.then(Utc::now),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn module_progress_counts_only_completed_rows() {
        let rows = vec![
            row("carbon-basics", "什麼是碳排放？", true),
            row("carbon-basics", "溫室效應原理", false),
            row("climate-change", "碳足跡計算方式", true),
        ];
        let view = ModuleView::build(&COMMON_MODULES[0], &CompletedLessons::from_rows(&rows));
        assert_eq!(view.completed_lessons, 1);
        assert_eq!(view.total_lessons, 3);
        assert!(view.lessons[0].completed);
        assert!(!view.lessons[2].completed);
    }
}
