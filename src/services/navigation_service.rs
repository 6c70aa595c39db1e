use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::page::Page;
use crate::models::profile::Profile;
use crate::services::learning_service::LearningService;
use crate::services::profile_service::ProfileService;
use crate::services::unlock_service::{NavigationDecision, NavigationLock, ProgressGate};

/// What the lock needs to know about one learner.
#[derive(Debug, Clone)]
pub struct AccessSnapshot {
    pub profile: Option<Profile>,
    pub completed_lessons: u32,
}

impl AccessSnapshot {
    pub fn is_quiz_completed(&self) -> bool {
        self.profile.as_ref().is_some_and(Profile::is_quiz_completed)
    }
}

#[derive(Clone)]
pub struct NavigationService {
    profiles: ProfileService,
    learning: LearningService,
    gate: ProgressGate,
}

impl NavigationService {
    pub fn new(profiles: ProfileService, learning: LearningService, gate: ProgressGate) -> Self {
        Self {
            profiles,
            learning,
            gate,
        }
    }

    pub fn gate(&self) -> &ProgressGate {
        &self.gate
    }

    pub async fn snapshot(&self, user_id: Uuid) -> Result<AccessSnapshot> {
        let profile = self.profiles.find(user_id).await?;
        let completed_lessons = self.learning.completed_count(user_id).await?;
        Ok(AccessSnapshot {
            profile,
            completed_lessons,
        })
    }

    pub fn decide_for(&self, snapshot: &AccessSnapshot, page: Page) -> NavigationDecision {
        NavigationLock::decide(
            page,
            snapshot.is_quiz_completed(),
            &self.gate,
            snapshot.completed_lessons,
        )
    }

    pub async fn decide(&self, user_id: Uuid, page: Page) -> Result<NavigationDecision> {
        let snapshot = self.snapshot(user_id).await?;
        Ok(self.decide_for(&snapshot, page))
    }

    /// Fails with 403 and the lock notice when `page` is not reachable.
    pub async fn require(&self, user_id: Uuid, page: Page) -> Result<AccessSnapshot> {
        let snapshot = self.snapshot(user_id).await?;
        let decision = self.decide_for(&snapshot, page);
        if !decision.allowed {
            tracing::debug!(%user_id, page = page.as_str(), reason = ?decision.reason, "page locked");
            return Err(Error::Forbidden(decision.notice.unwrap_or_default()));
        }
        Ok(snapshot)
    }
}
