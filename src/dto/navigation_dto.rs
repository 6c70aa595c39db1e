use serde::Serialize;

use crate::services::unlock_service::{GateStatus, NavigationDecision};

#[derive(Debug, Clone, Serialize)]
pub struct NavigationResponse {
    pub is_quiz_completed: bool,
    pub gate: GateStatus,
    pub pages: Vec<NavigationDecision>,
}
