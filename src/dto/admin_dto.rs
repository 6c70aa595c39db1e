use serde::Serialize;

use crate::models::survey_response::SurveyResponse;
use crate::services::admin_service::UserSummary;

#[derive(Debug, Clone, Serialize)]
pub struct UserListResponse {
    pub total: usize,
    pub items: Vec<UserSummary>,
}

impl From<Vec<UserSummary>> for UserListResponse {
    fn from(items: Vec<UserSummary>) -> Self {
        Self {
            total: items.len(),
            items,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseListResponse {
    pub total: usize,
    pub items: Vec<SurveyResponse>,
}

impl From<Vec<SurveyResponse>> for ResponseListResponse {
    fn from(items: Vec<SurveyResponse>) -> Self {
        Self {
            total: items.len(),
            items,
        }
    }
}
