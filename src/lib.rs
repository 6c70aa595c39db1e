pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::services::{
    admin_service::AdminService, calculator_service::CalculatorService,
    learning_service::LearningService, navigation_service::NavigationService,
    profile_service::ProfileService, survey_service::SurveyService, unlock_service::ProgressGate,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub profile_service: ProfileService,
    pub survey_service: SurveyService,
    pub learning_service: LearningService,
    pub calculator_service: CalculatorService,
    pub admin_service: AdminService,
    pub navigation_service: NavigationService,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config) -> Self {
        let profile_service = ProfileService::new(pool.clone());
        let survey_service = SurveyService::new(pool.clone());
        let learning_service = LearningService::new(pool.clone());
        let calculator_service = CalculatorService::new(pool.clone());
        let admin_service = AdminService::new(pool.clone());
        let navigation_service = NavigationService::new(
            profile_service.clone(),
            learning_service.clone(),
            ProgressGate::new(config.required_lessons),
        );

        Self {
            pool,
            config: Arc::new(config),
            profile_service,
            survey_service,
            learning_service,
            calculator_service,
            admin_service,
            navigation_service,
        }
    }
}
