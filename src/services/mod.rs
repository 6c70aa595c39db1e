pub mod admin_service;
pub mod calculator_service;
pub mod curriculum_service;
pub mod emissions_service;
pub mod export_service;
pub mod grading_service;
pub mod learning_service;
pub mod navigation_service;
pub mod persona_service;
pub mod profile_service;
pub mod survey_service;
pub mod unlock_service;
