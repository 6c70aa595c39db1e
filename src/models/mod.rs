pub mod calculator_result;
pub mod learning_progress;
pub mod page;
pub mod persona;
pub mod personal_info;
pub mod profile;
pub mod survey_response;
pub mod user_role;
