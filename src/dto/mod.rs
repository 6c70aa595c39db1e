pub mod admin_dto;
pub mod calculator_dto;
pub mod learning_dto;
pub mod navigation_dto;
pub mod post_quiz_dto;
pub mod profile_dto;
pub mod survey_dto;
