use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};

use crate::services::export_service::{ExportService, XLSX_CONTENT_TYPE};
use crate::{error::Result, AppState};

/// Admin user report as XLSX
pub async fn export_users(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users = state.admin_service.users().await?;
    let buffer = ExportService::generate_users_xlsx(&users, state.config.required_lessons)?;

    let filename = format!("users_{}.xlsx", chrono::Utc::now().format("%Y%m%d"));
    let disposition = format!("attachment; filename=\"{}\"", filename);
    tracing::info!(rows = users.len(), "users report exported");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}
