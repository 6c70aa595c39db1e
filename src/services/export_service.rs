use crate::error::Result;
use crate::services::admin_service::UserSummary;
use rust_xlsxwriter::*;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub struct ExportService;

impl ExportService {
    /// Styled XLSX of the admin user table. Learners at or past the
    /// post-quiz threshold get their lesson count highlighted.
    pub fn generate_users_xlsx(users: &[UserSummary], required_lessons: u32) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Users")?;

        // ── Color palette ──
        let primary_color = Color::RGB(0x14532D); // Green 900
        let header_bg = Color::RGB(0x166534); // Green 800
        let header_text = Color::White;
        let alt_row_1 = Color::RGB(0xF0FDF4); // Green 50
        let alt_row_2 = Color::White;
        let border_color = Color::RGB(0xD1D5DB); // Gray 300
        let unlocked_color = Color::RGB(0x10B981); // Emerald
        let pending_color = Color::RGB(0x94A3B8); // Slate 400

        // ── Column definitions ──
        let columns = [
            ("№", 8.0),
            ("使用者名稱", 24.0),
            ("學習身份", 20.0),
            ("學群", 12.0),
            ("年級", 12.0),
            ("問卷回答數", 14.0),
            ("完成課程數", 14.0),
            ("註冊時間", 20.0),
        ];
        let last_col = (columns.len() - 1) as u16;

        for (i, (_, width)) in columns.iter().enumerate() {
            worksheet.set_column_width(i as u16, *width)?;
        }

        // ── Title row ──
        let title_format = Format::new()
            .set_font_size(16)
            .set_bold()
            .set_font_color(header_text)
            .set_background_color(primary_color)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);

        worksheet.set_row_height(0, 40)?;
        worksheet.merge_range(0, 0, 0, last_col, "碳管理課程使用者報表", &title_format)?;

        // ── Subtitle row ──
        let subtitle_format = Format::new()
            .set_font_size(10)
            .set_italic()
            .set_font_color(Color::RGB(0xBBF7D0))
            .set_background_color(primary_color)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);

        worksheet.set_row_height(1, 22)?;
        let now = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();
        let subtitle_text = format!("匯出時間：{}  •  使用者總數：{}", now, users.len());
        worksheet.merge_range(1, 0, 1, last_col, &subtitle_text, &subtitle_format)?;

        // ── Header row ──
        let header_format = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(header_text)
            .set_background_color(header_bg)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap()
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);

        let header_row = 2;
        worksheet.set_row_height(header_row, 30)?;
        for (i, (name, _)) in columns.iter().enumerate() {
            worksheet.write_string_with_format(header_row, i as u16, *name, &header_format)?;
        }

        // ── Data rows ──
        let data_start_row = 3;
        for (idx, user) in users.iter().enumerate() {
            let row = data_start_row + idx as u32;
            let bg = if idx % 2 == 0 { alt_row_1 } else { alt_row_2 };

            let base_fmt = Format::new()
                .set_font_size(10)
                .set_background_color(bg)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(border_color);
            let center_fmt = base_fmt.clone().set_align(FormatAlign::Center);

            worksheet.set_row_height(row, 22)?;
            worksheet.write_number_with_format(row, 0, (idx + 1) as f64, &center_fmt)?;
            worksheet.write_string_with_format(
                row,
                1,
                user.username.as_deref().unwrap_or("—"),
                &base_fmt.clone().set_bold(),
            )?;
            worksheet.write_string_with_format(row, 2, dash(&user.persona), &base_fmt)?;
            worksheet.write_string_with_format(row, 3, dash(&user.college), &center_fmt)?;
            worksheet.write_string_with_format(row, 4, dash(&user.grade), &center_fmt)?;
            worksheet.write_number_with_format(row, 5, user.response_count as f64, &center_fmt)?;

            let lesson_color = if user.completed_lessons >= i64::from(required_lessons) {
                unlocked_color
            } else {
                pending_color
            };
            let lesson_fmt = Format::new()
                .set_font_size(10)
                .set_bold()
                .set_font_color(Color::White)
                .set_background_color(lesson_color)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(border_color);
            worksheet.write_number_with_format(row, 6, user.completed_lessons as f64, &lesson_fmt)?;

            let created = user.created_at.format("%Y-%m-%d %H:%M").to_string();
            worksheet.write_string_with_format(row, 7, &created, &center_fmt)?;
        }

        // ── Summary row ──
        let total_row = data_start_row + users.len() as u32 + 1;
        let summary_fmt = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(primary_color)
            .set_background_color(Color::RGB(0xDCFCE7)) // Green 100
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);

        let surveyed = users.iter().filter(|u| u.persona.is_some()).count();
        let unlocked = users
            .iter()
            .filter(|u| u.completed_lessons >= i64::from(required_lessons))
            .count();

        worksheet.set_row_height(total_row, 26)?;
        worksheet.merge_range(
            total_row,
            0,
            total_row,
            2,
            &format!("合計：{} 位使用者", users.len()),
            &summary_fmt,
        )?;
        worksheet.merge_range(
            total_row,
            3,
            total_row,
            last_col,
            &format!("已完成問卷：{}  |  已解鎖後測：{}", surveyed, unlocked),
            &summary_fmt,
        )?;

        worksheet.set_freeze_panes(3, 0)?;
        worksheet.autofilter(
            2,
            0,
            (data_start_row + users.len() as u32).saturating_sub(1).max(2),
            last_col,
        )?;

        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }
}

fn dash(value: &Option<String>) -> &str {
    value.as_deref().filter(|v| !v.is_empty()).unwrap_or("—")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn user(name: &str, lessons: i64) -> UserSummary {
        UserSummary {
            user_id: Uuid::new_v4(),
            username: Some(name.to_string()),
            persona: Some("研究者".to_string()),
            college: Some("工程".to_string()),
            grade: None,
            response_count: 12,
            completed_lessons: lessons,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn workbook_is_a_zip_container() {
        let buffer =
            ExportService::generate_users_xlsx(&[user("mei", 3), user("kai", 1)], 3).unwrap();
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn empty_report_still_renders() {
        let buffer = ExportService::generate_users_xlsx(&[], 3).unwrap();
        assert!(!buffer.is_empty());
    }
}
