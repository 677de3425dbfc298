use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let status_text = Self::status_text(app);

        let help_hint = " q:quit h/l:wheel j/k:scroll t:today Enter:confirm ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.chars().count() + help_hint.len());

        let line = Line::from(vec![
            Span::styled(
                status_text,
                Style::default().fg(theme.foreground).bg(theme.selection),
            ),
            Span::styled(
                " ".repeat(padding_len),
                Style::default().bg(theme.selection),
            ),
            Span::styled(
                help_hint,
                Style::default().fg(theme.dimmed).bg(theme.selection),
            ),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }

    fn status_text(app: &App) -> String {
        if let Some(msg) = &app.status_message {
            return format!(" {}", msg);
        }
        let date = match app.picker.selected_date() {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => "----------".to_string(),
        };
        format!(" {} | {}", date, app.focus.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wheelpick_core::AppConfig;

    use crate::input::Action;

    #[test]
    fn test_status_shows_date_at_rest() {
        let mut app = App::new(&AppConfig::default()).unwrap();
        app.picker
            .set_date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
            .unwrap();
        assert_eq!(StatusBarWidget::status_text(&app), " 2024-02-29 | Year");

        app.apply_action(Action::NextItem);
        assert_eq!(StatusBarWidget::status_text(&app), " ---------- | Year");
    }
}
