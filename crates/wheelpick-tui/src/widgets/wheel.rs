use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use wheelpick_core::date::DateField;
use wheelpick_core::wheel::ItemSource;

use crate::app::{band_area, App};

pub struct WheelWidget;

impl WheelWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, field: DateField) {
        let theme = &app.theme;
        let is_focused = app.focus == field;
        let border_style = if is_focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.border)
        };

        let block = Block::default()
            .title(format!(" {} ", field.title()))
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(theme.background));
        frame.render_widget(block, area);

        let band = band_area(area, app.visible_rows());
        if band.height == 0 || band.width == 0 {
            return;
        }

        let lines = Self::rows(app, field, band.height);
        let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(paragraph, band);
    }

    /// Build one line per terminal row of the band from the engine's visible items
    fn rows(app: &App, field: DateField, height: u16) -> Vec<Line<'static>> {
        let theme = &app.theme;
        let engine = app.picker.engine(field);
        let labels = app.picker.labels(field);
        let row_px = app.row_height_px.max(1);
        let center = app.half_visible_count as i64;
        // Bands shorter than the wheel show the rows around the center
        let first = center - (height as i64 - 1) / 2;

        let mut rows: Vec<Option<String>> = vec![None; height as usize];
        for item in engine.visible_items() {
            let row = (item.draw_offset + row_px as i64 / 2).div_euclid(row_px as i64) - first;
            if (0..height as i64).contains(&row) {
                rows[row as usize] = Some(labels.label(item.data_index));
            }
        }

        rows.into_iter()
            .enumerate()
            .map(|(i, label)| {
                let distance = (i as i64 + first - center).abs();
                let style = match distance {
                    0 => Style::default()
                        .fg(theme.accent)
                        .bg(theme.selection)
                        .add_modifier(Modifier::BOLD),
                    1 => Style::default().fg(theme.foreground),
                    _ => Style::default().fg(theme.dimmed),
                };
                let text = label.unwrap_or_default();
                if distance == 0 {
                    // Pad so the selection band spans the full row
                    Line::styled(format!("  {}  ", text), style)
                } else {
                    Line::styled(text, style)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};
    use wheelpick_core::AppConfig;

    fn app() -> App {
        let mut app = App::new(&AppConfig::default()).unwrap();
        app.picker
            .set_date(NaiveDate::from_ymd_opt(2020, 6, 15).unwrap())
            .unwrap();
        app
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect::<String>()
    }

    #[test]
    fn test_rows_center_selected_month() {
        let app = app();
        let rows = WheelWidget::rows(&app, DateField::Month, 5);
        let labels: Vec<String> = rows.iter().map(|l| text(l).trim().to_string()).collect();
        assert_eq!(labels, vec!["04", "05", "06", "07", "08"]);
    }

    #[test]
    fn test_bounded_wheel_leaves_blank_rows() {
        let mut app = app();
        app.picker
            .set_date(NaiveDate::from_ymd_opt(1900, 1, 1).unwrap())
            .unwrap();
        let rows = WheelWidget::rows(&app, DateField::Year, 5);
        let labels: Vec<String> = rows.iter().map(|l| text(l).trim().to_string()).collect();
        assert_eq!(labels, vec!["", "", "1900", "1901", "1902"]);
    }

    #[test]
    fn test_short_band_keeps_center() {
        let app = app();
        let rows = WheelWidget::rows(&app, DateField::Day, 3);
        let labels: Vec<String> = rows.iter().map(|l| text(l).trim().to_string()).collect();
        assert_eq!(labels, vec!["14", "15", "16"]);
    }

    #[test]
    fn test_render_draws_title_and_selection() {
        let app = app();
        let backend = TestBackend::new(12, 9);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| WheelWidget::render(frame, frame.area(), &app, DateField::Month))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row: String = (0..12).map(|x| buffer[(x, 4)].symbol().to_string()).collect();
        assert!(row.contains("06"));
        let title: String = (0..12).map(|x| buffer[(x, 0)].symbol().to_string()).collect();
        assert!(title.contains("Month"));
    }
}
