use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::state::AppState;
use crate::ui::{components::screen_title, layouts, theme};

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let (title_area, content_area) = layouts::screen_layout(area);
    screen_title::render_screen_title(f, title_area, "Explore", &state.courses.loading);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(content_area);

    super::render_course_list(f, chunks[0], "Courses", &state.courses);

    let Some(course) = state.courses.courses.get(state.courses.selected) else {
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(course.title.clone(), theme::title_style())),
        Line::from(""),
    ];
    if !course.instructor_name.is_empty() {
        lines.push(Line::from(format!("Instructor: {}", course.instructor_name)));
    }
    if !course.total_duration.is_empty() {
        lines.push(Line::from(format!("Duration: {}", course.total_duration)));
    }
    if let Some(rating) = &course.rating {
        lines.push(Line::from(Span::styled(
            format!("Rating: {}", rating),
            theme::rating_style(),
        )));
    }
    if !course.description.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(course.description.clone()));
    }

    let details = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Details"));
    f.render_widget(details, chunks[1]);
}
