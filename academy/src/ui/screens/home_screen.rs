use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::state::AppState;
use crate::ui::{components::screen_title, layouts, theme};

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let (title_area, content_area) = layouts::screen_layout(area);
    screen_title::render_screen_title(f, title_area, "Welcome to Academy", &state.courses.loading);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(content_area);

    let pitch = if state.authenticated {
        "Pick up where you left off in Learning (3)."
    } else {
        "Browse courses for free. Sign in with Google (g) to track your learning."
    };
    f.render_widget(
        Paragraph::new(Span::styled(pitch, theme::help_text_style())).wrap(Wrap { trim: true }),
        chunks[0],
    );

    super::render_course_list(f, chunks[1], "Popular courses", &state.courses);
}
