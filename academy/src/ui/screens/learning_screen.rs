use ratatui::prelude::*;

use crate::state::AppState;
use crate::ui::{components::screen_title, layouts};

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let (title_area, content_area) = layouts::screen_layout(area);

    let title = match &state.profile.profile {
        Some(profile) => format!("My learning, {}", profile.display_name()),
        None => "My learning".to_string(),
    };
    screen_title::render_screen_title(f, title_area, &title, &state.courses.loading);

    super::render_course_list(f, content_area, "Continue learning", &state.courses);
}
