pub mod explore_screen;
pub mod home_screen;
pub mod leaderboard_screen;
pub mod learning_screen;
pub mod settings_screen;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem},
};

use crate::state::{AppState, CoursesState, LoadingState, Route};
use crate::ui::{components::empty_state, theme};

/// Draw the current route's page into `area`.
pub fn render_route(f: &mut Frame, area: Rect, state: &AppState) {
    match state.route() {
        Route::Home => home_screen::render(f, area, state),
        Route::Explore => explore_screen::render(f, area, state),
        Route::Learning => learning_screen::render(f, area, state),
        Route::Leaderboard => leaderboard_screen::render(f, area),
        Route::Settings => settings_screen::render(f, area, state),
    }
}

/// Course catalogue list shared by the course pages.
fn render_course_list(f: &mut Frame, area: Rect, title: &str, courses: &CoursesState) {
    if courses.courses.is_empty() {
        match &courses.loading {
            LoadingState::Loading(_) | LoadingState::NotStarted => {
                empty_state::render_loading_state(f, area, title, "Loading courses...")
            }
            LoadingState::Error(error) => empty_state::render_empty_state(
                f,
                area,
                title,
                "Could not load courses",
                Some(error.as_str()),
            ),
            LoadingState::Loaded => {
                empty_state::render_empty_state(f, area, title, "No courses yet", None)
            }
        }
        return;
    }

    let items: Vec<ListItem> = courses
        .courses
        .iter()
        .enumerate()
        .map(|(i, course)| {
            let mut spans = vec![Span::raw(course.title.clone())];
            if !course.instructor_name.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", course.instructor_name),
                    theme::help_text_style(),
                ));
            }
            if let Some(rating) = &course.rating {
                spans.push(Span::styled(format!("  ★ {}", rating), theme::rating_style()));
            }

            let style = if i == courses.selected {
                theme::selection_style()
            } else {
                Style::default()
            };
            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}
