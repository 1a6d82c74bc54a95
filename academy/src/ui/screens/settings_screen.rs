use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::state::{AppState, LoadingState};
use crate::ui::{
    components::{empty_state, screen_title},
    layouts, theme,
};

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let (title_area, content_area) = layouts::screen_layout(area);
    screen_title::render_screen_title(f, title_area, "Settings", &state.profile.loading);

    let Some(profile) = &state.profile.profile else {
        match &state.profile.loading {
            LoadingState::Error(error) => empty_state::render_empty_state(
                f,
                content_area,
                "Profile",
                "Could not load profile",
                Some(error.as_str()),
            ),
            _ => empty_state::render_loading_state(
                f,
                content_area,
                "Profile",
                "Loading profile...",
            ),
        }
        return;
    };

    let field = |label: &'static str, value: Option<&str>| {
        Line::from(vec![
            Span::styled(format!("{:<10}", label), theme::help_text_style()),
            Span::raw(value.filter(|v| !v.is_empty()).unwrap_or("-").to_string()),
        ])
    };

    let lines = vec![
        field("Username", Some(profile.username.as_str())),
        field("Name", profile.full_name.as_deref()),
        field("Email", profile.email.as_deref()),
        field("College", profile.college.as_deref()),
        field("Bio", profile.bio.as_deref()),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Profile"));
    f.render_widget(paragraph, content_area);
}
