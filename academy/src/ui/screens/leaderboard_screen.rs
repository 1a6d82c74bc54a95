use ratatui::prelude::*;

use crate::state::LoadingState;
use crate::ui::{
    components::{empty_state, screen_title},
    layouts,
};

// Rankings are served by the web client only.
pub fn render(f: &mut Frame, area: Rect) {
    let (title_area, content_area) = layouts::screen_layout(area);
    screen_title::render_screen_title(f, title_area, "Leaderboard", &LoadingState::NotStarted);

    empty_state::render_empty_state(
        f,
        content_area,
        "Rankings",
        "No rankings to show",
        Some("Complete lessons to earn points"),
    );
}
