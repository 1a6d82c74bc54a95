//! Shared help bar component for consistent bottom navigation hints.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::state::AppState;
use crate::ui::theme;

/// Render a standard help bar with the given text.
pub fn render_help_bar(f: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(text)
        .style(theme::help_text_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, area);
}

/// Keys that do something in the current state.
pub fn help_text(state: &AppState) -> String {
    if state.auth_modal_visible() {
        return "Enter sign in | Esc back to home | q quit".to_string();
    }

    let mut hints = vec!["1-5 navigate"];
    if state.content_interactive() {
        hints.push("j/k select");
        hints.push("r reload");
    }
    if state.notice.is_some() {
        hints.push("x dismiss");
    }
    hints.push(if state.authenticated {
        "o log out"
    } else {
        "g sign in with Google"
    });
    hints.push("q quit");
    hints.join(" | ")
}
