use ratatui::prelude::Rect;
use ratatui::{
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

use crate::state::Route;
use crate::ui::theme;

/// One tab per route, with its hotkey. Protected routes are marked while signed out.
pub fn render_nav_tabs(f: &mut Frame, area: Rect, current: Route, authenticated: bool) {
    let titles: Vec<Line> = Route::ALL
        .iter()
        .map(|route| {
            let lock = if route.is_protected() && !authenticated {
                " *"
            } else {
                ""
            };
            Line::from(format!("{} {}{}", route.hotkey(), route.title(), lock))
        })
        .collect();

    let selected = Route::ALL
        .iter()
        .position(|route| *route == current)
        .unwrap_or(0);
    let account = if authenticated { "signed in" } else { "guest" };

    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(theme::title_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Academy ({}) ", account)),
        );

    f.render_widget(tabs, area);
}
