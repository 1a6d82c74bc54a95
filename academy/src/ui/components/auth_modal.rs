//! Warning shown when an anonymous user opens a protected route.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::popup::render_popup_frame;
use crate::ui::{layouts, theme};

pub fn render_auth_modal(f: &mut Frame, area: Rect) {
    let (width, height) = layouts::popup_sizes::MEDIUM;
    let popup_area = layouts::centered_popup(width, height, area);
    let inner = render_popup_frame(
        f,
        popup_area,
        " Sign in required ",
        theme::danger_border_style(),
    );

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "You need to be signed in to view this page.",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", theme::title_style()),
            Span::raw(" Sign in with Google   "),
            Span::styled("Esc", theme::title_style()),
            Span::raw(" Back to home"),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, inner);
}
