//! Shared popup/modal base component.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    style::Style,
    widgets::{Block, Borders, Clear},
    Frame,
};

/// Render a popup frame at `area` and return the inner area for content.
///
/// Clears whatever was drawn underneath and draws the border with a
/// centered title.
pub fn render_popup_frame(f: &mut Frame, area: Rect, title: &str, border_style: Style) -> Rect {
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    f.render_widget(block, area);

    inner
}
