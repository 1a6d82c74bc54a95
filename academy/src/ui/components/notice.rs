//! Auto-expiring notice in the top-right corner.

use ratatui::prelude::Rect;
use ratatui::{
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

use super::popup::render_popup_frame;
use crate::notice::Notice;
use crate::ui::{layouts, theme};

const NOTICE_WIDTH: u16 = 48;
const NOTICE_HEIGHT: u16 = 6;

pub fn render_notice(f: &mut Frame, area: Rect, notice: &Notice, now: Instant) {
    let notice_area = layouts::top_right(NOTICE_WIDTH, NOTICE_HEIGHT, area);
    let title = format!(" {} ({}s) ", notice.title, notice.remaining_secs(now));
    let inner = render_popup_frame(f, notice_area, &title, theme::info_border_style());

    let text = vec![
        Line::from(notice.message.as_str()),
        Line::from(Span::styled("x to dismiss", theme::help_text_style())),
    ];

    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), inner);
}
