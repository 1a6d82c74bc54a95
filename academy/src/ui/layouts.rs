//! Reusable layout builders for consistent screen structure.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::theme::{HELP_BAR_HEIGHT, SCREEN_MARGIN, TABS_HEIGHT, TITLE_HEIGHT};

/// Application frame with route tabs, the route's area, and the help bar.
///
/// Returns a tuple of (tabs_area, route_area, help_area)
pub fn app_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(SCREEN_MARGIN)
        .constraints([
            Constraint::Length(TABS_HEIGHT),
            Constraint::Min(8),
            Constraint::Length(HELP_BAR_HEIGHT),
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Route area split into title line and content.
///
/// Returns a tuple of (title_area, content_area)
pub fn screen_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(TITLE_HEIGHT), Constraint::Min(5)])
        .split(area);

    (chunks[0], chunks[1])
}

/// Split a title area into title text and loading indicator.
///
/// Returns (title_text_area, loading_indicator_area)
pub fn title_with_loading(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    (chunks[0], chunks[1])
}

/// Create a centered popup rectangle.
///
/// # Arguments
/// * `percent_x` - Width as percentage of parent (0-100)
/// * `percent_y` - Height as percentage of parent (0-100)
/// * `area` - The parent area to center within
pub fn centered_popup(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Box of fixed size anchored to the top-right corner of `area`.
pub fn top_right(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(area.x + area.width - width, area.y, width, height)
}

/// Standard popup sizes
pub mod popup_sizes {
    /// Medium popup (60% x 30%) - for the auth warning
    pub const MEDIUM: (u16, u16) = (60, 30);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_right_is_clamped_to_parent() {
        let area = Rect::new(0, 0, 30, 4);
        assert_eq!(top_right(40, 6, area), Rect::new(0, 0, 30, 4));
        assert_eq!(top_right(10, 3, area), Rect::new(20, 0, 10, 3));
    }
}
