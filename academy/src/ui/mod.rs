pub mod components;
pub mod layouts;
pub mod screens;
pub mod theme;

use academy_auth::GuardView;
use ratatui::Frame;
use std::time::Instant;

use crate::state::AppState;
use components::{auth_modal, empty_state, help_bar, nav_tabs, notice};

/// Pure render dispatcher - draws the current route according to its guard
/// This function is read-only and never mutates state
pub fn render_app(f: &mut Frame, state: &AppState, now: Instant) {
    let (tabs_area, route_area, help_area) = layouts::app_layout(f.area());

    nav_tabs::render_nav_tabs(f, tabs_area, state.route(), state.authenticated);

    match state.guard_view() {
        GuardView::Loading => {
            empty_state::render_loading_state(
                f,
                route_area,
                state.route().title(),
                "Checking your session...",
            );
        }
        // Nothing protected is drawn while waiting out the debounce.
        GuardView::Hidden => {}
        GuardView::Content => screens::render_route(f, route_area, state),
        GuardView::Degraded => {
            screens::render_route(f, route_area, state);
            f.buffer_mut().set_style(route_area, theme::degraded_style());
            auth_modal::render_auth_modal(f, route_area);
        }
    }

    if let Some(active) = &state.notice {
        notice::render_notice(f, route_area, active, now);
    }

    help_bar::render_help_bar(f, help_area, &help_bar::help_text(state));
}
