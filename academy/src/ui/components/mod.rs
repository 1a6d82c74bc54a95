pub mod auth_modal;
pub mod empty_state;
pub mod help_bar;
pub mod loading_indicator;
pub mod nav_tabs;
pub mod notice;
pub mod popup;
pub mod screen_title;
