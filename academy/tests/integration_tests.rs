use std::time::Duration;

use academy::events::{DataEvent, Effect};
use academy::input::Key;
use academy::state::Route;
use academy::testing::TestApp;
use academy_auth::{GuardState, GuardView};

const GUARD_DELAY: Duration = Duration::from_millis(100);

fn guard_state(app: &TestApp) -> Option<GuardState> {
    app.state().guard.as_ref().map(|guard| guard.state())
}

#[test]
fn test_quit_flow() {
    let mut app = TestApp::new();
    app.assert_not_quit();

    app.send_key(Key::Char('q'));
    app.assert_should_quit();
}

#[test]
fn test_home_loads_courses_on_start() {
    let app = TestApp::new();
    app.assert_route(Route::Home);
    assert_eq!(app.effects(), &[Effect::LoadCourses]);
    assert!(app.state().courses.loading.is_loading());
}

#[test]
fn test_number_keys_navigate() {
    let mut app = TestApp::signed_in("http://localhost:5173/");
    app.take_effects();

    app.send_key(Key::Char('2'));
    app.assert_route(Route::Explore);
    assert_eq!(app.take_effects(), vec![Effect::LoadCourses]);

    app.send_key(Key::Char('5'));
    app.assert_route(Route::Settings);
    assert_eq!(app.take_effects(), vec![Effect::LoadProfile]);
    assert_eq!(guard_state(&app), Some(GuardState::Authenticated));

    app.send_key(Key::Char('1'));
    app.assert_route(Route::Home);
    assert!(app.state().guard.is_none());
}

#[test]
fn test_anonymous_protected_route_shows_modal_after_delay() {
    let mut app = TestApp::with_url("http://localhost:5173/learning");
    app.assert_route(Route::Learning);
    assert!(matches!(
        guard_state(&app),
        Some(GuardState::PendingUnauthenticated { .. })
    ));
    assert_eq!(app.state().guard_view(), GuardView::Hidden);

    app.advance(GUARD_DELAY / 2);
    assert!(!app.state().auth_modal_visible());

    app.advance(GUARD_DELAY / 2);
    assert_eq!(guard_state(&app), Some(GuardState::ModalShown));
    assert_eq!(app.state().guard_view(), GuardView::Degraded);

    // Content keys are ignored behind the modal.
    app.send_key(Key::Char('2'));
    app.assert_route(Route::Learning);

    app.send_key(Key::Esc);
    app.assert_route(Route::Home);
    assert!(app.state().guard.is_none());
    assert!(!app.effects().contains(&Effect::OpenLogin));
}

#[test]
fn test_modal_confirm_opens_login() {
    let mut app = TestApp::with_url("http://localhost:5173/settings");
    app.advance(GUARD_DELAY);
    assert!(app.state().auth_modal_visible());

    app.send_key(Key::Enter);
    app.assert_route(Route::Home);
    assert!(app.effects().contains(&Effect::OpenLogin));
}

#[test]
fn test_oauth_callback_signs_in() {
    let mut app = TestApp::with_url("http://localhost:5173/?access=AAA&refresh=BBB");

    let session = app.session().get();
    assert_eq!(session.access_token(), Some("AAA"));
    assert_eq!(session.refresh_token(), Some("BBB"));

    app.assert_route(Route::Learning);
    assert!(app.state().location.url().query().is_none());
    assert_eq!(guard_state(&app), Some(GuardState::Authenticated));
    assert!(app.state().authenticated);
    assert!(app.effects().contains(&Effect::LoadProfile));

    // Even long after the delay no modal appears.
    app.advance(GUARD_DELAY * 5);
    assert!(!app.state().auth_modal_visible());
}

#[test]
fn test_oauth_fragment_callback_signs_in() {
    let mut app = TestApp::with_url("http://localhost:5173/#access=AAA&refresh=BBB");
    app.assert_route(Route::Learning);
    assert!(app.state().location.url().fragment().is_none());
    assert!(app.session().is_authenticated());

    app.advance(GUARD_DELAY);
    assert_eq!(guard_state(&app), Some(GuardState::Authenticated));
}

#[test]
fn test_oauth_error_raises_notice_once() {
    let mut app = TestApp::with_url("http://localhost:5173/?error=signup_closed");

    let notice = app.state().notice.clone().expect("notice raised");
    assert_eq!(notice.title, "Sign-in failed");
    assert_eq!(notice.message, "Sign-ups are currently closed.");
    assert!(app.state().location.url().query().is_none());
    assert!(!app.session().is_authenticated());

    // Re-processing the cleaned URL does not raise it again.
    app.send_key(Key::Char('x'));
    assert!(app.state().notice.is_none());
    app.send_key(Key::Char('r'));
    assert!(app.state().notice.is_none());
}

#[test]
fn test_notice_expires() {
    let mut app = TestApp::with_url("http://localhost:5173/?error=auth_failed");
    assert!(app.state().notice.is_some());

    app.advance(Duration::from_secs(4));
    assert!(app.state().notice.is_some());

    app.advance(Duration::from_secs(1));
    assert!(app.state().notice.is_none());
}

#[test]
fn test_logout_on_protected_route_shows_modal() {
    let mut app = TestApp::signed_in("http://localhost:5173/leaderboard");
    assert_eq!(guard_state(&app), Some(GuardState::Authenticated));

    app.send_key(Key::Char('o'));
    assert!(!app.session().is_authenticated());
    assert!(!app.state().authenticated);
    assert!(matches!(
        guard_state(&app),
        Some(GuardState::PendingUnauthenticated { .. })
    ));

    app.advance(GUARD_DELAY);
    assert!(app.state().auth_modal_visible());
}

#[test]
fn test_login_while_modal_pending_shows_content() {
    let mut app = TestApp::with_url("http://localhost:5173/learning");
    app.advance(GUARD_DELAY / 2);

    app.session().set("late-access", "late-refresh").unwrap();
    app.advance(Duration::ZERO);
    assert_eq!(guard_state(&app), Some(GuardState::Authenticated));

    app.advance(GUARD_DELAY);
    assert_eq!(app.state().guard_view(), GuardView::Content);
}

#[test]
fn test_session_expiry_surfaces_notice() {
    let mut app = TestApp::signed_in("http://localhost:5173/settings");

    // The client clears the session before reporting the failure.
    app.clear_session();
    app.send_data_event(DataEvent::ProfileLoadFailed {
        error: "(401 Unauthorized) Token is invalid or expired".to_string(),
        session_expired: true,
    });

    let notice = app.state().notice.clone().expect("notice raised");
    assert_eq!(notice.title, "Session expired");
    assert!(app.state().profile.profile.is_none());

    app.advance(GUARD_DELAY);
    assert!(app.state().auth_modal_visible());
}

#[test]
fn test_course_selection() {
    let mut app = TestApp::new();
    let courses = serde_json::from_value(serde_json::json!([
        {"id": 1, "title": "Rust basics"},
        {"id": 2, "title": "Async Rust"},
        {"id": 3, "title": "Macros"}
    ]))
    .unwrap();
    app.send_data_event(DataEvent::CoursesLoaded { courses });
    assert_eq!(app.state().courses.courses.len(), 3);

    app.send_keys(&[Key::Char('j'), Key::Down]);
    assert_eq!(app.state().courses.selected, 2);

    app.send_key(Key::Char('j'));
    assert_eq!(app.state().courses.selected, 0);

    app.send_key(Key::Up);
    assert_eq!(app.state().courses.selected, 2);
}

#[test]
fn test_google_login_key() {
    let mut app = TestApp::new();
    app.send_key(Key::Char('g'));
    assert!(app.effects().contains(&Effect::OpenLogin));

    let mut signed_in = TestApp::signed_in("http://localhost:5173/");
    signed_in.send_key(Key::Char('g'));
    assert!(!signed_in.effects().contains(&Effect::OpenLogin));
}
