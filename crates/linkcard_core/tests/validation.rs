use std::sync::Once;

use linkcard_core::{
    update, AppState, Dialog, Msg, Submission, UiState, REJECT_BAD_SCHEME, REJECT_EMPTY_OUTPUT,
    REJECT_EMPTY_URL,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(card_logging::initialize_for_tests);
}

fn submit(state: AppState, url: &str, output_path: &str) -> (AppState, Vec<linkcard_core::Effect>) {
    update(
        state,
        Msg::SubmitRequested(Submission {
            url: url.to_string(),
            output_path: output_path.to_string(),
            generate_html: true,
        }),
    )
}

fn rejection_message(state: &AppState) -> String {
    match state.view().dialog {
        Some(Dialog::InvalidInput { message }) => message,
        other => panic!("expected InvalidInput dialog, got {other:?}"),
    }
}

#[test]
fn empty_url_is_rejected_without_a_worker() {
    init_logging();
    let state = AppState::new();

    let (next, effects) = submit(state, "", "card.png");

    assert!(effects.is_empty());
    assert_eq!(next.ui(), UiState::Idle);
    assert_eq!(rejection_message(&next), REJECT_EMPTY_URL);
}

#[test]
fn whitespace_only_url_is_rejected() {
    init_logging();
    let state = AppState::new();

    let (next, effects) = submit(state, "   ", "card.png");

    assert!(effects.is_empty());
    assert_eq!(rejection_message(&next), REJECT_EMPTY_URL);
}

#[test]
fn non_http_scheme_is_rejected() {
    init_logging();
    let state = AppState::new();

    let (next, effects) = submit(state, "ftp://x.com", "card.png");

    assert!(effects.is_empty());
    assert_eq!(next.ui(), UiState::Idle);
    assert_eq!(rejection_message(&next), REJECT_BAD_SCHEME);
}

#[test]
fn empty_output_path_is_rejected() {
    init_logging();
    let state = AppState::new();

    let (next, effects) = submit(state, "https://example.com", "  ");

    assert!(effects.is_empty());
    assert_eq!(next.ui(), UiState::Idle);
    assert_eq!(rejection_message(&next), REJECT_EMPTY_OUTPUT);
}

#[test]
fn validation_order_reports_url_before_output_path() {
    init_logging();
    let state = AppState::new();

    // Both fields invalid: the URL check wins.
    let (next, _) = submit(state, "ftp://x.com", "");
    assert_eq!(rejection_message(&next), REJECT_BAD_SCHEME);
}

#[test]
fn rejection_leaves_status_and_preview_untouched() {
    init_logging();
    let state = AppState::new();
    let before = state.view();

    let (next, _) = submit(state, "", "card.png");
    let after = next.view();

    assert_eq!(after.status, before.status);
    assert_eq!(after.preview, before.preview);
    assert!(!after.running);
}
