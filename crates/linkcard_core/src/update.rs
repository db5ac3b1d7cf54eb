use crate::state::STATUS_FAILED;
use crate::{
    html_companion_path, AppState, Dialog, Effect, GenerationOutcome, Msg, PreviewState,
    Submission, UiState,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SubmitRequested(submission) => {
            // Explicit single-concurrency guard; the disabled button in the
            // shell is a convenience, not the enforcement.
            if state.ui() == UiState::Running {
                return (state, Vec::new());
            }
            match validate(&submission) {
                Err(message) => {
                    state.set_dialog(Dialog::InvalidInput {
                        message: message.to_string(),
                    });
                    Vec::new()
                }
                Ok(trimmed) => {
                    state.begin(trimmed.clone());
                    vec![Effect::StartGeneration(trimmed)]
                }
            }
        }
        Msg::GenerationFinished(outcome) => {
            let active = state.settle();
            match outcome {
                GenerationOutcome::Success { output_path } => {
                    state.set_status(format!("Generated {output_path}"));
                    let html_path = active
                        .map(|submission| submission.generate_html)
                        .unwrap_or(false)
                        .then(|| html_companion_path(&output_path));
                    state.set_dialog(Dialog::Completed {
                        image_path: output_path.clone(),
                        html_path,
                    });
                    vec![Effect::LoadPreview { path: output_path }]
                }
                GenerationOutcome::Failure { message } => {
                    state.set_status(STATUS_FAILED);
                    state.set_dialog(Dialog::GenerationFailed { message });
                    Vec::new()
                }
            }
        }
        Msg::PreviewLoaded { path, result } => {
            let preview = match result {
                Ok(()) => PreviewState::Showing { path },
                Err(message) => PreviewState::Failed { message },
            };
            state.set_preview(preview);
            Vec::new()
        }
        Msg::DialogDismissed => {
            state.clear_dialog();
            Vec::new()
        }
    };

    (state, effects)
}

/// Rejection message for an empty URL.
pub const REJECT_EMPTY_URL: &str = "Enter a URL.";
/// Rejection message for a URL without an http(s) scheme.
pub const REJECT_BAD_SCHEME: &str = "Enter a valid URL (http:// or https://).";
/// Rejection message for an empty output filename.
pub const REJECT_EMPTY_OUTPUT: &str = "Enter an output filename.";

fn validate(submission: &Submission) -> Result<Submission, &'static str> {
    let url = submission.url.trim();
    if url.is_empty() {
        return Err(REJECT_EMPTY_URL);
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(REJECT_BAD_SCHEME);
    }
    let output_path = submission.output_path.trim();
    if output_path.is_empty() {
        return Err(REJECT_EMPTY_OUTPUT);
    }
    Ok(Submission {
        url: url.to_string(),
        output_path: output_path.to_string(),
        generate_html: submission.generate_html,
    })
}
