use std::path::Path;

use crate::view_model::AppViewModel;

/// Default status line shown before the first submission.
pub const STATUS_IDLE: &str = "Enter a URL and press Generate.";
/// Status line while a worker is in flight.
pub const STATUS_RUNNING: &str = "Fetching metadata…";
/// Status line after a failed generation.
pub const STATUS_FAILED: &str = "Generation failed.";

/// A validated-on-submit request to generate one link card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub url: String,
    pub output_path: String,
    pub generate_html: bool,
}

/// Terminal result of one worker run, consumed exactly once by the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Success { output_path: String },
    Failure { message: String },
}

/// Lifecycle flag gating resubmission. At most one worker runs while
/// `Running`; `update` rejects further submissions until the outcome lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Running,
}

/// Modal dialog requested by the state machine, dismissed via
/// [`crate::Msg::DialogDismissed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// Inline rejection of an invalid submission. No state change happened.
    InvalidInput { message: String },
    /// Confirmation after a successful generation.
    Completed {
        image_path: String,
        html_path: Option<String>,
    },
    /// The engine reported a failure; `message` is its text verbatim.
    GenerationFailed { message: String },
}

/// What the preview area shows. The app owns the decoded bitmap; the core
/// only tracks which path is on display or why loading it failed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PreviewState {
    #[default]
    Empty,
    Showing { path: String },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    ui: UiState,
    status: String,
    dialog: Option<Dialog>,
    preview: PreviewState,
    active: Option<Submission>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            ui: UiState::Idle,
            status: STATUS_IDLE.to_string(),
            dialog: None,
            preview: PreviewState::Empty,
            active: None,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            running: self.ui == UiState::Running,
            status: self.status.clone(),
            dialog: self.dialog.clone(),
            preview: self.preview.clone(),
        }
    }

    pub fn ui(&self) -> UiState {
        self.ui
    }

    pub(crate) fn begin(&mut self, submission: Submission) {
        self.ui = UiState::Running;
        self.status = STATUS_RUNNING.to_string();
        self.active = Some(submission);
    }

    /// Returns the submission the finished worker belonged to, if any.
    pub(crate) fn settle(&mut self) -> Option<Submission> {
        self.ui = UiState::Idle;
        self.active.take()
    }

    pub(crate) fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub(crate) fn set_dialog(&mut self, dialog: Dialog) {
        self.dialog = Some(dialog);
    }

    pub(crate) fn clear_dialog(&mut self) {
        self.dialog = None;
    }

    pub(crate) fn set_preview(&mut self, preview: PreviewState) {
        self.preview = preview;
    }
}

/// Companion HTML path: the image path with its extension replaced by
/// `.html` (appended when the path has no extension).
pub fn html_companion_path(image_path: &str) -> String {
    Path::new(image_path)
        .with_extension("html")
        .to_string_lossy()
        .into_owned()
}
