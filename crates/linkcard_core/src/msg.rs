use crate::{GenerationOutcome, Submission};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User pressed Generate with the form's current values.
    SubmitRequested(Submission),
    /// The worker for the in-flight submission finished.
    GenerationFinished(GenerationOutcome),
    /// The app tried to load the generated image for inline display.
    PreviewLoaded {
        path: String,
        result: Result<(), String>,
    },
    /// User acknowledged the active modal dialog.
    DialogDismissed,
}
