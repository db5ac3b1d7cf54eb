use crate::{Dialog, PreviewState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    /// True while a worker is in flight; the submit control is disabled and
    /// an indeterminate progress indicator is shown.
    pub running: bool,
    pub status: String,
    pub dialog: Option<Dialog>,
    pub preview: PreviewState,
}
