//! Linkcard core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    html_companion_path, AppState, Dialog, GenerationOutcome, PreviewState, Submission, UiState,
    STATUS_FAILED, STATUS_IDLE, STATUS_RUNNING,
};
pub use update::{update, REJECT_BAD_SCHEME, REJECT_EMPTY_OUTPUT, REJECT_EMPTY_URL};
pub use view_model::AppViewModel;
