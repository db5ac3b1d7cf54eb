use crate::Submission;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Launch one background worker for this submission.
    StartGeneration(Submission),
    /// Decode the generated image and show it in the preview area.
    LoadPreview { path: String },
}
