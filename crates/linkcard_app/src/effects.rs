use std::path::PathBuf;
use std::sync::Arc;

use card_logging::card_info;
use linkcard_core::{GenerationOutcome, Submission};
use linkcard_engine::{
    CardStyle, EngineEvent, FetchSettings, GeneratorHandle, LinkCardGenerator,
};

/// Bridges core effects to the generator engine and engine events back to
/// core messages. Lives on the UI thread; the handle owns the workers.
pub struct EffectRunner {
    handle: GeneratorHandle,
}

impl EffectRunner {
    pub fn new() -> Self {
        let generator = LinkCardGenerator::new(FetchSettings::default(), CardStyle::default());
        Self {
            handle: GeneratorHandle::new(Arc::new(generator)),
        }
    }

    /// Launch the worker for a validated submission.
    pub fn start(&self, submission: Submission) {
        card_info!(
            "starting generation url={} output={} html={}",
            submission.url,
            submission.output_path,
            submission.generate_html
        );
        self.handle.submit(
            submission.url,
            PathBuf::from(submission.output_path),
            submission.generate_html,
        );
    }

    /// Non-blocking poll for a finished worker, mapped to the core outcome.
    pub fn poll(&self) -> Option<GenerationOutcome> {
        self.handle.try_recv().map(|event| match event {
            EngineEvent::JobCompleted { result, .. } => match result {
                Ok(outcome) => GenerationOutcome::Success {
                    output_path: outcome.output_path.display().to_string(),
                },
                Err(err) => GenerationOutcome::Failure {
                    message: err.to_string(),
                },
            },
        })
    }
}

impl Default for EffectRunner {
    fn default() -> Self {
        Self::new()
    }
}
