use std::path::PathBuf;

use thiserror::Error;

pub type JobId = u64;

/// Metadata scraped from the target page. Everything except the final URL
/// is best-effort; the card renders with whatever was found.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub site_name: Option<String>,
    pub final_url: String,
}

/// Files produced by one successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    pub output_path: PathBuf,
    pub html_path: Option<PathBuf>,
    pub metadata: PageMetadata,
}

/// Event delivered to the UI thread over the engine channel, exactly once
/// per submitted job.
#[derive(Debug)]
pub enum EngineEvent {
    JobCompleted {
        job_id: JobId,
        result: Result<JobOutcome, GenerateError>,
    },
}

/// Terminal failure of a generation job. `message` is what the shell shows
/// the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GenerateError {
    pub kind: FailureKind,
    pub message: String,
}

impl GenerateError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureKind {
    #[error("invalid url")]
    InvalidUrl,
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timeout")]
    Timeout,
    #[error("redirect limit exceeded")]
    RedirectLimitExceeded,
    #[error("response too large (max {max_bytes}, actual {actual:?})")]
    TooLarge { max_bytes: u64, actual: Option<u64> },
    #[error("unsupported content type {content_type}")]
    UnsupportedContentType { content_type: String },
    #[error("decode error")]
    Decode,
    #[error("image error")]
    Image,
    #[error("io error")]
    Io,
    #[error("network error")]
    Network,
}
