//! Linkcard engine: metadata fetch, card composition and effect execution.
mod compose;
mod decode;
mod fetch;
mod generator;
mod html;
mod metadata;
mod persist;
mod types;

pub use compose::{compose_card, decode_image, encode_png, CardStyle};
pub use decode::decode_page;
pub use fetch::{FetchSettings, FetchedPage, PageFetcher};
pub use generator::{CardGenerator, GeneratorHandle, LinkCardGenerator};
pub use html::render_snippet;
pub use metadata::extract_metadata;
pub use persist::{ensure_output_dir, write_atomic, PersistError};
pub use types::{EngineEvent, FailureKind, GenerateError, JobId, JobOutcome, PageMetadata};
