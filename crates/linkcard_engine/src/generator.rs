use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use card_logging::{card_info, card_warn};

use crate::compose::{compose_card, decode_image, encode_png, CardStyle};
use crate::decode::decode_page;
use crate::fetch::{FetchSettings, PageFetcher};
use crate::html::render_snippet;
use crate::metadata::extract_metadata;
use crate::persist::write_atomic;
use crate::{EngineEvent, FailureKind, GenerateError, JobId, JobOutcome};

/// The single operation the shell consumes: produce a card image at
/// `output_path` and, if requested, a sibling `.html` snippet.
#[async_trait::async_trait]
pub trait CardGenerator: Send + Sync {
    async fn generate(
        &self,
        url: &str,
        output_path: &Path,
        generate_html: bool,
    ) -> Result<JobOutcome, GenerateError>;
}

/// Default generator: fetch page, decode, scrape metadata, fetch the
/// preview image, compose the card, write the artifacts atomically.
#[derive(Debug, Default)]
pub struct LinkCardGenerator {
    fetcher: PageFetcher,
    style: CardStyle,
}

impl LinkCardGenerator {
    pub fn new(settings: FetchSettings, style: CardStyle) -> Self {
        Self {
            fetcher: PageFetcher::new(settings),
            style,
        }
    }

    async fn fetch_thumbnail(&self, image_url: &str) -> Option<image::DynamicImage> {
        // A broken preview image degrades to a text-only card; it never
        // fails the job.
        let bytes = match self.fetcher.fetch_image(image_url).await {
            Ok(bytes) => bytes,
            Err(err) => {
                card_warn!("thumbnail fetch failed for {image_url}: {err}");
                return None;
            }
        };
        match decode_image(&bytes) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                card_warn!("thumbnail decode failed for {image_url}: {err}");
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl CardGenerator for LinkCardGenerator {
    async fn generate(
        &self,
        url: &str,
        output_path: &Path,
        generate_html: bool,
    ) -> Result<JobOutcome, GenerateError> {
        let page = self.fetcher.fetch_page(url).await?;
        let html = decode_page(&page.bytes, page.content_type.as_deref())?;
        let metadata = extract_metadata(&html, &page.final_url);
        card_info!(
            "metadata for {url}: title={:?} image={:?}",
            metadata.title,
            metadata.image_url
        );

        let thumbnail = match metadata.image_url.as_deref() {
            Some(image_url) => self.fetch_thumbnail(image_url).await,
            None => None,
        };

        let card = compose_card(&metadata, thumbnail.as_ref(), &self.style);
        let png = encode_png(&card)?;
        write_atomic(output_path, &png).map_err(io_error)?;

        let html_path = if generate_html {
            let path = output_path.with_extension("html");
            let image_file = output_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| output_path.to_string_lossy().into_owned());
            let snippet = render_snippet(&metadata, &image_file);
            write_atomic(&path, snippet.as_bytes()).map_err(io_error)?;
            Some(path)
        } else {
            None
        };

        Ok(JobOutcome {
            output_path: output_path.to_path_buf(),
            html_path,
            metadata,
        })
    }
}

fn io_error(err: crate::persist::PersistError) -> GenerateError {
    GenerateError::new(FailureKind::Io, err.to_string())
}

/// Hands submissions to detached worker threads and exposes their
/// completion events to the UI thread without blocking it.
///
/// Each submission gets its own thread and its own single-thread tokio
/// runtime, created at worker start and dropped with it, so no scheduler
/// state is shared between submissions.
pub struct GeneratorHandle {
    generator: Arc<dyn CardGenerator>,
    event_tx: mpsc::Sender<EngineEvent>,
    event_rx: mpsc::Receiver<EngineEvent>,
    next_job_id: AtomicU64,
}

impl GeneratorHandle {
    pub fn new(generator: Arc<dyn CardGenerator>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        Self {
            generator,
            event_tx,
            event_rx,
            next_job_id: AtomicU64::new(1),
        }
    }

    /// Launch exactly one worker for this submission and return its job id.
    /// The worker sends one `EngineEvent::JobCompleted`, success or failure;
    /// if the handle is gone by then, the send is silently discarded.
    pub fn submit(&self, url: String, output_path: PathBuf, generate_html: bool) -> JobId {
        let job_id = self.next_job_id.fetch_add(1, Ordering::Relaxed);
        let generator = self.generator.clone();
        let event_tx = self.event_tx.clone();

        thread::spawn(move || {
            card_info!("job {job_id}: generating card for {url}");
            let result = run_job(generator.as_ref(), &url, &output_path, generate_html);
            if let Err(err) = &result {
                card_warn!("job {job_id} failed: {err}");
            }
            let _ = event_tx.send(EngineEvent::JobCompleted { job_id, result });
        });

        job_id
    }

    /// Non-blocking poll, called from the UI thread's frame loop.
    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

fn run_job(
    generator: &dyn CardGenerator,
    url: &str,
    output_path: &Path,
    generate_html: bool,
) -> Result<JobOutcome, GenerateError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| GenerateError::new(FailureKind::Io, err.to_string()))?;
    runtime.block_on(generator.generate(url, output_path, generate_html))
}
