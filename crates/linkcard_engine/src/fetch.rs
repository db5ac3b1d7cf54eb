use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;

use crate::{FailureKind, GenerateError};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    /// Cap on the HTML document body.
    pub max_page_bytes: u64,
    /// Cap on the preview image body.
    pub max_image_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_page_bytes: 5 * 1024 * 1024,
            max_image_bytes: 10 * 1024 * 1024,
            allowed_content_types: vec![
                "text/html".to_string(),
                "application/xhtml+xml".to_string(),
            ],
        }
    }
}

/// Downloaded page body plus the response facts the pipeline needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub bytes: Vec<u8>,
    pub final_url: String,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PageFetcher {
    settings: FetchSettings,
}

impl PageFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    fn build_client(&self) -> Result<reqwest::Client, GenerateError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(
                self.settings.redirect_limit,
            ))
            .build()
            .map_err(|err| GenerateError::new(FailureKind::Network, err.to_string()))
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }

    /// Fetch the target page, enforcing the content-type allowlist and the
    /// page byte cap while streaming the body.
    pub async fn fetch_page(&self, url: &str) -> Result<FetchedPage, GenerateError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| GenerateError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = self.build_client()?;

        let response = client.get(parsed).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerateError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("server responded with {status}"),
            ));
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        if let Some(ct) = content_type.as_deref() {
            if !self.is_content_type_allowed(ct) {
                return Err(GenerateError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    format!("page is not HTML (content type {ct})"),
                ));
            }
        }

        let bytes = read_capped(response, self.settings.max_page_bytes).await?;

        Ok(FetchedPage {
            bytes,
            final_url,
            content_type,
        })
    }

    /// Fetch the preview image referenced by the page metadata. Any content
    /// type is accepted here; the image decoder is the arbiter.
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, GenerateError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| GenerateError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = self.build_client()?;

        let response = client.get(parsed).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerateError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("image request responded with {status}"),
            ));
        }

        read_capped(response, self.settings.max_image_bytes).await
    }
}

async fn read_capped(
    response: reqwest::Response,
    max_bytes: u64,
) -> Result<Vec<u8>, GenerateError> {
    if let Some(content_len) = response.content_length() {
        if content_len > max_bytes {
            return Err(too_large(max_bytes, Some(content_len)));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(map_reqwest_error)?;
        let next_len = bytes.len() as u64 + chunk.len() as u64;
        if next_len > max_bytes {
            return Err(too_large(max_bytes, Some(next_len)));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> GenerateError {
    GenerateError::new(
        FailureKind::TooLarge { max_bytes, actual },
        format!("response exceeds {max_bytes} bytes"),
    )
}

fn map_reqwest_error(err: reqwest::Error) -> GenerateError {
    if err.is_timeout() {
        return GenerateError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return GenerateError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    GenerateError::new(FailureKind::Network, err.to_string())
}
