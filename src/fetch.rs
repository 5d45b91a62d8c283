//! Downloading image payloads over HTTP.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};

use crate::config::FetchConfig;
use crate::container::ContainerKind;
use crate::error::{Error, Result};

/// A downloaded payload that has been confirmed to be an image container.
///
/// Owned by the caller for the duration of one run and dropped after parsing.
#[derive(Debug, Clone)]
pub struct ImageBytes {
    data: Vec<u8>,
    kind: ContainerKind,
    content_type: Option<String>,
}

impl ImageBytes {
    /// Wrap raw bytes, rejecting anything that is not an image container.
    pub fn new(data: Vec<u8>, content_type: Option<String>) -> Result<Self> {
        let kind = ContainerKind::detect(&data).ok_or_else(|| {
            Error::format(format!(
                "response is not an image (content-type: {}, {} bytes)",
                content_type.as_deref().unwrap_or("unknown"),
                data.len()
            ))
        })?;
        Ok(Self {
            data,
            kind,
            content_type,
        })
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// The `Content-Type` the server reported, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// HTTP fetcher for image URLs.
///
/// One blocking request per call: no retries and no caching. Redirects are
/// followed by `reqwest`'s default policy.
///
/// # Example
///
/// ```rust,no_run
/// use exif_fetch::config::FetchConfig;
/// use exif_fetch::fetch::Fetcher;
///
/// # async fn example() -> exif_fetch::Result<()> {
/// let fetcher = Fetcher::new(&FetchConfig::default())?;
/// let image = fetcher.fetch("https://example.com/photo.jpg").await?;
/// println!("{} bytes of {}", image.len(), image.kind().mime_type());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    max_bytes: u64,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::network_with_source("failed to build HTTP client", e))?;
        Ok(Self {
            client,
            max_bytes: config.max_bytes,
        })
    }

    /// Download `raw_url` and confirm the body is an image.
    pub async fn fetch(&self, raw_url: &str) -> Result<ImageBytes> {
        let url = normalize_url(raw_url)?;
        log::info!("Downloading {url}");

        let mut resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| request_error(&url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::network(format!("{url} returned {status}")));
        }

        if let Some(len) = resp.content_length() {
            if len > self.max_bytes {
                return Err(Error::network(format!(
                    "{url} is {len} bytes, larger than the {} byte limit",
                    self.max_bytes
                )));
            }
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let mut data = Vec::new();
        while let Some(chunk) = resp.chunk().await.map_err(|e| request_error(&url, e))? {
            if (data.len() + chunk.len()) as u64 > self.max_bytes {
                return Err(Error::network(format!(
                    "{url} exceeds the {} byte limit",
                    self.max_bytes
                )));
            }
            data.extend_from_slice(&chunk);
        }
        log::debug!(
            "Received {} bytes ({})",
            data.len(),
            content_type.as_deref().unwrap_or("no content-type")
        );

        ImageBytes::new(data, content_type)
    }
}

/// Parse a user-supplied URL. A missing scheme defaults to `https://`.
pub fn normalize_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::network("no URL given"));
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let url = Url::parse(&candidate)
        .map_err(|e| Error::network_with_source(format!("malformed URL '{trimmed}'"), e))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::network(format!(
            "unsupported URL scheme '{other}' (expected http or https)"
        ))),
    }
}

fn request_error(url: &Url, err: reqwest::Error) -> Error {
    let message = if err.is_timeout() {
        format!("request to {url} timed out")
    } else if err.is_connect() {
        format!(
            "could not connect to {}",
            url.host_str().unwrap_or(url.as_str())
        )
    } else {
        format!("request to {url} failed")
    };
    Error::network_with_source(message, err)
}
