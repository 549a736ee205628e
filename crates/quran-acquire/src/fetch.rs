use std::future::Future;
use std::time::Duration;

use quran_model::ChapterEnvelope;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.alquran.cloud/v1";

/// Pickthall's 1930 English translation, which is in the public domain.
pub const DEFAULT_EDITION: &str = "en.pickthall";

const USER_AGENT: &str = concat!("quran-acquire/", env!("CARGO_PKG_VERSION"), " (passage corpus tool)");

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("unexpected response body from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Where and how chapters are requested.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    /// Translation identifier, e.g. `en.pickthall` or `en.sahih`.
    pub edition: String,
    /// Per-request timeout. `None` leaves the client default in place.
    pub timeout: Option<Duration>,
    /// Skip TLS certificate validation. Only for sandboxes that intercept TLS.
    pub accept_invalid_certs: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            edition: DEFAULT_EDITION.to_string(),
            timeout: None,
            accept_invalid_certs: false,
        }
    }
}

/// Something that can hand back the raw envelope for a chapter number.
pub trait ChapterSource {
    fn chapter_url(&self, chapter: u32) -> String;

    fn fetch_chapter(&self, chapter: u32) -> impl Future<Output = Result<ChapterEnvelope, FetchError>>;
}

/// HTTP client for the chapter endpoint of the Al-Quran Cloud API.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    edition: String,
}

impl ApiClient {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if config.accept_invalid_certs {
            tracing::warn!("TLS certificate validation is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(Self {
            client: builder.build().map_err(FetchError::Client)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            edition: config.edition.clone(),
        })
    }

    /// GET `url` and parse the body as a chapter envelope.
    pub async fn fetch_json(&self, url: &str) -> Result<ChapterEnvelope, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;
        tracing::debug!(url = %url, bytes = body.len(), "Received response");

        parse_envelope(url, &body)
    }
}

impl ChapterSource for ApiClient {
    fn chapter_url(&self, chapter: u32) -> String {
        format!("{}/surah/{chapter}/{}", self.base_url, self.edition)
    }

    async fn fetch_chapter(&self, chapter: u32) -> Result<ChapterEnvelope, FetchError> {
        let url = self.chapter_url(chapter);
        self.fetch_json(&url).await
    }
}

/// Render an error and every `source()` beneath it, joined with `": "`.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

fn parse_envelope(url: &str, body: &str) -> Result<ChapterEnvelope, FetchError> {
    serde_json::from_str(body).map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })
}
