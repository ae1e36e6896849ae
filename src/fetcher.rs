//! HTTP content fetching with status-aware error reporting
//!
//! [`Fetcher::urlopen`] performs a single GET and turns the outcome into either
//! an in-memory byte stream or a typed [`ArgoError`]. The HTTP client sits
//! behind the [`HttpTransport`] trait and presentation side effects (HTML error
//! pages, unexpected statuses) go through an injectable [`ErrorReporter`].

use crate::errors::{http_message, ArgoError, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

/// A fully buffered HTTP response
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: None,
            body: body.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("text/html"))
    }

    fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Transport able to perform a single GET and buffer the whole response.
///
/// Connection-level faults are returned as errors; any HTTP status, including
/// failures, is a successful [`RawResponse`].
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<RawResponse>;
}

/// Hook receiving the side effects of failed fetches
pub trait ErrorReporter: Send + Sync {
    /// Called with the HTML body of a 500 response before the error is raised
    fn html_error_page(&self, url: &str, html: &str) {
        error!(url, "server returned an HTML error page:\n{}", html);
    }

    /// Called with the composed status/body/url message of an unexpected status
    fn unexpected_status(&self, message: &str) {
        println!("{}", message);
    }
}

/// Default reporter: logs HTML pages, prints unexpected statuses to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {}

/// Configuration for the reqwest transport
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Request timeout; `None` blocks until the server answers
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: concat!("argo_utils/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FetcherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_optional_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Production transport backed by reqwest. No retries, no pooling across fetchers.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<RawResponse> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

/// URL fetcher
pub struct Fetcher<T = ReqwestTransport> {
    transport: T,
    reporter: Arc<dyn ErrorReporter>,
}

impl Fetcher<ReqwestTransport> {
    /// Create a fetcher using reqwest and the default reporter
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        Ok(Self::with_transport(ReqwestTransport::new(config)?))
    }
}

impl<T: HttpTransport> Fetcher<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            reporter: Arc::new(LogReporter),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Load content from `url`, or fail with an error describing the status.
    pub async fn urlopen(&self, url: &str) -> Result<Cursor<Vec<u8>>> {
        let parsed = Url::parse(url)?;
        debug!(url, "GET");
        let response = self.transport.get(&parsed).await?;
        debug!(url, status = response.status, bytes = response.body.len(), "response");
        classify_response(response, url, self.reporter.as_ref())
    }
}

/// Fetch `url` with a default reqwest fetcher.
pub async fn urlopen(url: &str) -> Result<Cursor<Vec<u8>>> {
    Fetcher::new(&FetcherConfig::default())?.urlopen(url).await
}

/// Map a buffered response onto the fetch contract.
pub fn classify_response(
    response: RawResponse,
    url: &str,
    reporter: &dyn ErrorReporter,
) -> Result<Cursor<Vec<u8>>> {
    match response.status {
        200 => Ok(Cursor::new(response.body)),
        404 => Err(ArgoError::NotFound {
            status: 404,
            body: response.text().replacen("Error", "", 1),
            url: url.to_string(),
        }),
        500 => {
            let text = response.text();
            if response.is_html() {
                reporter.html_error_page(url, &text);
            }
            Err(ArgoError::ServerError {
                status: 500,
                body: text,
                url: url.to_string(),
            })
        }
        status => {
            reporter.unexpected_status(&http_message(status, &response.text(), url));
            Err(ArgoError::HttpStatus {
                status,
                reason: status_reason(status),
                url: url.to_string(),
            })
        }
    }
}

fn status_reason(status: u16) -> String {
    let class = match status {
        400..=499 => "Client Error",
        500..=599 => "Server Error",
        _ => "Unexpected Status",
    };
    match StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
    {
        Some(phrase) => format!("{class}: {phrase}"),
        None => class.to_string(),
    }
}
