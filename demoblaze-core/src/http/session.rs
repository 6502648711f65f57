use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, warn};

use crate::error::{ConfigValidationError, Error, Result, TransportError};

use super::config::SessionConfig;
use super::outcome::RawResponse;
use super::spec::RequestSpec;

/// A pooled HTTP connection owning the base URL and default headers.
///
/// Cloning a `Session` is cheap and shares the underlying connection pool,
/// so one session can serve any number of concurrent callers.
#[derive(Debug, Clone)]
pub struct Session {
    client: reqwest::Client,
    config: Arc<SessionConfig>,
}

impl Session {
    /// Creates a session from the given configuration.
    ///
    /// Validation warnings are logged rather than returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation, a default
    /// header is malformed, or the HTTP client cannot be built.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let report = config.validate()?;
        for warning in &report.warnings {
            warn!(warning = %warning, "Session configuration warning");
        }

        let mut default_headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ConfigValidationError::invalid(
                    "default_headers",
                    format!("invalid header name '{name}': {e}"),
                )
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                ConfigValidationError::invalid(
                    "default_headers",
                    format!("invalid value for header '{name}': {e}"),
                )
            })?;
            default_headers.insert(header_name, header_value);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(config.pool_idle_timeout)
            .gzip(true)
            .user_agent(&config.user_agent)
            .default_headers(default_headers)
            .build()
            .map_err(|e| Error::transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Returns the session configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Timeout that applies to a single attempt of this request.
    pub(crate) fn effective_timeout(&self, spec: &RequestSpec) -> Duration {
        spec.timeout.unwrap_or(self.config.timeout)
    }

    /// Resolves a request path against the session base URL. Absolute URLs
    /// pass through untouched.
    pub(crate) fn request_url(&self, spec: &RequestSpec) -> String {
        if spec.path.starts_with("http://") || spec.path.starts_with("https://") {
            return spec.path.clone();
        }
        let base = self.config.base_url.trim_end_matches('/');
        let path = spec.path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Sends the request once and reads the full response body.
    ///
    /// No retries happen at this layer; see
    /// [`RequestExecutor`](super::RequestExecutor) for the retry loop.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no usable response was produced:
    /// connection failures, timeouts, TLS failures, or a body exceeding
    /// the configured size limit.
    pub async fn send(&self, spec: &RequestSpec) -> std::result::Result<RawResponse, TransportError> {
        self.send_with_timeout(spec, self.effective_timeout(spec)).await
    }

    pub(crate) async fn send_with_timeout(
        &self,
        spec: &RequestSpec,
        timeout: Duration,
    ) -> std::result::Result<RawResponse, TransportError> {
        let url = self.request_url(spec);

        let mut request = self
            .client
            .request(spec.method.into(), &url)
            .timeout(timeout);

        if !spec.query.is_empty() {
            request = request.query(&spec.query);
        }
        for (name, value) in &spec.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &spec.body {
            request = request.json(body);
        }

        let started = Instant::now();
        let response = request.send().await.map_err(TransportError::from)?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let max_size = self.config.max_response_size;

        if let Some(content_length) = response.content_length()
            && content_length > max_size as u64
        {
            warn!(
                url = %url,
                content_length,
                max_size,
                "Response exceeds size limit (Content-Length check)"
            );
            return Err(oversized(content_length, max_size));
        }

        let body = self.read_body_limited(response, &url).await?;
        let elapsed = started.elapsed();

        let raw = RawResponse {
            status,
            headers,
            body,
            elapsed,
        };
        debug!(
            status,
            body_length = raw.body.len(),
            body_preview = %raw.body_preview(),
            elapsed_ms = %elapsed.as_millis(),
            "HTTP response received"
        );

        Ok(raw)
    }

    async fn read_body_limited(
        &self,
        response: reqwest::Response,
        url: &str,
    ) -> std::result::Result<Vec<u8>, TransportError> {
        use futures_util::StreamExt;

        let max_size = self.config.max_response_size;

        #[allow(clippy::cast_possible_truncation)]
        let initial_capacity = response
            .content_length()
            .map_or(64 * 1024, |len| std::cmp::min(len as usize, max_size));

        let mut stream = response.bytes_stream();
        let mut body = Vec::with_capacity(initial_capacity);
        let mut accumulated: usize = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(TransportError::from)?;
            accumulated = accumulated.saturating_add(chunk.len());
            if accumulated > max_size {
                warn!(
                    url = %url,
                    accumulated,
                    max_size,
                    "Response exceeds size limit during streaming"
                );
                return Err(oversized(accumulated as u64, max_size));
            }
            body.extend_from_slice(&chunk);
        }

        // Reclaim memory when the Content-Length hint over-allocated by
        // more than a quarter.
        if body.capacity() > body.len() + body.len() / 4 {
            body.shrink_to_fit();
        }

        Ok(body)
    }
}

/// Body overran `max_response_size`. Surfaces as a non-retryable
/// transport failure.
#[derive(Debug)]
struct ResponseTooLarge {
    received: u64,
    limit: u64,
}

impl fmt::Display for ResponseTooLarge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "response body of {} bytes exceeds the {} byte limit",
            self.received, self.limit
        )
    }
}

impl std::error::Error for ResponseTooLarge {}

fn oversized(received: u64, limit: usize) -> TransportError {
    TransportError::Unknown(Box::new(ResponseTooLarge {
        received,
        limit: limit as u64,
    }))
}
