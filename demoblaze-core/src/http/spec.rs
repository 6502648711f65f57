use std::fmt;
use std::time::Duration;

use serde_json::Value;

use crate::error::{Error, Result};

/// HTTP verbs supported by the request layer.
///
/// Restricting the set to the verbs the backends actually use keeps
/// misspelled or exotic methods out of the type system entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Returns the canonical upper-case method name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A single request described independently of any connection state.
///
/// A spec only carries what differs between calls: the verb, the path
/// relative to the session base URL, and optional payload and overrides.
/// Everything shared (base URL, default headers, pooling) lives on the
/// [`Session`](super::Session).
///
/// # Example
///
/// ```rust
/// use demoblaze_core::http::{Method, RequestSpec};
/// use serde_json::json;
///
/// let spec = RequestSpec::post("/addtocart")
///     .with_json(json!({"prod_id": 1, "flag": true}))
///     .accept_status(404);
///
/// assert_eq!(spec.method, Method::Post);
/// assert_eq!(spec.path, "/addtocart");
/// ```
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// HTTP verb.
    pub method: Method,

    /// Path relative to the session base URL. A leading slash is optional.
    pub path: String,

    /// Query string parameters, appended in order.
    pub query: Vec<(String, String)>,

    /// Per-call headers, overriding session defaults of the same name.
    pub headers: Vec<(String, String)>,

    /// JSON request body, if any.
    pub body: Option<Value>,

    /// Per-call timeout override. `None` uses the session default.
    pub timeout: Option<Duration>,

    /// Status codes outside the 2xx/3xx range that still count as success.
    ///
    /// Useful for endpoints where e.g. a 404 is an expected answer rather
    /// than a failure.
    pub accept_statuses: Vec<u16>,
}

impl RequestSpec {
    /// Creates a request spec for an arbitrary verb and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            timeout: None,
            accept_statuses: Vec::new(),
        }
    }

    /// Creates a `GET` request spec.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Creates a `POST` request spec.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Creates a `PUT` request spec.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    /// Creates a `PATCH` request spec.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    /// Creates a `DELETE` request spec.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Appends a query string parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Appends a per-call header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Overrides the session timeout for this call only.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Marks a status code as acceptable in addition to 2xx/3xx.
    #[must_use]
    pub fn accept_status(mut self, status: u16) -> Self {
        self.accept_statuses.push(status);
        self
    }

    /// Checks the spec before any network activity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the path is empty, the timeout
    /// override is zero, a header name is blank, or an accepted status code
    /// is outside the 100-599 range.
    pub fn validate(&self) -> Result<()> {
        if self.path.trim_matches('/').is_empty() {
            return Err(Error::validation("request path must not be empty"));
        }
        if let Some(timeout) = self.timeout
            && timeout.is_zero()
        {
            return Err(Error::validation(
                "per-call timeout must be greater than zero",
            ));
        }
        for (name, _) in &self.headers {
            if name.trim().is_empty() {
                return Err(Error::validation("header names must not be blank"));
            }
        }
        for status in &self.accept_statuses {
            if !(100..=599).contains(status) {
                return Err(Error::validation(format!(
                    "accepted status {status} is not a valid HTTP status code"
                )));
            }
        }
        Ok(())
    }

    /// Short `VERB /path` label used in diagnostics.
    pub(crate) fn label(&self) -> String {
        if self.path.starts_with('/') {
            format!("{} {}", self.method, self.path)
        } else {
            format!("{} /{}", self.method, self.path)
        }
    }
}
