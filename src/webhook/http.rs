//! HTTP request/response types and client trait.

use super::HttpError;

/// An HTTP request to be sent.
///
/// A plain value handed to an [`HttpClient`]. The sender builds one per
/// delivery and re-sends clones of it on every rate-limited retry.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: http::Method,
    /// Target URL
    pub url: url::Url,
    /// HTTP headers to send
    pub headers: http::HeaderMap,
    /// Optional request body
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a POST request to the given URL with no headers and no body.
    #[must_use]
    pub fn post(url: url::Url) -> Self {
        Self {
            method: http::Method::POST,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets a header, replacing any previous value for the same name.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// An HTTP response received from the endpoint.
///
/// The body is fully buffered into memory.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new HTTP response.
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns true if the endpoint accepted the payload (200 through 204).
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        (200..=204).contains(&self.status.as_u16())
    }

    /// Returns true if the endpoint is throttling requests (429).
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.status == http::StatusCode::TOO_MANY_REQUESTS
    }

    /// Returns the body as text, or `None` if it is empty or not UTF-8.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body)
            .ok()
            .filter(|text| !text.is_empty())
    }
}

/// Trait for making HTTP requests.
///
/// Abstracts the transport so the delivery loop can be driven by a
/// scripted client in tests.
///
/// # Example
///
/// ```ignore
/// use embed_hook::webhook::{HttpClient, HttpRequest, HttpResponse, HttpError};
///
/// struct AlwaysNoContent;
///
/// impl HttpClient for AlwaysNoContent {
///     async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(HttpResponse::new(http::StatusCode::NO_CONTENT, http::HeaderMap::new(), vec![]))
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Sends an HTTP request and returns the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when no response could be obtained:
    /// - Network connection fails ([`HttpError::Connection`])
    /// - Request times out ([`HttpError::Timeout`])
    /// - URL is unusable ([`HttpError::InvalidUrl`])
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}
