/*!
HTTP client for the platform's JSON:API endpoints.

Thin wrapper over `reqwest`: one method per verb, bearer auth when a token
is present, and a non-2xx response surfaced as `ApiError::Status` carrying the
raw body so the caller can print the server's own diagnostics verbatim.

No retries and no client-side timeouts. The only suspension point is the
request itself, and the entry point aborts it on Ctrl-C.
*/

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use tracing::{debug, trace};
use url::Url;

pub mod query;

pub use query::Query;

/// Percent-encodes `raw` as a single path segment: `/`, `?`, `#` and `%`
/// never reach the URL as syntax.
pub fn path_segment(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

pub const DEFAULT_BASE_URL: &str = "https://app.x-b-e.com";
pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/* ---- Errors ---- */

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid base URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request failed with status {status}")]
    Status { status: StatusCode, body: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    /// Raw server body for non-2xx responses, when non-empty.
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::Status { body, .. } if !body.trim().is_empty() => Some(body),
            _ => None,
        }
    }
}

/* ---- Client ---- */

#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl Client {
    /// A blank token means unauthenticated: no `Authorization` header is sent.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ApiError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = Url::parse(trimmed).map_err(|source| ApiError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_API_MEDIA_TYPE));

        let http = reqwest::Client::builder()
            .user_agent(concat!("xbe-cli/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|source| ApiError::Transport {
                url: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            http,
            base_url,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub async fn get(&self, path: &str, query: &Query) -> Result<ApiResponse, ApiError> {
        self.send(Method::GET, path, query, None).await
    }

    pub async fn post(&self, path: &str, body: Vec<u8>) -> Result<ApiResponse, ApiError> {
        self.send(Method::POST, path, &Query::new(), Some(body)).await
    }

    pub async fn patch(&self, path: &str, body: Vec<u8>) -> Result<ApiResponse, ApiError> {
        self.send(Method::PATCH, path, &Query::new(), Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send(Method::DELETE, path, &Query::new(), None).await
    }

    /// Base URL (path prefix kept) + `path` + encoded query.
    pub fn endpoint(&self, path: &str, query: &Query) -> Result<Url, ApiError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let joined = if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        };
        let mut url = Url::parse(&joined).map_err(|source| ApiError::InvalidUrl {
            url: joined.clone(),
            source,
        })?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.pairs());
        }
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<Vec<u8>>,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.endpoint(path, query)?;
        debug!(%method, %url, authenticated = self.is_authenticated(), "sending request");

        let mut request = self.http.request(method.clone(), url.clone());
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = body {
            trace!(body = %String::from_utf8_lossy(&body), "request body");
            request = request
                .header(CONTENT_TYPE, JSON_API_MEDIA_TYPE)
                .body(body);
        }

        let transport = |source| ApiError::Transport {
            url: url.to_string(),
            source,
        };
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport)?.to_vec();

        debug!(%method, %url, status = status.as_u16(), bytes = body.len(), "received response");
        trace!(body = %String::from_utf8_lossy(&body), "response body");

        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        Ok(ApiResponse { status, body })
    }
}
