//! HTTP client abstraction for every call made to the backend

use bytes::Bytes;
use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{multipart, Client, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use url::Url;

use crate::config::ClientOptions;
use crate::error::{Error, Result, FALLBACK_MESSAGE};

/// Shared entry point for outbound requests
///
/// Holds the base URL and one `reqwest::Client`; cloning is cheap and every
/// resource client keeps its own clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    client_info: String,
    page_size: u32,
}

impl ApiClient {
    /// Create a new ApiClient from options
    pub fn new(options: &ClientOptions) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Self::with_http_client(options, client)
    }

    /// Create a new ApiClient around an existing `reqwest::Client`
    pub fn with_http_client(options: &ClientOptions, client: Client) -> Result<Self> {
        let base_url = options.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)?;

        Ok(Self {
            base_url,
            client,
            client_info: options.client_info.clone(),
            page_size: options.default_page_size.max(1),
        })
    }

    /// The backend base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Page size sent when a list filter leaves it unset
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request with an arbitrary method
    pub fn request(&self, method: Method, path: &str) -> FetchBuilder {
        FetchBuilder::new(self.client.clone(), &self.url(path), method)
            .header("X-Client-Info", &self.client_info)
    }

    /// Create a GET request
    pub fn get(&self, path: &str) -> FetchBuilder {
        self.request(Method::GET, path)
    }

    /// Create a POST request
    pub fn post(&self, path: &str) -> FetchBuilder {
        self.request(Method::POST, path)
    }

    /// Create a PUT request
    pub fn put(&self, path: &str) -> FetchBuilder {
        self.request(Method::PUT, path)
    }

    /// Create a DELETE request
    pub fn delete(&self, path: &str) -> FetchBuilder {
        self.request(Method::DELETE, path)
    }
}

/// Ordered query parameters that skip absent and empty values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter; `None` and values rendering as `""` are dropped
    pub fn push<V: ToString>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            let value = value.to_string();
            if !value.is_empty() {
                self.pairs.push((key.to_string(), value));
            }
        }
    }

    /// Builder form of [`QueryParams::push`]
    pub fn with<V: ToString>(mut self, key: &str, value: Option<V>) -> Self {
        self.push(key, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Render as `?k=v&...`, or an empty string when there is nothing to send
    pub fn to_query_string(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }
        let joined = self
            .pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("?{}", joined)
    }
}

/// A parsed response body
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// `application/json` bodies
    Json(Value),
    /// `application/pdf` bodies
    Binary(Bytes),
    /// Anything else
    Text(String),
}

impl Payload {
    async fn read(response: reqwest::Response) -> Result<Payload> {
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        if content_type.contains("application/json") {
            let bytes = response.bytes().await?;
            if bytes.is_empty() {
                return Ok(Payload::Json(Value::Null));
            }
            return match serde_json::from_slice::<Value>(&bytes) {
                Ok(value) => Ok(Payload::Json(value)),
                // A broken error body is still worth showing as text
                Err(_) if !status.is_success() => {
                    Ok(Payload::Text(String::from_utf8_lossy(&bytes).into_owned()))
                }
                Err(err) => Err(Error::Json(err)),
            };
        }

        if content_type.contains("application/pdf") {
            return Ok(Payload::Binary(response.bytes().await?));
        }

        Ok(Payload::Text(response.text().await?))
    }

    fn describe(&self) -> &'static str {
        match self {
            Payload::Json(_) => "JSON",
            Payload::Binary(_) => "binary",
            Payload::Text(_) => "text",
        }
    }

    /// Turn an error response body into the client's error value
    pub fn into_error(self, status: StatusCode) -> Error {
        match self {
            Payload::Json(value) => {
                let message = ["message", "error"]
                    .iter()
                    .filter_map(|field| value.get(*field).and_then(Value::as_str))
                    .find(|text| !text.is_empty())
                    .unwrap_or(FALLBACK_MESSAGE)
                    .to_string();
                Error::Api { status, message }
            }
            Payload::Text(text) if text.trim().is_empty() => Error::UnexpectedResponse {
                status,
                body: format!("Unexpected response (status {})", status.as_u16()),
            },
            Payload::Text(text) => Error::UnexpectedResponse { status, body: text },
            Payload::Binary(_) => Error::Api {
                status,
                message: FALLBACK_MESSAGE.to_string(),
            },
        }
    }
}

enum Body {
    Json(Vec<u8>),
    Multipart(multipart::Form),
}

/// Helper for building and executing one HTTP request
pub struct FetchBuilder {
    client: Client,
    url: String,
    method: Method,
    headers: HeaderMap,
    query: QueryParams,
    body: Option<Body>,
}

impl FetchBuilder {
    /// Create a new FetchBuilder
    pub fn new(client: Client, url: &str, method: Method) -> Self {
        Self {
            client,
            url: url.to_string(),
            method,
            headers: HeaderMap::new(),
            query: QueryParams::new(),
            body: None,
        }
    }

    /// Add a header to the request; invalid names or values are skipped
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Add bearer token authentication when a token is present
    pub fn bearer_auth(mut self, token: Option<&str>) -> Self {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                self.headers.insert(AUTHORIZATION, value);
            }
        }
        self
    }

    /// Ask for a PDF document
    pub fn accept_pdf(mut self) -> Self {
        self.headers
            .insert(ACCEPT, HeaderValue::from_static("application/pdf"));
        self
    }

    /// Add a query parameter, skipping absent and empty values
    pub fn query<V: ToString>(mut self, key: &str, value: Option<V>) -> Self {
        self.query.push(key, value);
        self
    }

    /// Replace the query parameters
    pub fn query_params(mut self, params: QueryParams) -> Self {
        self.query = params;
        self
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        let json = serde_json::to_vec(body)?;
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = Some(Body::Json(json));
        Ok(self)
    }

    /// Send a multipart form as-is
    pub fn multipart(mut self, form: multipart::Form) -> Self {
        self.headers.remove(CONTENT_TYPE);
        self.body = Some(Body::Multipart(form));
        self
    }

    /// Full URL including the query string
    pub fn full_url(&self) -> String {
        format!("{}{}", self.url, self.query.to_query_string())
    }

    fn build(self) -> (String, RequestBuilder) {
        let url = self.full_url();
        let mut req = self
            .client
            .request(self.method, url.as_str())
            .headers(self.headers);

        match self.body {
            Some(Body::Json(bytes)) => req = req.body(bytes),
            Some(Body::Multipart(form)) => req = req.multipart(form),
            None => {}
        }

        (url, req)
    }

    /// Execute the request and return the parsed success payload
    pub async fn send(self) -> Result<Payload> {
        let method = self.method.clone();
        let (url, req) = self.build();
        debug!("{} {}", method, url);

        let response = req
            .send()
            .await
            .map_err(|source| Error::Network { url: url.clone(), source })?;
        let status = response.status();
        let payload = Payload::read(response).await?;

        if !status.is_success() {
            debug!("{} {} failed with status {}", method, url, status);
            return Err(payload.into_error(status));
        }

        Ok(payload)
    }

    /// Execute the request and deserialize the JSON response
    pub async fn execute<T: DeserializeOwned>(self) -> Result<T> {
        match self.send().await? {
            Payload::Json(value) => Ok(serde_json::from_value(value)?),
            other => Err(unexpected(other, "JSON")),
        }
    }

    /// Execute the request and ignore whatever body comes back
    pub async fn execute_unit(self) -> Result<()> {
        self.send().await.map(|_| ())
    }

    /// Execute the request and return the binary response
    pub async fn execute_binary(self) -> Result<Bytes> {
        match self.send().await? {
            Payload::Binary(bytes) => Ok(bytes),
            other => Err(unexpected(other, "binary")),
        }
    }
}

fn unexpected(payload: Payload, expected: &str) -> Error {
    let kind = payload.describe();
    let body = match payload {
        Payload::Text(text) if !text.trim().is_empty() => text,
        _ => format!("Expected a {} response but received {}", expected, kind),
    };
    Error::UnexpectedResponse {
        status: StatusCode::OK,
        body,
    }
}
