//! `reqwest`-backed implementation of [`HttpTransport`].

use async_trait::async_trait;
use notifia_core::api::{ApiRequest, ApiResponse, HttpTransport, Method};
use notifia_core::config::ApiConfig;
use notifia_core::error::{NotifiaError, Result};
use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Url};

/// Sends API requests with a shared cookie jar.
///
/// Session cookies set by `/auth/login` or `/auth/register` are attached to
/// every later request made through the same transport, which is how the
/// server recognises the signed-in user. The jar can be exported with
/// [`cookie_header`](Self::cookie_header) and loaded back into a later
/// process with [`restore_cookies`](Self::restore_cookies).
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    jar: Arc<Jar>,
    base_url: String,
    origin: Url,
}

impl ReqwestTransport {
    /// Creates a transport for the configured base URL and timeout.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let origin = Url::parse(&base_url).map_err(|e| {
            NotifiaError::config(format!("Invalid API base URL '{}': {}", base_url, e))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(jar.clone())
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| NotifiaError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            jar,
            base_url,
            origin,
        })
    }

    /// The `Cookie` header the jar currently sends to the API, if any.
    pub fn cookie_header(&self) -> Option<String> {
        self.jar
            .cookies(&self.origin)
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }

    /// Loads `name=value` pairs previously returned by
    /// [`cookie_header`](Self::cookie_header).
    pub fn restore_cookies(&self, header: &str) {
        let pairs = header
            .split(';')
            .map(str::trim)
            .filter(|pair| pair.contains('='));
        for pair in pairs {
            self.jar
                .add_cookie_str(&format!("{}; Path=/", pair), &self.origin);
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.url(&request.path);
        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::debug!("[Http] {:?} {} failed: {}", request.method, url, e);
            NotifiaError::network(e.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| NotifiaError::network(format!("Failed to read response body: {}", e)))?;

        tracing::debug!("[Http] {:?} {} -> {}", request.method, url, status);
        Ok(ApiResponse::new(status, body))
    }
}
