use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;

use super::{ApiError, Transport};

#[derive(Clone, Debug)]
pub struct HttpTransport {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout_seconds: Option<u64>) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url.trim()).map_err(|e| ApiError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(10));
        if let Some(secs) = timeout_seconds.filter(|s| *s > 0) {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| ApiError::HttpClientBuild { source: e })?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn url_for(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut url = self.base_url.join(path).map_err(|e| ApiError::InvalidUrl {
            url: format!("{}{}", self.base_url, path),
            message: e.to_string(),
        })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    async fn execute(&self, path: &str, req: reqwest::RequestBuilder) -> Result<Value, ApiError> {
        let resp = req.send().await.map_err(|e| ApiError::Transport {
            path: path.to_string(),
            source: e,
        })?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(|e| ApiError::Transport {
            path: path.to_string(),
            source: e,
        })?;
        tracing::debug!(path, status, len = body.len(), "response");
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode {
            path: path.to_string(),
            source: e,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        let url = self.url_for(path, query)?;
        self.execute(path, self.client.get(url)).await
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        let url = self.url_for(path, &[])?;
        let mut req = self.client.post(url).header(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        if let Some(body) = body {
            req = req.json(&body);
        }
        self.execute(path, req).await
    }
}
