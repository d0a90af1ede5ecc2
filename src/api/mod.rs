pub mod http;

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::{
    BasicResponse, BookingRequest, CreateMeetingResponse, GlobalLeaderboardResponse,
    LoginRequest, LoginResponse, MeetingAction, ProfessorsResponse, RegisterRequest,
};

pub use self::http::HttpTransport;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("response from {path} is not valid JSON: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode request body for {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Raw JSON exchange with the server. Non-2xx answers that carry a JSON body
/// are returned as values; only connection or decoding problems are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError>;

    async fn post(&self, path: &str, body: Option<Value>) -> Result<Value, ApiError>;
}

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub fn from_arc(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.post_json("/api/login", Some(req)).await
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<BasicResponse, ApiError> {
        self.post_json("/api/register", Some(req)).await
    }

    pub async fn global_leaderboard(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<GlobalLeaderboardResponse, ApiError> {
        let query = [("page", page.to_string()), ("per_page", per_page.to_string())];
        self.get_json("/api/leaderboard/global", &query).await
    }

    /// `level` of `None` (or `all`) lists every professor.
    pub async fn professors_leaderboard(
        &self,
        level: Option<&str>,
    ) -> Result<ProfessorsResponse, ApiError> {
        let mut query = Vec::new();
        if let Some(level) = level.map(str::trim).filter(|l| !l.is_empty() && *l != "all") {
            query.push(("level", level.to_string()));
        }
        self.get_json("/api/leaderboard/professors", &query).await
    }

    pub async fn create_meeting(
        &self,
        req: &BookingRequest,
    ) -> Result<CreateMeetingResponse, ApiError> {
        self.post_json("/api/meetings/create", Some(req)).await
    }

    pub async fn cancel_meeting(&self, meeting_id: i64) -> Result<BasicResponse, ApiError> {
        let path = format!("/api/meetings/{meeting_id}/cancel");
        self.post_json::<(), _>(&path, None).await
    }

    pub async fn respond_meeting(&self, action: &MeetingAction) -> Result<BasicResponse, ApiError> {
        let path = format!("/api/meetings/{}/respond", action.meeting_id);
        self.post_json(&path, Some(&action.body())).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "GET");
        let value = self.transport.get(path, query).await?;
        decode(path, value)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "POST");
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| ApiError::Encode {
                path: path.to_string(),
                source: e,
            })?;
        let value = self.transport.post(path, body).await?;
        decode(path, value)
    }
}

fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode {
        path: path.to_string(),
        source: e,
    })
}
