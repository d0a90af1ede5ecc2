use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::api::{ApiClient, ApiError, Transport};

#[derive(Clone, Debug)]
pub enum Reply {
    Json(Value),
    Delayed(Duration, Value),
    /// Body that is not JSON, as sent by a misbehaving proxy.
    Malformed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// In-memory server: each path answers with its queued replies in order.
/// A path with no reply left fails like an undecodable body.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, path: &str, reply: Reply) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn json(&self, path: &str, value: Value) -> &Self {
        self.reply(path, Reply::Json(value))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn client(self: &Arc<Self>) -> ApiClient {
        ApiClient::from_arc(self.clone())
    }

    async fn answer(&self, call: Call) -> Result<Value, ApiError> {
        let path = call.path.clone();
        self.calls.lock().unwrap().push(call);
        let next = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&path)
            .and_then(VecDeque::pop_front);
        match next {
            Some(Reply::Json(v)) => Ok(v),
            Some(Reply::Delayed(delay, v)) => {
                tokio::time::sleep(delay).await;
                Ok(v)
            }
            Some(Reply::Malformed) | None => Err(ApiError::Decode {
                path,
                source: serde_json::from_str::<Value>("<html>502 Bad Gateway</html>")
                    .unwrap_err(),
            }),
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        self.answer(Call {
            method: "GET",
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            body: None,
        })
        .await
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        self.answer(Call {
            method: "POST",
            path: path.to_string(),
            query: Vec::new(),
            body,
        })
        .await
    }
}

pub fn students_page(
    count: usize,
    first_rank: u64,
    total: u64,
    page: u32,
    per_page: u32,
) -> Value {
    let rows: Vec<Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "name": format!("Student {}", first_rank + i as u64),
                "points": 1000 - i as i64,
                "lessons_completed": 10,
                "is_current_user": false,
            })
        })
        .collect();
    serde_json::json!({
        "success": true,
        "leaderboard": rows,
        "current_user_rank": null,
        "total_users": total,
        "page": page,
        "per_page": per_page,
    })
}
