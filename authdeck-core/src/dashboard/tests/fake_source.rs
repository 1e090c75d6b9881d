use crate::api::{ApiError, LogSource};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

type Reply = (Duration, Result<Vec<Value>, ApiError>);

/// Answers each fetch with the next scripted reply, after its delay.
/// An exhausted script answers with no records.
#[derive(Default)]
pub struct ScriptedSource {
    replies: Mutex<VecDeque<Reply>>,
    fetches: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LogSource for ScriptedSource {
    async fn fetch_logs(&self) -> Result<Vec<Value>, ApiError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let reply = self.replies.lock().unwrap().pop_front();

        match reply {
            Some((delay, result)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                result
            }
            None => Ok(Vec::new()),
        }
    }
}

pub fn record(server: u32, status: u16) -> Value {
    json!({
        "server": server,
        "status": status,
        "method": "GET",
        "responseTime": 120,
        "timestamp": "2024-03-01T10:00:00Z"
    })
}

pub fn now(result: Result<Vec<Value>, ApiError>) -> Reply {
    (Duration::ZERO, result)
}

pub fn transport_like() -> ApiError {
    ApiError::Status {
        endpoint: "/getServer".to_string(),
        status: 503,
        message: "Service Unavailable".to_string(),
    }
}
