//! Mock implementation of the remote feed API
//!
//! Replies are scripted per method. The last scripted reply for a method is
//! sticky, so a single `with_result` answers every call. A held mock parks
//! each call until the test releases it, which keeps a fetch in flight.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};
use tokio::sync::{Notify, Semaphore};

use crate::domain::ports::RemoteFeedApi;
use crate::error::RpcError;

/// A scripted reply
#[derive(Debug, Clone)]
pub enum MockReply {
    Result(Value),
    /// Both endpoints failed with this status
    Transport(u16),
    /// Envelope without a `result` member
    MissingResult,
}

impl MockReply {
    fn into_result(self, method: &str) -> Result<Value, RpcError> {
        match self {
            MockReply::Result(value) => Ok(value),
            MockReply::Transport(status) => Err(RpcError::Transport {
                status: Some(status),
                message: format!("API request failed with status {}", status),
            }),
            MockReply::MissingResult => Err(RpcError::MalformedResponse(format!(
                "{}: missing result",
                method
            ))),
        }
    }
}

#[derive(Default)]
pub struct MockFeedApi {
    replies: Arc<RwLock<HashMap<String, VecDeque<MockReply>>>>,
    calls: Arc<RwLock<Vec<(String, Value)>>>,
    gate: Option<Arc<Semaphore>>,
    started: Arc<Notify>,
}

impl MockFeedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park every call until `release` is invoked
    pub fn held(mut self) -> Self {
        self.gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    /// Queue a reply for `method`
    pub fn with_reply(self, method: &str, reply: MockReply) -> Self {
        self.push_reply(method, reply);
        self
    }

    pub fn with_result(self, method: &str, result: Value) -> Self {
        self.with_reply(method, MockReply::Result(result))
    }

    /// Queue a reply after construction (e.g. between page fetches)
    pub fn push_reply(&self, method: &str, reply: MockReply) {
        self.replies
            .write()
            .unwrap()
            .entry(method.to_string())
            .or_default()
            .push_back(reply);
    }

    /// Drop all queued replies for `method` and script a new one
    pub fn replace_reply(&self, method: &str, reply: MockReply) {
        let mut replies = self.replies.write().unwrap();
        let queue = replies.entry(method.to_string()).or_default();
        queue.clear();
        queue.push_back(reply);
    }

    /// Let one parked call complete
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    /// Wait until a call has reached the mock
    pub async fn wait_for_call(&self) {
        self.started.notified().await;
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    fn next_reply(&self, method: &str) -> MockReply {
        let mut replies = self.replies.write().unwrap();
        match replies.get_mut(method) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if queue.len() == 1 => queue[0].clone(),
            _ => MockReply::Result(json!([])),
        }
    }
}

#[async_trait]
impl RemoteFeedApi for MockFeedApi {
    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        self.calls
            .write()
            .unwrap()
            .push((method.to_string(), params));
        let reply = self.next_reply(method);
        self.started.notify_one();

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        reply.into_result(method)
    }
}
