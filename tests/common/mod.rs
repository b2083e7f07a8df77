//! Recording mock transport shared by the integration tests.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use hostup_reseller::error::{Error, Result};
use hostup_reseller::transport::{Method, Transport};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub payload: Option<Value>,
}

/// Transport double: records every call and replies with queued `data`
/// payloads keyed by `"METHOD /path"`. A key's last queued response is
/// repeated once the queue drains; unknown keys answer an empty object.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<String, VecDeque<Value>>>,
    failures: Mutex<HashMap<String, String>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: &str, path: &str, data: Value) {
        self.responses
            .lock()
            .unwrap()
            .entry(format!("{method} {path}"))
            .or_default()
            .push_back(data);
    }

    pub fn fail(&self, method: &str, path: &str, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(format!("{method} {path}"), message.to_string());
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_matching(&self, method: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.method == method)
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn call(
        &self,
        method: Method,
        path: &str,
        payload: Option<Value>,
        _query: &[(&str, String)],
    ) -> Result<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: method.to_string(),
            path: path.to_string(),
            payload,
        });

        let key = format!("{method} {path}");

        if let Some(message) = self.failures.lock().unwrap().get(&key) {
            return Err(Error::Api {
                message: message.clone(),
                status: Some(422),
            });
        }

        let mut responses = self.responses.lock().unwrap();
        if let Some(queue) = responses.get_mut(&key) {
            if queue.len() > 1 {
                if let Some(data) = queue.pop_front() {
                    return Ok(data);
                }
            }
            if let Some(data) = queue.front() {
                return Ok(data.clone());
            }
        }

        Ok(Value::Object(Default::default()))
    }
}
