//! Mock 传输（用于测试，无需网络）
//!
//! 按顺序回放预设响应，并记录收到的每个请求，便于断言调用次数、方法、URL 与请求体。

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use crate::http::{ApiRequest, ApiResponse, HttpTransport, TransportError};

/// 预设的一次响应
#[derive(Debug, Clone)]
pub enum MockReply {
    /// 指定状态码 + JSON 响应体
    Json(StatusCode, Value),
    /// 指定状态码 + 原始文本响应体
    Raw(StatusCode, String),
    /// 传输层故障
    Fail(TransportError),
}

#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, reply: MockReply) -> Self {
        self.push(reply);
        self
    }

    pub fn push(&self, reply: MockReply) {
        if let Ok(mut q) = self.replies.lock() {
            q.push_back(reply);
        }
    }

    pub fn push_json(&self, status: u16, body: Value) {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.push(MockReply::Json(status, body));
    }

    pub fn push_status(&self, status: u16) {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.push(MockReply::Raw(status, String::new()));
    }

    /// 已收到的请求（按到达顺序）
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().ok().and_then(|r| r.last().cloned())
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        if let Ok(mut r) = self.requests.lock() {
            r.push(request);
        }
        let reply = self.replies.lock().ok().and_then(|mut q| q.pop_front());
        match reply {
            Some(MockReply::Json(status, body)) => Ok(ApiResponse::new(status, body.to_string())),
            Some(MockReply::Raw(status, body)) => Ok(ApiResponse::new(status, body)),
            Some(MockReply::Fail(e)) => Err(e),
            None => Err(TransportError::Request("no scripted reply".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_replays_in_order_and_records() {
        let mock = MockTransport::new();
        mock.push_json(200, json!({"a": 1}));
        mock.push_status(500);

        let first = mock.send(ApiRequest::get("http://x/1", "k")).await.unwrap();
        assert!(first.is_success());
        let second = mock.send(ApiRequest::get("http://x/2", "k")).await.unwrap();
        assert_eq!(second.status, StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(mock.call_count(), 2);
        assert_eq!(mock.last_request().unwrap().url, "http://x/2");
    }

    #[tokio::test]
    async fn test_exhausted_queue_is_transport_error() {
        let mock = MockTransport::new();
        let err = mock.send(ApiRequest::get("http://x", "k")).await.unwrap_err();
        assert!(matches!(err, TransportError::Request(_)));
    }
}
