//! HTTP 传输抽象
//!
//! Translator 与 Executor 只通过 HttpTransport 发请求；真实实现走 reqwest，测试用 MockTransport。

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// 传输层故障（连接失败、读取响应失败、响应体无法解析等）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Read body: {0}")]
    Body(String),

    #[error("Decode response: {0}")]
    Decode(String),

    #[error("Client setup: {0}")]
    Setup(String),
}

/// 一次出站请求；api_key 由传输层放进配置的凭证请求头
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub api_key: String,
    /// 仅 POST 携带，序列化为 JSON
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            api_key: api_key.into(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, api_key: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            api_key: api_key.into(),
            body: Some(body),
        }
    }
}

/// 原始响应：状态码 + 响应体文本，由调用方按状态分类后再解析
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TransportError> {
        serde_json::from_str(&self.body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

/// 传输 trait：一次请求对应一次往返，不做重试
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}
