//! 基于 reqwest 的 HTTP 传输
//!
//! 单个 Client 复用连接；凭证放入配置的请求头；仅当请求带 body 时发送 JSON。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderName;
use reqwest::Client;

use crate::config::AppConfig;
use crate::http::{ApiRequest, ApiResponse, HttpTransport, TransportError};

pub struct ReqwestTransport {
    client: Client,
    credential_header: HeaderName,
}

impl ReqwestTransport {
    pub fn new(cfg: &AppConfig) -> Result<Self, TransportError> {
        let credential_header = HeaderName::from_bytes(cfg.api.credential_header.as_bytes())
            .map_err(|e| TransportError::Setup(format!("invalid credential header: {}", e)))?;

        let mut builder = Client::builder().user_agent(cfg.http.user_agent.clone());
        if let Some(secs) = cfg.http.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Setup(e.to_string()))?;

        Ok(Self {
            client,
            credential_header,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .header(self.credential_header.clone(), request.api_key);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_header_name() {
        let mut cfg = AppConfig::default();
        cfg.api.credential_header = "bad header\n".to_string();
        assert!(matches!(
            ReqwestTransport::new(&cfg),
            Err(TransportError::Setup(_))
        ));
    }

    #[test]
    fn test_builds_with_defaults() {
        assert!(ReqwestTransport::new(&AppConfig::default()).is_ok());
    }
}
