//! 查询执行器
//!
//! URL 无条件追加全字段选择参数（已有 `?` 用 `&`，否则用 `?`）；
//! body 为非空对象时 POST（JSON），否则 GET 不带 body；非 2xx -> ExecutionFailed。

use std::sync::Arc;

use reqwest::Method;

use crate::core::SearchError;
use crate::http::{ApiRequest, HttpTransport};
use crate::listings::{Listing, ListingsResponse};
use crate::nlp::QueryDescriptor;

/// 全字段选择参数
pub const FULL_FIELD_SELECTION: &str = "select=*";

pub fn augment_url(url: &str) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", url, sep, FULL_FIELD_SELECTION)
}

/// body 为非空 JSON 对象 -> POST，其余（缺失、空对象、非对象）-> GET
pub fn select_method(descriptor: &QueryDescriptor) -> Method {
    match &descriptor.body {
        Some(serde_json::Value::Object(map)) if !map.is_empty() => Method::POST,
        _ => Method::GET,
    }
}

pub struct QueryExecutor {
    transport: Arc<dyn HttpTransport>,
}

impl QueryExecutor {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    pub async fn execute(
        &self,
        api_key: &str,
        descriptor: QueryDescriptor,
    ) -> Result<Vec<Listing>, SearchError> {
        let url = augment_url(&descriptor.url);
        let method = select_method(&descriptor);
        tracing::info!(method = %method, url = %url, "listings request");

        let request = match descriptor.body {
            Some(body) if method == Method::POST => ApiRequest::post(url, api_key, body),
            _ => ApiRequest::get(url, api_key),
        };
        let resp = self.transport.send(request).await?;

        if !resp.is_success() {
            tracing::warn!(status = resp.status.as_u16(), "listings request failed");
            return Err(SearchError::ExecutionFailed {
                status: resp.status.as_u16(),
            });
        }

        let listings = resp.json::<ListingsResponse>()?.into_listings();
        tracing::info!(count = listings.len(), "listings fetched");
        Ok(listings)
    }
}
