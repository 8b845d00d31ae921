//! 房源记录：不透明，核心只计数与转发，不读取字段

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Listing(Value);

impl Listing {
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// listings 端点响应；listings 缺失或为 null 时视为空序列
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingsResponse {
    #[serde(default)]
    listings: Option<Vec<Listing>>,
}

impl ListingsResponse {
    pub fn into_listings(self) -> Vec<Listing> {
        self.listings.unwrap_or_default()
    }
}
