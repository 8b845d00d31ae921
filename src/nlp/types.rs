//! NLP 端点的请求/响应结构
//!
//! 请求中的 conversationId 仅在存在时序列化（缺省即省略，而非 null）。

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NlpRequest<'a> {
    pub prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<&'a str>,
}

/// 翻译结果中的查询描述：listings URL 与可选 body（决定 GET / POST）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl QueryDescriptor {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NlpResponse {
    pub conversation_id: String,
    #[serde(default)]
    pub summary: String,
    pub request: QueryDescriptor,
}

/// 一次成功翻译的产出
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub descriptor: QueryDescriptor,
    pub summary: String,
    pub conversation_id: String,
}

impl From<NlpResponse> for Translation {
    fn from(r: NlpResponse) -> Self {
        Self {
            descriptor: r.request,
            summary: r.summary,
            conversation_id: r.conversation_id,
        }
    }
}
