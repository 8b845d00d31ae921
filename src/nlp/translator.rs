//! 查询翻译器
//!
//! POST {prompt, conversationId?} 到 NLP 端点；按状态码分类：
//! 406 -> DomainIrrelevant，其它非 2xx -> TranslationFailed，成功 -> 解析描述与新 conversation id。
//! 单次往返，不重试；不触碰对话状态（由 Orchestrator 写入）。

use std::sync::Arc;

use reqwest::StatusCode;

use crate::core::SearchError;
use crate::http::{ApiRequest, HttpTransport};
use crate::nlp::{NlpRequest, NlpResponse, Translation};

pub struct QueryTranslator {
    transport: Arc<dyn HttpTransport>,
    endpoint: String,
}

impl QueryTranslator {
    pub fn new(transport: Arc<dyn HttpTransport>, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 前置条件：prompt 非空白（由调用方校验）
    pub async fn translate(
        &self,
        api_key: &str,
        prompt: &str,
        conversation_id: Option<&str>,
    ) -> Result<Translation, SearchError> {
        let body = serde_json::to_value(NlpRequest {
            prompt,
            conversation_id,
        })
        .map_err(|e| SearchError::NetworkFailure(e.to_string()))?;

        tracing::debug!(
            endpoint = %self.endpoint,
            has_conversation = conversation_id.is_some(),
            "nlp translate request"
        );
        let resp = self
            .transport
            .send(ApiRequest::post(&self.endpoint, api_key, body))
            .await?;

        if resp.status == StatusCode::NOT_ACCEPTABLE {
            tracing::info!("nlp rejected prompt as unrelated to property search");
            return Err(SearchError::DomainIrrelevant);
        }
        if !resp.is_success() {
            tracing::warn!(status = resp.status.as_u16(), "nlp translate failed");
            return Err(SearchError::TranslationFailed {
                status: resp.status.as_u16(),
            });
        }

        let parsed: NlpResponse = resp.json()?;
        tracing::info!(
            conversation_id = %parsed.conversation_id,
            url = %parsed.request.url,
            "nlp translate ok"
        );
        Ok(parsed.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{MockReply, MockTransport, TransportError};
    use reqwest::Method;
    use serde_json::json;

    fn translator(mock: &Arc<MockTransport>) -> QueryTranslator {
        QueryTranslator::new(mock.clone(), "https://api.test/nlp")
    }

    fn ok_body(id: &str) -> serde_json::Value {
        json!({
            "conversationId": id,
            "summary": "3bd condos in Toronto",
            "request": {"url": "https://x/listings?city=Toronto&beds=3"}
        })
    }

    #[tokio::test]
    async fn test_first_turn_sends_prompt_only() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(200, ok_body("abc"));

        let nlp = translator(&mock);
        let t = nlp
            .translate("key", "3 bedroom condo in Toronto", None)
            .await
            .unwrap();
        assert_eq!(t.conversation_id, "abc");
        assert_eq!(t.summary, "3bd condos in Toronto");

        let req = mock.last_request().unwrap();
        assert_eq!(req.method, Method::POST);
        assert_eq!(nlp.endpoint(), "https://api.test/nlp");
        assert_eq!(req.url, nlp.endpoint());
        assert_eq!(req.api_key, "key");
        assert_eq!(req.body, Some(json!({"prompt": "3 bedroom condo in Toronto"})));
    }

    #[tokio::test]
    async fn test_follow_up_carries_conversation_id() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(200, ok_body("def"));

        translator(&mock)
            .translate("key", "under $800k", Some("abc"))
            .await
            .unwrap();
        let req = mock.last_request().unwrap();
        assert_eq!(
            req.body,
            Some(json!({"prompt": "under $800k", "conversationId": "abc"}))
        );
    }

    #[tokio::test]
    async fn test_406_is_domain_irrelevant() {
        let mock = Arc::new(MockTransport::new());
        mock.push_status(406);
        let err = translator(&mock)
            .translate("key", "what's the weather", None)
            .await
            .unwrap_err();
        assert_eq!(err, SearchError::DomainIrrelevant);
    }

    #[tokio::test]
    async fn test_other_status_is_translation_failed() {
        let mock = Arc::new(MockTransport::new());
        mock.push_status(503);
        let err = translator(&mock).translate("key", "condo", None).await.unwrap_err();
        assert_eq!(err, SearchError::TranslationFailed { status: 503 });
    }

    #[tokio::test]
    async fn test_transport_fault_is_network_failure() {
        let mock = Arc::new(MockTransport::new().with_reply(MockReply::Fail(
            TransportError::Request("connection reset".to_string()),
        )));
        let err = translator(&mock).translate("key", "condo", None).await.unwrap_err();
        assert!(matches!(err, SearchError::NetworkFailure(_)));
    }

    #[tokio::test]
    async fn test_undecodable_success_body_is_network_failure() {
        let mock = Arc::new(MockTransport::new().with_reply(MockReply::Raw(
            StatusCode::OK,
            "<html>gateway</html>".to_string(),
        )));
        let err = translator(&mock).translate("key", "condo", None).await.unwrap_err();
        assert!(matches!(err, SearchError::NetworkFailure(_)));
        assert_eq!(mock.call_count(), 1);
    }
}
