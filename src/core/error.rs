//! 检索错误类型与面向用户的错误状态
//!
//! 两个远端服务（NLP 翻译、listings 执行）的失败统一归入 SearchError；
//! ErrorState 是投影给调用方的 { kind, message }，NetworkFailure 不泄露传输细节。

use serde::Serialize;
use thiserror::Error;

use crate::http::TransportError;

/// 一次检索流水线可能出现的错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// 空白提示词或缺少凭证；本地判定，不触网
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// NLP 端点返回 406：提示词与房源检索无关
    #[error("Prompt is unrelated to property search")]
    DomainIrrelevant,

    #[error("Translation failed: HTTP {status}")]
    TranslationFailed { status: u16 },

    #[error("Execution failed: HTTP {status}")]
    ExecutionFailed { status: u16 },

    #[error("Network failure: {0}")]
    NetworkFailure(String),
}

impl From<TransportError> for SearchError {
    fn from(e: TransportError) -> Self {
        SearchError::NetworkFailure(e.to_string())
    }
}

/// 错误种类（无负载，便于匹配与序列化）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    ValidationFailed,
    DomainIrrelevant,
    TranslationFailed,
    ExecutionFailed,
    NetworkFailure,
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::ValidationFailed(_) => ErrorKind::ValidationFailed,
            SearchError::DomainIrrelevant => ErrorKind::DomainIrrelevant,
            SearchError::TranslationFailed { .. } => ErrorKind::TranslationFailed,
            SearchError::ExecutionFailed { .. } => ErrorKind::ExecutionFailed,
            SearchError::NetworkFailure(_) => ErrorKind::NetworkFailure,
        }
    }

    /// 面向用户的提示文本
    pub fn user_message(&self) -> String {
        match self {
            SearchError::ValidationFailed(reason) => reason.clone(),
            SearchError::DomainIrrelevant => "That doesn't look like a property search. \
                Try describing the home you want, e.g. \"3 bedroom condo in Toronto under $800k\"."
                .to_string(),
            SearchError::TranslationFailed { status } => {
                format!("Could not interpret the request (HTTP {status}). Please try again.")
            }
            SearchError::ExecutionFailed { status } => {
                format!("Could not fetch listings (HTTP {status}). Please try again.")
            }
            SearchError::NetworkFailure(_) => {
                "Something went wrong while searching. Please try again.".to_string()
            }
        }
    }
}

/// 调用方看到的错误状态，与 SearchResult 对同一次运行互斥
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorState {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&SearchError> for ErrorState {
    fn from(e: &SearchError) -> Self {
        Self {
            kind: e.kind(),
            message: e.user_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_becomes_network_failure() {
        let err: SearchError = TransportError::Request("connection refused".to_string()).into();
        assert_eq!(err.kind(), ErrorKind::NetworkFailure);
    }

    #[test]
    fn test_network_failure_message_hides_details() {
        let err = SearchError::NetworkFailure("dns error: api.internal".to_string());
        let state = ErrorState::from(&err);
        assert_eq!(state.kind, ErrorKind::NetworkFailure);
        assert!(!state.message.contains("dns"));
        assert!(state.message.contains("try again"));
    }

    #[test]
    fn test_domain_irrelevant_suggests_rephrasing() {
        let state = ErrorState::from(&SearchError::DomainIrrelevant);
        assert_eq!(state.kind, ErrorKind::DomainIrrelevant);
        assert!(state.message.contains("property search"));
    }

    #[test]
    fn test_status_is_kept_in_kind_mapping() {
        assert_eq!(
            SearchError::TranslationFailed { status: 502 }.kind(),
            ErrorKind::TranslationFailed
        );
        assert_eq!(
            SearchError::ExecutionFailed { status: 500 }.kind(),
            ErrorKind::ExecutionFailed
        );
    }
}
