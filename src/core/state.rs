//! 状态定义：检索阶段、结果与快照
//!
//! Orchestrator 维护完整状态，对外投影为轻量的 SearchState，供 UI / CLI 渲染。

use serde::Serialize;

use crate::core::ErrorState;
use crate::listings::Listing;

/// 流水线阶段
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SearchPhase {
    Idle,
    Translating,
    Executing,
    Succeeded,
    Failed,
}

impl SearchPhase {
    pub fn is_settled(&self) -> bool {
        matches!(self, SearchPhase::Succeeded | SearchPhase::Failed)
    }
}

/// 一次成功运行的结果；下一次成功运行整体替换，不合并
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub listings: Vec<Listing>,
    pub summary: String,
    pub conversation_id: String,
    pub count: usize,
}

/// 投影给调用方的快照
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    pub phase: SearchPhase,
    pub conversation_id: Option<String>,
    pub result: Option<SearchResult>,
    pub error: Option<ErrorState>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            phase: SearchPhase::Idle,
            conversation_id: None,
            result: None,
            error: None,
        }
    }
}
