//! 检索编排器：主控流水线
//!
//! 负责：校验输入与凭证、依次调用 Translator -> Executor、维护对话 id 与最近一次结果/错误。
//! 翻译成功即写入新的 conversation id，之后执行失败也不回滚。
//! create_search_agent 把编排器交给后台任务独占，按命令逐条处理（单飞）。

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::Instrument;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::core::{ConversationState, ErrorState, SearchError, SearchPhase, SearchResult, SearchState};
use crate::http::HttpTransport;
use crate::listings::QueryExecutor;
use crate::nlp::QueryTranslator;

/// 从前端发往检索任务的命令
#[derive(Debug, Clone)]
pub enum Command {
    /// 提交提示词，触发一次流水线
    Submit(String),
    /// 设置或清除 API 凭证
    SetCredential(Option<String>),
    /// 清空对话 id 与结果/错误
    Reset,
    /// 退出任务
    Quit,
}

pub struct SearchOrchestrator {
    translator: QueryTranslator,
    executor: QueryExecutor,
    credential: Option<String>,
    conversation: ConversationState,
    phase: SearchPhase,
    result: Option<SearchResult>,
    error: Option<ErrorState>,
}

impl SearchOrchestrator {
    pub fn new(translator: QueryTranslator, executor: QueryExecutor) -> Self {
        Self {
            translator,
            executor,
            credential: None,
            conversation: ConversationState::new(),
            phase: SearchPhase::Idle,
            result: None,
            error: None,
        }
    }

    /// 按配置组装：NLP 与 listings 共用同一传输，凭证取自配置 / 环境变量
    pub fn from_config(cfg: &AppConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let translator = QueryTranslator::new(transport.clone(), cfg.nlp_url());
        let executor = QueryExecutor::new(transport);
        let mut orchestrator = Self::new(translator, executor);
        orchestrator.set_credential(cfg.resolve_api_key());
        orchestrator
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }

    pub fn set_credential(&mut self, credential: Option<String>) {
        self.credential = credential;
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation.current()
    }

    pub fn result(&self) -> Option<&SearchResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&ErrorState> {
        self.error.as_ref()
    }

    pub fn snapshot(&self) -> SearchState {
        SearchState {
            phase: self.phase,
            conversation_id: self.conversation.current().map(String::from),
            result: self.result.clone(),
            error: self.error.clone(),
        }
    }

    /// 执行一次检索。成功时替换当前结果并清除错误；失败时记录错误，保留上一次结果
    pub async fn search(&mut self, prompt: &str) -> Result<SearchResult, SearchError> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("search", %run_id);
        let outcome = self.run_pipeline(prompt).instrument(span).await;

        match &outcome {
            Ok(result) => {
                self.phase = SearchPhase::Succeeded;
                self.result = Some(result.clone());
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(%run_id, kind = ?e.kind(), error = %e, "search failed");
                self.phase = SearchPhase::Failed;
                self.error = Some(ErrorState::from(e));
            }
        }
        outcome
    }

    /// 任意状态回到 Idle，清空对话 id 与结果/错误
    pub fn reset(&mut self) {
        self.conversation.clear();
        self.result = None;
        self.error = None;
        self.phase = SearchPhase::Idle;
        tracing::info!("search state reset");
    }

    async fn run_pipeline(&mut self, prompt: &str) -> Result<SearchResult, SearchError> {
        self.phase = SearchPhase::Translating;

        if prompt.trim().is_empty() {
            return Err(SearchError::ValidationFailed(
                "Please enter a search prompt.".to_string(),
            ));
        }
        let api_key = match self.credential.as_deref().map(str::trim) {
            Some(k) if !k.is_empty() => k.to_string(),
            _ => {
                return Err(SearchError::ValidationFailed(
                    "An API key is required before searching.".to_string(),
                ))
            }
        };

        let translation = self
            .translator
            .translate(&api_key, prompt, self.conversation.current())
            .await?;
        self.conversation.set(translation.conversation_id.clone());

        self.phase = SearchPhase::Executing;
        let listings = self.executor.execute(&api_key, translation.descriptor).await?;

        Ok(SearchResult {
            count: listings.len(),
            listings,
            summary: translation.summary,
            conversation_id: translation.conversation_id,
        })
    }
}

/// 创建检索任务：返回命令发送端与状态接收端；后台任务独占编排器，命令逐条串行处理。
pub fn create_search_agent(
    mut orchestrator: SearchOrchestrator,
) -> (mpsc::UnboundedSender<Command>, watch::Receiver<SearchState>) {
    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<Command>();
    let (state_tx, state_rx) = watch::channel(orchestrator.snapshot());

    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                Command::Submit(prompt) => {
                    // 先投影 Translating，再跑流水线
                    let mut pending = orchestrator.snapshot();
                    pending.phase = SearchPhase::Translating;
                    let _ = state_tx.send(pending);

                    let _ = orchestrator.search(&prompt).await;
                    let _ = state_tx.send(orchestrator.snapshot());
                }
                Command::SetCredential(credential) => {
                    orchestrator.set_credential(credential);
                }
                Command::Reset => {
                    orchestrator.reset();
                    let _ = state_tx.send(orchestrator.snapshot());
                }
                Command::Quit => break,
            }
        }
        tracing::debug!("search agent stopped");
    });

    (cmd_tx, state_rx)
}
