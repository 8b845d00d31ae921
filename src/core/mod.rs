//! 核心编排层：对话状态、错误分类、状态投影、检索编排

pub mod conversation;
pub mod error;
pub mod orchestrator;
pub mod state;

pub use conversation::ConversationState;
pub use error::{ErrorKind, ErrorState, SearchError};
pub use orchestrator::{create_search_agent, Command, SearchOrchestrator};
pub use state::{SearchPhase, SearchResult, SearchState};
