//! Hearth - 对话式房源自然语言检索
//!
//! 模块划分：
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: 对话状态、错误分类、状态投影、检索编排
//! - **http**: HTTP 传输抽象与实现（reqwest / Mock）
//! - **listings**: 查询执行（GET / POST 选择、字段选择参数、结果归一）
//! - **nlp**: 提示词翻译（NLP 端点、conversation id 传递）
//! - **observability**: 日志初始化

pub mod config;
pub mod core;
pub mod http;
pub mod listings;
pub mod nlp;
pub mod observability;

pub use crate::core::{
    create_search_agent, Command, ErrorKind, ErrorState, SearchError, SearchOrchestrator,
    SearchPhase, SearchResult, SearchState,
};
