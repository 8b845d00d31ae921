//! NLP 翻译层：自然语言提示词 -> 结构化查询描述

pub mod translator;
pub mod types;

pub use translator::QueryTranslator;
pub use types::{NlpRequest, NlpResponse, QueryDescriptor, Translation};
