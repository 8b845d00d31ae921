//! 对话上下文：当前 conversation id
//!
//! 仅由成功的翻译写入（整体替换，不合并），reset 清空；归属单个 Orchestrator。

#[derive(Clone, Debug, Default)]
pub struct ConversationState {
    id: Option<String>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn clear(&mut self) {
        self.id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_until_set() {
        let mut state = ConversationState::new();
        assert!(state.current().is_none());
        state.set("abc");
        assert_eq!(state.current(), Some("abc"));
    }

    #[test]
    fn test_set_replaces_and_clear_empties() {
        let mut state = ConversationState::new();
        state.set("abc");
        state.set("xyz");
        assert_eq!(state.current(), Some("xyz"));
        state.clear();
        assert!(state.current().is_none());
    }
}
