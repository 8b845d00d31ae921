//! Hearth - 对话式房源自然语言检索
//!
//! 入口：初始化日志、加载配置、创建检索任务，并从标准输入逐行读取提示词。
//! 命令：`/reset` 开始新对话，`/key <API_KEY>` 设置凭证，`/quit` 退出。

use std::sync::Arc;

use anyhow::Context;
use hearth::config::load_config;
use hearth::http::ReqwestTransport;
use hearth::{create_search_agent, Command, SearchOrchestrator, SearchPhase, SearchState};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    hearth::observability::init();

    let config_path = std::env::args().nth(1).map(std::path::PathBuf::from);
    let cfg = load_config(config_path).context("Failed to load config")?;
    let transport = ReqwestTransport::new(&cfg).context("Failed to create HTTP client")?;

    let orchestrator = SearchOrchestrator::from_config(&cfg, Arc::new(transport));
    if cfg.resolve_api_key().is_none() {
        tracing::warn!("No API key configured; use /key <API_KEY> before searching");
    }

    let (cmd_tx, mut state_rx) = create_search_agent(orchestrator);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Describe the home you're looking for (/reset, /key <API_KEY>, /quit).");
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let prompt = match parse_line(&line) {
            ReplInput::Quit => break,
            ReplInput::Reset => {
                cmd_tx.send(Command::Reset).context("Search task stopped")?;
                println!("Started a new conversation.");
                continue;
            }
            ReplInput::Key(key) => {
                cmd_tx
                    .send(Command::SetCredential(key))
                    .context("Search task stopped")?;
                continue;
            }
            ReplInput::Prompt(prompt) => prompt,
        };

        // 单飞：等本次运行落定后再读下一行
        cmd_tx
            .send(Command::Submit(prompt.to_string()))
            .context("Search task stopped")?;
        loop {
            state_rx.changed().await.context("Search task stopped")?;
            if state_rx.borrow_and_update().phase.is_settled() {
                break;
            }
        }
        let state = state_rx.borrow().clone();
        print_state(&state);
    }

    let _ = cmd_tx.send(Command::Quit);
    Ok(())
}

/// 一行输入：命令按去除首尾空白后整词匹配，其余原样作为提示词
#[derive(Debug, PartialEq, Eq)]
enum ReplInput<'a> {
    Quit,
    Reset,
    Key(Option<String>),
    Prompt(&'a str),
}

fn parse_line(line: &str) -> ReplInput<'_> {
    let trimmed = line.trim();
    match trimmed {
        "/quit" => return ReplInput::Quit,
        "/reset" => return ReplInput::Reset,
        "/key" => return ReplInput::Key(None),
        _ => {}
    }
    match trimmed.split_once(char::is_whitespace) {
        Some(("/key", key)) => {
            let key = key.trim();
            ReplInput::Key((!key.is_empty()).then(|| key.to_string()))
        }
        _ => ReplInput::Prompt(line),
    }
}

fn print_state(state: &SearchState) {
    match (state.phase, &state.result, &state.error) {
        (SearchPhase::Succeeded, Some(result), _) => {
            println!("{} ({} listings)", result.summary, result.count);
            println!("conversation: {}", result.conversation_id);
        }
        (_, _, Some(error)) => println!("error: {}", error.message),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_line("/quit"), ReplInput::Quit);
        assert_eq!(parse_line("  /reset "), ReplInput::Reset);
        assert_eq!(parse_line("/key"), ReplInput::Key(None));
        assert_eq!(
            parse_line("/key  abc123 "),
            ReplInput::Key(Some("abc123".to_string()))
        );
    }

    #[test]
    fn test_key_prefix_is_not_a_command() {
        assert_eq!(parse_line("/keyboard"), ReplInput::Prompt("/keyboard"));
        assert_eq!(parse_line("/keys abc"), ReplInput::Prompt("/keys abc"));
    }

    #[test]
    fn test_prompt_passes_through_untrimmed() {
        assert_eq!(
            parse_line(" condo in Toronto "),
            ReplInput::Prompt(" condo in Toronto ")
        );
    }
}
