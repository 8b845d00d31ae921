//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `HEARTH__*` 覆盖（双下划线表示嵌套，如 `HEARTH__API__BASE_URL=https://...`）。

use std::path::PathBuf;

use serde::Deserialize;

/// 未在配置中提供 API Key 时回退读取的环境变量
pub const API_KEY_ENV: &str = "HEARTH_API_KEY";

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub http: HttpSection,
}

/// [api] 段：服务地址、NLP 路径、凭证请求头
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_nlp_path")]
    pub nlp_path: String,
    /// 携带凭证的请求头名，NLP 与 listings 两个调用共用
    #[serde(default = "default_credential_header")]
    pub credential_header: String,
    pub api_key: Option<String>,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            nlp_path: default_nlp_path(),
            credential_header: default_credential_header(),
            api_key: None,
        }
    }
}

fn default_base_url() -> String {
    "https://api.repliers.io".to_string()
}

fn default_nlp_path() -> String {
    "/nlp".to_string()
}

fn default_credential_header() -> String {
    "REPLIERS-API-KEY".to_string()
}

/// [http] 段：传输层参数
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSection {
    /// 请求超时（秒）；未设置时沿用 HTTP 客户端默认行为
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("hearth/{}", env!("CARGO_PKG_VERSION"))
}

impl AppConfig {
    /// NLP 端点完整 URL（拼接 base_url 与 nlp_path，避免重复斜杠）
    pub fn nlp_url(&self) -> String {
        let base = self.api.base_url.trim_end_matches('/');
        let path = self.api.nlp_path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// 凭证：配置优先，其次环境变量 HEARTH_API_KEY；空白视为未设置
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api
            .api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }
}

/// 从 config 目录加载配置，环境变量 HEARTH__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 HEARTH__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("HEARTH")
            .separator("__")
            .try_parsing(true),
    );

    let c = builder.build()?;
    c.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api.base_url, "https://api.repliers.io");
        assert_eq!(cfg.api.credential_header, "REPLIERS-API-KEY");
        assert!(cfg.http.timeout_secs.is_none());
        assert!(cfg.http.user_agent.starts_with("hearth/"));
    }

    #[test]
    fn test_nlp_url_joins_without_double_slash() {
        let mut cfg = AppConfig::default();
        cfg.api.base_url = "http://localhost:8080/".to_string();
        cfg.api.nlp_path = "/nlp".to_string();
        assert_eq!(cfg.nlp_url(), "http://localhost:8080/nlp");

        cfg.api.nlp_path = "nlp".to_string();
        assert_eq!(cfg.nlp_url(), "http://localhost:8080/nlp");
    }

    #[test]
    fn test_configured_api_key_is_trimmed() {
        let mut cfg = AppConfig::default();
        cfg.api.api_key = Some("  secret  ".to_string());
        assert_eq!(cfg.resolve_api_key().as_deref(), Some("secret"));
    }

    #[test]
    fn test_blank_configured_api_key_is_absent() {
        let mut cfg = AppConfig::default();
        cfg.api.api_key = Some("   ".to_string());
        assert!(cfg.resolve_api_key().is_none());
    }
}
