use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE_PATH: &str = "ecommerce.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub bind_addr: String,
    pub index_path: Option<PathBuf>,
    pub static_dir: Option<PathBuf>,
    pub log_level: String,
    pub llm: LlmConfig,
    /// Keys present in the YAML file but not understood. Filled by
    /// [`parse_config`] in lenient mode; logged once a subscriber is up.
    #[serde(skip)]
    pub unknown_fields: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            index_path: None,
            static_dir: None,
            log_level: "info".to_string(),
            llm: LlmConfig::default(),
            unknown_fields: Vec::new(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// "gemini" or "fake"
    pub provider: String,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub timeout_ms: u64,
    /// Statement the fake provider answers every question with.
    pub fake_sql: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            temperature: 0.1,
            max_output_tokens: 100,
            timeout_ms: 30_000,
            fake_sql: "SELECT COUNT(*) FROM eligibility".to_string(),
        }
    }
}

// Keeps the credential out of logs.
impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("timeout_ms", &self.timeout_ms)
            .field("fake_sql", &self.fake_sql)
            .finish()
    }
}

pub fn load_config(path: &Path, strict: bool) -> Result<AppConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError(format!("failed to read config {}: {}", path.display(), e)))?;
    parse_config(&raw, strict)
        .map_err(|e| ConfigError(format!("{} (file: {})", e.0, path.display())))
}

pub fn parse_config(raw: &str, strict: bool) -> Result<AppConfig, ConfigError> {
    let mut ignored_keys = BTreeSet::new();
    let deserializer = serde_yaml::Deserializer::from_str(raw);

    let mut cfg: AppConfig = serde_ignored::deserialize(deserializer, |path| {
        ignored_keys.insert(path.to_string());
    })
    .map_err(|e| ConfigError(format!("failed to parse YAML: {}", e)))?;

    if !ignored_keys.is_empty() {
        if strict {
            return Err(ConfigError(format!(
                "Unknown fields detected in strict mode: {:?}",
                ignored_keys
            )));
        }
        cfg.unknown_fields = ignored_keys.into_iter().collect();
    }

    Ok(cfg)
}

impl AppConfig {
    /// Defaults, then the optional YAML file, then the process environment.
    pub fn resolve(path: Option<&Path>, strict: bool) -> Result<Self, ConfigError> {
        let mut cfg = match path {
            Some(p) => load_config(p, strict)?,
            None => Self::default(),
        };
        cfg.apply_env_from(|key| std::env::var(key).ok())?;
        Ok(cfg)
    }

    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("SQLASK_DB_PATH") {
            self.database_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("SQLASK_BIND") {
            self.bind_addr = v;
        }
        if let Some(v) = lookup("SQLASK_INDEX_PATH") {
            self.index_path = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("SQLASK_STATIC_DIR") {
            self.static_dir = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("SQLASK_LOG") {
            self.log_level = v;
        }
        if let Some(v) = lookup("SQLASK_LLM_PROVIDER") {
            self.llm.provider = v;
        }
        if let Some(v) = lookup("GEMINI_API_KEY") {
            if !v.trim().is_empty() {
                self.llm.api_key = Some(v);
            }
        }
        if let Some(v) = lookup("SQLASK_GEMINI_MODEL") {
            self.llm.model = v;
        }
        if let Some(v) = lookup("SQLASK_GEMINI_BASE_URL") {
            self.llm.base_url = v;
        }
        if let Some(v) = lookup("SQLASK_LLM_TIMEOUT_MS") {
            self.llm.timeout_ms = v.parse().map_err(|_| {
                ConfigError(format!("SQLASK_LLM_TIMEOUT_MS must be an integer, got {v:?}"))
            })?;
        }
        if let Some(v) = lookup("SQLASK_FAKE_SQL") {
            self.llm.fake_sql = v;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.llm.provider.as_str() {
            "gemini" => {
                let has_key = self
                    .llm
                    .api_key
                    .as_deref()
                    .is_some_and(|k| !k.trim().is_empty());
                if !has_key {
                    return Err(ConfigError(
                        "API key is empty: set GEMINI_API_KEY or llm.api_key".into(),
                    ));
                }
            }
            "fake" => {}
            other => {
                return Err(ConfigError(format!(
                    "unknown llm provider '{}' (supported: gemini, fake)",
                    other
                )))
            }
        }
        if self.llm.timeout_ms == 0 {
            return Err(ConfigError("llm.timeout_ms must be greater than 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_fixture_layout() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.database_path, PathBuf::from("ecommerce.db"));
        assert_eq!(cfg.llm.model, "gemini-1.5-flash");
        assert_eq!(cfg.llm.max_output_tokens, 100);
        assert!(cfg.llm.api_key.is_none());
    }

    #[test]
    fn yaml_overrides_only_given_fields() {
        let cfg = parse_config(
            r#"
database_path: /tmp/shop.db
llm:
  provider: fake
  timeout_ms: 500
"#,
            true,
        )
        .unwrap();
        assert_eq!(cfg.database_path, PathBuf::from("/tmp/shop.db"));
        assert_eq!(cfg.llm.provider, "fake");
        assert_eq!(cfg.llm.timeout_ms, 500);
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR);
    }

    #[test]
    fn strict_mode_rejects_unknown_keys() {
        let err = parse_config("database_pth: x.db\n", true).unwrap_err();
        assert!(err.0.contains("database_pth"), "{}", err);

        let cfg = parse_config("database_pth: x.db\n", false).unwrap();
        assert_eq!(cfg.database_path, PathBuf::from(DEFAULT_DATABASE_PATH));
    }

    #[test]
    fn lenient_mode_reports_unknown_keys() {
        let cfg = parse_config(
            r#"
database_pth: x.db
llm:
  provider: fake
  temprature: 0.5
"#,
            false,
        )
        .unwrap();
        assert_eq!(cfg.unknown_fields, vec!["database_pth", "llm.temprature"]);
        assert_eq!(cfg.llm.provider, "fake");

        let clean = parse_config("bind_addr: 0.0.0.0:9000\n", false).unwrap();
        assert!(clean.unknown_fields.is_empty());
    }

    #[test]
    fn env_overrides_yaml() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("GEMINI_API_KEY", "k-123"),
            ("SQLASK_LLM_TIMEOUT_MS", "1500"),
            ("SQLASK_DB_PATH", "other.db"),
        ]);
        let mut cfg = AppConfig::default();
        cfg.apply_env_from(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(cfg.llm.api_key.as_deref(), Some("k-123"));
        assert_eq!(cfg.llm.timeout_ms, 1500);
        assert_eq!(cfg.database_path, PathBuf::from("other.db"));
        cfg.validate().unwrap();
    }

    #[test]
    fn bad_timeout_is_config_error() {
        let mut cfg = AppConfig::default();
        let err = cfg
            .apply_env_from(|k| (k == "SQLASK_LLM_TIMEOUT_MS").then(|| "soon".to_string()))
            .unwrap_err();
        assert!(err.0.contains("SQLASK_LLM_TIMEOUT_MS"));
    }

    #[test]
    fn gemini_requires_key() {
        let cfg = AppConfig::default();
        assert!(cfg.validate().is_err());

        let mut fake = AppConfig::default();
        fake.llm.provider = "fake".into();
        assert!(fake.validate().is_ok());
    }

    #[test]
    fn debug_redacts_api_key() {
        let mut cfg = AppConfig::default();
        cfg.llm.api_key = Some("super-secret".into());
        let rendered = format!("{:?}", cfg);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
