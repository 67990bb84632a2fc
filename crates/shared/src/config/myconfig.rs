use anyhow::{Context, Result, anyhow};
use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_SESSION_DIR: &str = ".pidash";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub session_dir: PathBuf,
    pub cache_bust: bool,
    pub is_dev: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("API_BASE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(anyhow!(
                "API_BASE_URL must start with http:// or https://, got '{}'",
                api_base_url
            ));
        }

        let session_dir = lookup("SESSION_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_DIR));

        let cache_bust = parse_flag("CACHE_BUST", lookup("CACHE_BUST"), true)
            .context("Invalid CACHE_BUST")?;
        let is_dev =
            parse_flag("DEV_MODE", lookup("DEV_MODE"), false).context("Invalid DEV_MODE")?;
        let enable_file_log = parse_flag("ENABLE_FILE_LOG", lookup("ENABLE_FILE_LOG"), false)
            .context("Invalid ENABLE_FILE_LOG")?;

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            session_dir,
            cache_bust,
            is_dev,
            enable_file_log,
        })
    }
}

fn parse_flag(name: &str, value: Option<String>, default: bool) -> Result<bool> {
    let Some(value) = value else {
        return Ok(default);
    };

    match value.trim().to_lowercase().as_str() {
        "" => Ok(default),
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(anyhow!("{} must be 'true' or 'false', got '{}'", name, other)),
    }
}
