use anyhow::{Context as _, anyhow};
use std::{path::PathBuf, str::FromStr};

pub const DEFAULT_HOSPITAL_NAME: &str = "XYZ Hospital";
pub const DEFAULT_TEMPERATURE: f64 = 0.2;
pub const DEFAULT_PORT: u16 = 5000;

/// Which hosted model family backs the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    Gemini,
    OpenRouter,
}

impl LlmProvider {
    /// Environment variable holding this provider's credential
    pub fn api_key_var(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => "GOOGLE_API_KEY",
            LlmProvider::OpenRouter => "OPENROUTER_API_KEY",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => "gemini-1.5-flash-latest",
            LlmProvider::OpenRouter => "openai/gpt-4o-mini",
        }
    }
}

impl FromStr for LlmProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(LlmProvider::Gemini),
            "openrouter" => Ok(LlmProvider::OpenRouter),
            other => Err(anyhow!("unknown LLM_PROVIDER '{}'", other)),
        }
    }
}

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Structured JSON, one event per line
    Json,
    /// Human-readable multi-line output for development
    Pretty,
}

impl LogFormat {
    /// Anything other than `pretty` means JSON
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("pretty") {
            LogFormat::Pretty
        } else {
            LogFormat::Json
        }
    }
}

/// Settings for the LLM adapter
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f64,
}

/// Configuration for the classifier service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub hospital_name: String,
    pub log_format: LogFormat,
    pub llm: LlmConfig,
    /// `.env` file that was loaded, if any
    pub env_file: Option<PathBuf>,
}

impl ServiceConfig {
    /// Load configuration from the process environment, reading `.env` first if present
    pub fn from_env() -> anyhow::Result<Self> {
        let env_file = dotenvy::dotenv().ok();
        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        Ok(Self { env_file, ..config })
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = match non_empty("LLM_PROVIDER") {
            Some(raw) => raw.parse()?,
            None => LlmProvider::Gemini,
        };

        let temperature = match non_empty("LLM_TEMPERATURE") {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .with_context(|| format!("invalid LLM_TEMPERATURE '{}'", raw))?,
            None => DEFAULT_TEMPERATURE,
        };

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("invalid PORT '{}'", raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: non_empty("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            hospital_name: non_empty("HOSPITAL_NAME")
                .unwrap_or_else(|| DEFAULT_HOSPITAL_NAME.to_string()),
            log_format: non_empty("LOG_FORMAT")
                .map(|raw| LogFormat::parse(&raw))
                .unwrap_or(LogFormat::Json),
            llm: LlmConfig {
                provider,
                api_key: non_empty(provider.api_key_var()),
                model: non_empty("LLM_MODEL")
                    .unwrap_or_else(|| provider.default_model().to_string()),
                temperature,
            },
            env_file: None,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
