//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.quill/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct QuillConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub lmstudio: LmStudioConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_provider: Option<String>,
    pub model: Option<String>,
    pub max_output_tokens: Option<u32>,
    pub system_prompt: Option<String>,
    pub system_prompt_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LmStudioConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Address `quill serve` binds to.
    pub listen: Option<String>,
    /// Writing API the TUI talks to instead of calling a provider directly.
    pub url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_PROVIDER: &str = "openai";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 500;
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an AI assistant designed to write in a \
    beautifully crafted style, reflecting the thoughtful, ambitious, and reflective nature of \
    the user. Your responses should be well-considered, articulate, and deeply insightful, \
    reflecting a unique voice and perspective.";
/// Smallest accepted `max_output_tokens`.
pub const MIN_MAX_OUTPUT_TOKENS: u32 = 1;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub provider: String,
    pub model_name: String,
    pub max_output_tokens: u32,
    pub system_prompt: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub lmstudio_base_url: String,
    pub listen_addr: String,
    pub server_url: Option<String>,
}

impl ResolvedConfig {
    /// Built-in defaults only. Ignores the environment and the config file.
    pub fn defaults() -> Self {
        Self {
            provider: DEFAULT_PROVIDER.to_string(),
            model_name: DEFAULT_MODEL.to_string(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            openai_api_key: None,
            openai_base_url: crate::inference::providers::DEFAULT_OPENAI_BASE_URL.to_string(),
            lmstudio_base_url: crate::inference::providers::DEFAULT_LMSTUDIO_BASE_URL.to_string(),
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            server_url: None,
        }
    }
}

/// Values given on the command line. `None` means the flag was not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub server: Option<String>,
    pub listen: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.quill`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".quill"))
}

/// Returns the path to `~/.quill/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.quill/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `QuillConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<QuillConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(QuillConfig::default());
        }
    };
    load_config_from(&path)
}

fn load_config_from(path: &Path) -> Result<QuillConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(QuillConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: QuillConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", redacted(&config));
    Ok(config)
}

fn redacted(config: &QuillConfig) -> String {
    format!(
        "provider={:?} model={:?} max_output_tokens={:?} openai_key_set={} server={:?}",
        config.general.default_provider,
        config.general.model,
        config.general.max_output_tokens,
        config.openai.api_key.is_some(),
        config.server,
    )
}

const DEFAULT_CONFIG_FILE: &str = r#"# Quill Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_provider = "openai"        # "openai" or "lmstudio"
# model = "gpt-4o-mini"
# max_output_tokens = 500
# system_prompt = "You are an AI assistant designed to write in a beautifully crafted style."
# system_prompt_file = "voice.md"    # Path relative to ~/.quill/

# [openai]
# api_key = "sk-..."                 # Or set OPENAI_API_KEY env var
# base_url = "https://api.openai.com/v1"

# [lmstudio]
# base_url = "http://localhost:1234/v1"

# [server]
# listen = "127.0.0.1:3000"          # Used by `quill serve`
# url = "http://127.0.0.1:3000"      # TUI talks to this writing API when set
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_FILE) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &QuillConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] but reads environment variables through `env`.
pub fn resolve_with_env<F>(config: &QuillConfig, cli: &CliOverrides, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = ResolvedConfig::defaults();

    // Provider: CLI → env → config → default
    let provider = cli
        .provider
        .clone()
        .or_else(|| env("QUILL_PROVIDER"))
        .or_else(|| config.general.default_provider.clone())
        .unwrap_or(defaults.provider);

    // Model: CLI → env → config → default
    let model_name = cli
        .model
        .clone()
        .or_else(|| env("QUILL_MODEL"))
        .or_else(|| config.general.model.clone())
        .unwrap_or(defaults.model_name);

    let system_prompt = resolve_system_prompt(config, config_dir().as_deref());

    // Empty keys are treated as unset
    let openai_api_key = env("OPENAI_API_KEY")
        .or_else(|| config.openai.api_key.clone())
        .filter(|k| !k.trim().is_empty());

    let openai_base_url = env("OPENAI_BASE_URL")
        .or_else(|| config.openai.base_url.clone())
        .unwrap_or(defaults.openai_base_url);

    let lmstudio_base_url = env("LM_STUDIO_BASE_URL")
        .or_else(|| config.lmstudio.base_url.clone())
        .unwrap_or(defaults.lmstudio_base_url);

    let listen_addr = cli
        .listen
        .clone()
        .or_else(|| env("QUILL_LISTEN"))
        .or_else(|| config.server.listen.clone())
        .unwrap_or(defaults.listen_addr);

    let max_output_tokens = match config.general.max_output_tokens {
        Some(n) if n < MIN_MAX_OUTPUT_TOKENS => {
            warn!(
                "max_output_tokens = {} is too small, using {}",
                n, MIN_MAX_OUTPUT_TOKENS
            );
            MIN_MAX_OUTPUT_TOKENS
        }
        Some(n) => n,
        None => defaults.max_output_tokens,
    };

    let server_url = cli
        .server
        .clone()
        .or_else(|| env("QUILL_SERVER_URL"))
        .or_else(|| config.server.url.clone())
        .filter(|u| !u.trim().is_empty());

    ResolvedConfig {
        provider,
        model_name,
        max_output_tokens,
        system_prompt,
        openai_api_key,
        openai_base_url,
        lmstudio_base_url,
        listen_addr,
        server_url,
    }
}

/// Resolves the system prompt: inline wins over file, both win over default.
/// `system_prompt_file` is read relative to `base_dir`.
fn resolve_system_prompt(config: &QuillConfig, base_dir: Option<&Path>) -> String {
    if let Some(ref prompt) = config.general.system_prompt {
        return prompt.clone();
    }

    if let (Some(file), Some(base)) = (config.general.system_prompt_file.as_ref(), base_dir) {
        let prompt_path = base.join(file);
        match fs::read_to_string(&prompt_path) {
            Ok(contents) => {
                let trimmed = contents.trim().to_string();
                if !trimmed.is_empty() {
                    info!("Loaded system prompt from {}", prompt_path.display());
                    return trimmed;
                }
                warn!("System prompt file is empty: {}", prompt_path.display());
            }
            Err(e) => {
                warn!(
                    "Failed to read system prompt file {}: {}",
                    prompt_path.display(),
                    e
                );
            }
        }
    }

    DEFAULT_SYSTEM_PROMPT.to_string()
}
