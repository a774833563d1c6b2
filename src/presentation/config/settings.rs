use std::path::PathBuf;

use config::{Config, File};
use serde::Deserialize;

use super::Environment;
use crate::application::services::{DEFAULT_MAX_PREVIEW_CHARS, DEFAULT_SYSTEM_PROMPT};
use crate::infrastructure::text_processing::{
    DEFAULT_MAX_PREVIEW_ROWS, DEFAULT_OCR_LANGUAGE, DEFAULT_OCR_TIMEOUT, DEFAULT_RENDER_DPI,
    DEFAULT_TESSERACT_CMD,
};

const ENV_PREFIX: &str = "APP";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid environment: {0}")]
    Environment(String),
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub extraction: ExtractionSettings,
    pub watsonx: WatsonxSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Settings {
    /// Layers `appsettings.<env>.toml` (optional) under `APP__SECTION__KEY`
    /// environment overrides.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let configuration = Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                env_source()
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .add_source(env_source().source(Some(raw_watsonx_vars())))
            .build()?;

        Ok(configuration.try_deserialize()?)
    }
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
}

/// Credentials such as `00042` must reach the settings unparsed.
fn raw_watsonx_vars() -> config::Map<String, String> {
    let section = format!("{ENV_PREFIX}__WATSONX__");
    std::env::vars()
        .filter(|(key, _)| key.to_ascii_uppercase().starts_with(&section))
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub max_upload_size_mb: usize,
}

impl ServerSettings {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_size_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            max_upload_size_mb: 25,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    pub max_preview_chars: usize,
    pub max_preview_rows: usize,
    pub tesseract_cmd: String,
    pub ocr_language: String,
    pub ocr_timeout_secs: u64,
    pub render_dpi: f32,
    /// Directory holding the pdfium shared library; system lookup when unset.
    pub pdfium_library_path: Option<PathBuf>,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            max_preview_chars: DEFAULT_MAX_PREVIEW_CHARS,
            max_preview_rows: DEFAULT_MAX_PREVIEW_ROWS,
            tesseract_cmd: DEFAULT_TESSERACT_CMD.to_string(),
            ocr_language: DEFAULT_OCR_LANGUAGE.to_string(),
            ocr_timeout_secs: DEFAULT_OCR_TIMEOUT.as_secs(),
            render_dpi: DEFAULT_RENDER_DPI,
            pdfium_library_path: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionMode {
    #[default]
    Chat,
    Generation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WatsonxSettings {
    pub api_key: String,
    pub project_id: String,
    #[serde(default = "default_watsonx_url")]
    pub url: String,
    #[serde(default = "default_iam_url")]
    pub iam_url: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_model_id")]
    pub model_id: String,
    #[serde(default)]
    pub mode: CompletionMode,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

impl WatsonxSettings {
    /// Defaults for everything but the credentials.
    pub fn new(api_key: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            project_id: project_id.into(),
            url: default_watsonx_url(),
            iam_url: default_iam_url(),
            api_version: default_api_version(),
            model_id: default_model_id(),
            mode: CompletionMode::default(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            timeout_secs: default_timeout_secs(),
            system_prompt: default_system_prompt(),
        }
    }
}

fn default_watsonx_url() -> String {
    "https://eu-gb.ml.cloud.ibm.com".to_string()
}

fn default_iam_url() -> String {
    "https://iam.cloud.ibm.com".to_string()
}

fn default_api_version() -> String {
    "2024-05-31".to_string()
}

fn default_model_id() -> String {
    "ibm/granite-3-8b-instruct".to_string()
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_temperature() -> f32 {
    0.1
}

fn default_top_p() -> f32 {
    0.9
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json_format: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}
