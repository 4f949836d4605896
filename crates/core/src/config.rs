//! Configuration management for AgriGenius.
//!
//! Configuration is merged from several sources, later ones winning:
//! - Built-in defaults
//! - Config file (`.agrigenius/config.yaml` in the workspace, or `AGRIGENIUS_CONFIG`)
//! - Environment variables
//! - Command-line flags (`with_overrides`)
//!
//! The merged config also decides which optional answering sources exist
//! for the lifetime of the process (see [`Capabilities`]).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

const KNOWN_LLM_PROVIDERS: [&str; 3] = ["ollama", "together", "none"];
const KNOWN_TRANSLATION_PROVIDERS: [&str; 2] = ["llm", "none"];
const KNOWN_EMBEDDING_PROVIDERS: [&str; 2] = ["trigram", "ollama"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .agrigenius/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Explicit API key for the completion provider
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    pub llm: LlmSettings,
    pub translation: TranslationSettings,
    pub market: MarketSettings,
    pub retrieval: RetrievalSettings,
    pub server: ServerSettings,
    pub assistant: AssistantSettings,
}

/// Completion provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LlmSettings {
    /// "ollama", "together" or "none"
    pub provider: String,
    pub model: String,
    pub endpoint: Option<String>,
    /// Environment variable holding the provider API key
    pub api_key_env: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            model: "llama3.2".to_string(),
            endpoint: None,
            api_key_env: "TOGETHER_API_KEY".to_string(),
            max_tokens: 512,
            temperature: 0.1,
            timeout_secs: 30,
        }
    }
}

/// Translation provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationSettings {
    pub enabled: bool,
    /// "llm" or "none"
    pub provider: String,
    pub timeout_secs: u64,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: "llm".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Price-data settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketSettings {
    /// Serve quotes from the fixed table instead of live feeds
    pub use_mock: bool,
    pub default_market: String,
    pub agmarknet_endpoint: String,
    pub agmarknet_key_env: String,
    pub commodity_endpoint: String,
    pub commodity_key_env: String,
    pub timeout_secs: u64,
}

impl Default for MarketSettings {
    fn default() -> Self {
        Self {
            use_mock: true,
            default_market: "Delhi".to_string(),
            agmarknet_endpoint:
                "https://api.data.gov.in/resource/9ef84268-d588-465a-a308-a864a43d0070"
                    .to_string(),
            agmarknet_key_env: "AGMARKNET_API_KEY".to_string(),
            commodity_endpoint: "https://api.marketstack.com/v1/eod".to_string(),
            commodity_key_env: "COMMODITY_API_KEY".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Retrieval engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetrievalSettings {
    pub enabled: bool,
    pub urls: Vec<String>,
    pub pdf_files: Vec<PathBuf>,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub max_chunks_per_document: usize,
    pub max_chunks_total: usize,
    pub top_k: usize,
    /// Minimum cosine score for a chunk to count as context. Unset means
    /// the embedding provider's calibrated default.
    pub similarity_threshold: Option<f32>,
    /// "trigram" or "ollama"
    pub embedding_provider: String,
    pub embedding_model: String,
    pub embedding_dimensions: usize,
    pub fetch_timeout_secs: u64,
    pub answer_timeout_secs: u64,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            urls: vec!["https://mospi.gov.in/4-agricultural-statistics".to_string()],
            pdf_files: vec![
                PathBuf::from("Data/Farming Schemes.pdf"),
                PathBuf::from("Data/farmerbook.pdf"),
            ],
            chunk_size: 200,
            chunk_overlap: 20,
            max_chunks_per_document: 20,
            max_chunks_total: 50,
            top_k: 4,
            similarity_threshold: None,
            embedding_provider: "trigram".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            embedding_dimensions: 384,
            fetch_timeout_secs: 10,
            answer_timeout_secs: 30,
        }
    }
}

/// HTTP transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

/// Fixed assistant texts that deployments may rebrand.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantSettings {
    /// Answer to "who built you" questions
    pub attribution: String,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            attribution: "I was developed by Jayesh Bhandarkar.".to_string(),
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    workspace: Option<WorkspaceConfig>,
    logging: Option<LoggingConfig>,
    llm: Option<LlmSettings>,
    translation: Option<TranslationSettings>,
    market: Option<MarketSettings>,
    retrieval: Option<RetrievalSettings>,
    server: Option<ServerSettings>,
    assistant: Option<AssistantSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorkspaceConfig {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

/// Optional answering sources available to this process.
///
/// Computed once at startup; the pipeline treats it as a constant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// The retrieval-augmented engine is initialized and has a corpus
    pub retrieval: bool,
    /// A translation provider is configured
    pub translation: bool,
    /// Prices come from live feeds instead of the mock table
    pub live_prices: bool,
}

impl Capabilities {
    /// Downgrade retrieval when the engine failed to come up.
    pub fn with_retrieval_available(mut self, available: bool) -> Self {
        self.retrieval = self.retrieval && available;
        self
    }

    /// Human-readable run mode, as logged at startup.
    pub fn mode(&self) -> &'static str {
        if self.retrieval {
            "ai"
        } else {
            "fallback"
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            api_key: None,
            log_level: None,
            verbose: false,
            no_color: false,
            llm: LlmSettings::default(),
            translation: TranslationSettings::default(),
            market: MarketSettings::default(),
            retrieval: RetrievalSettings::default(),
            server: ServerSettings::default(),
            assistant: AssistantSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, config file and environment.
    ///
    /// Environment variables:
    /// - `AGRIGENIUS_WORKSPACE`: Override workspace path
    /// - `AGRIGENIUS_CONFIG`: Path to config file
    /// - `AGRIGENIUS_PROVIDER`: Completion provider
    /// - `AGRIGENIUS_MODEL`: Model identifier
    /// - `AGRIGENIUS_API_KEY`: API key
    /// - `AGRIGENIUS_USE_MOCK_PRICES`: `true`/`false`
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(workspace) = std::env::var("AGRIGENIUS_WORKSPACE") {
            config.workspace = PathBuf::from(workspace);
        }

        if let Ok(config_file) = std::env::var("AGRIGENIUS_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| config.agrigenius_dir().join("config.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        if let Ok(provider) = std::env::var("AGRIGENIUS_PROVIDER") {
            config.llm.provider = provider;
        }

        if let Ok(model) = std::env::var("AGRIGENIUS_MODEL") {
            config.llm.model = model;
        }

        if let Ok(use_mock) = std::env::var("AGRIGENIUS_USE_MOCK_PRICES") {
            config.market.use_mock = parse_bool(&use_mock).ok_or_else(|| {
                AppError::Config(format!(
                    "AGRIGENIUS_USE_MOCK_PRICES must be true or false, got '{}'",
                    use_mock
                ))
            })?;
        }

        config.api_key = std::env::var("AGRIGENIUS_API_KEY").ok();
        if config.log_level.is_none() {
            config.log_level = std::env::var("RUST_LOG").ok();
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    ///
    /// Sections present in the file replace the corresponding defaults;
    /// fields missing inside a section keep their default values.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(path) = config_file.workspace.and_then(|ws| ws.path) {
            result.workspace = PathBuf::from(path);
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        if let Some(llm) = config_file.llm {
            result.llm = llm;
        }
        if let Some(translation) = config_file.translation {
            result.translation = translation;
        }
        if let Some(market) = config_file.market {
            result.market = market;
        }
        if let Some(retrieval) = config_file.retrieval {
            result.retrieval = retrieval;
        }
        if let Some(server) = config_file.server {
            result.server = server;
        }
        if let Some(assistant) = config_file.assistant {
            result.assistant = assistant;
        }

        tracing::debug!("Merged config file {:?}", path);
        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the config file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(provider) = provider {
            self.llm.provider = provider;
        }

        if let Some(model) = model {
            self.llm.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .agrigenius directory.
    pub fn agrigenius_dir(&self) -> PathBuf {
        self.workspace.join(".agrigenius")
    }

    /// Resolve a workspace-relative path (absolute paths pass through).
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace.join(path)
        }
    }

    /// Resolve the completion provider API key.
    ///
    /// `AGRIGENIUS_API_KEY` wins over the provider-specific variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            return Some(key.clone());
        }
        read_secret(&self.llm.api_key_env)
    }

    /// Declared capabilities, before any collaborator is initialized.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            retrieval: self.retrieval.enabled && self.llm.provider != "none",
            translation: self.translation.enabled && self.translation.provider != "none",
            live_prices: !self.market.use_mock,
        }
    }

    /// Validate the merged configuration.
    ///
    /// A missing provider API key is not an error here; it only downgrades
    /// the assistant to its fallback sources at startup.
    pub fn validate(&self) -> AppResult<()> {
        check_known("LLM provider", &self.llm.provider, &KNOWN_LLM_PROVIDERS)?;
        check_known(
            "translation provider",
            &self.translation.provider,
            &KNOWN_TRANSLATION_PROVIDERS,
        )?;
        check_known(
            "embedding provider",
            &self.retrieval.embedding_provider,
            &KNOWN_EMBEDDING_PROVIDERS,
        )?;

        let retrieval = &self.retrieval;
        if retrieval.chunk_size == 0 {
            return Err(AppError::Config("chunkSize must be greater than 0".to_string()));
        }
        if retrieval.chunk_overlap >= retrieval.chunk_size {
            return Err(AppError::Config(format!(
                "chunkOverlap ({}) must be smaller than chunkSize ({})",
                retrieval.chunk_overlap, retrieval.chunk_size
            )));
        }
        if retrieval.top_k == 0 {
            return Err(AppError::Config("topK must be greater than 0".to_string()));
        }
        if let Some(threshold) = retrieval.similarity_threshold {
            if !(-1.0..=1.0).contains(&threshold) {
                return Err(AppError::Config(format!(
                    "similarityThreshold must be within [-1, 1], got {}",
                    threshold
                )));
            }
        }

        Ok(())
    }
}

/// Read a non-empty secret from the environment.
pub fn read_secret(env_var: &str) -> Option<String> {
    std::env::var(env_var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn check_known(what: &str, value: &str, known: &[&str]) -> AppResult<()> {
    if known.contains(&value) {
        Ok(())
    } else {
        Err(AppError::Config(format!(
            "Unknown {}: {}. Supported: {}",
            what,
            value,
            known.join(", ")
        )))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
