use crate::domain::brand::NANO_BANANA;
use crate::utils::error::{AssetError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "brand-assets.toml";
pub const DEFAULT_OUTPUT_ROOT: &str = "assets";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub image_api: ImageApiSettings,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageApiSettings {
    pub endpoint: String,
    pub model: String,
    /// Usually `${OPENROUTER_API_KEY}`; empty or unresolved means "read the env var".
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
    pub max_tokens: u32,
    pub temperature: f64,
    pub mascot_temperature: f64,
    pub cost_per_image: f64,
}

impl Default for ImageApiSettings {
    fn default() -> Self {
        Self {
            endpoint: NANO_BANANA.endpoint.to_string(),
            model: NANO_BANANA.model.to_string(),
            api_key: None,
            timeout_seconds: NANO_BANANA.timeout_seconds,
            max_tokens: NANO_BANANA.max_tokens,
            temperature: NANO_BANANA.temperature,
            mascot_temperature: NANO_BANANA.mascot_temperature,
            cost_per_image: NANO_BANANA.cost_per_image,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub root: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: DEFAULT_OUTPUT_ROOT.to_string(),
        }
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"))
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AssetError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Loads `path` when given, else `brand-assets.toml` if it exists, else defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path);
                Self::from_file(path)
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                tracing::debug!("Loading configuration from {}", DEFAULT_CONFIG_FILE);
                Self::from_file(DEFAULT_CONFIG_FILE)
            }
            None => Ok(Self::default()),
        }
    }

    /// `load` followed by validation, with an optional output root override.
    pub fn load_validated(path: Option<&str>, output_root: Option<&str>) -> Result<Self> {
        let mut config = Self::load(path)?;
        if let Some(root) = output_root {
            config.output.root = root.to_string();
        }
        config.validate_config()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AssetError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables stay verbatim.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        self.image_api.validate()?;
        self.output.validate()
    }

    pub fn output_root(&self) -> &str {
        &self.output.root
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

impl Validate for ImageApiSettings {
    fn validate(&self) -> Result<()> {
        validation::check_endpoint("image_api.endpoint", &self.endpoint)?;
        validation::check_model_id("image_api.model", &self.model)?;
        validation::check_at_least_one("image_api.timeout_seconds", self.timeout_seconds)?;
        validation::check_at_least_one("image_api.max_tokens", u64::from(self.max_tokens))?;
        validation::check_temperature("image_api.temperature", self.temperature)?;
        validation::check_temperature("image_api.mascot_temperature", self.mascot_temperature)?;
        validation::check_price("image_api.cost_per_image", self.cost_per_image)
    }
}

impl Validate for OutputConfig {
    fn validate(&self) -> Result<()> {
        validation::check_output_root("output.root", &self.root)
    }
}

impl ImageApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Resolves the API key from the config value or, failing that, from `lookup(OPENROUTER_API_KEY)`.
    pub fn resolve_api_key<F>(&self, lookup: F) -> Result<String>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let configured = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !env_var_pattern().is_match(key))
            .map(str::to_string);

        configured
            .or_else(|| {
                lookup(NANO_BANANA.api_key_env)
                    .map(|key| key.trim().to_string())
                    .filter(|key| !key.is_empty())
            })
            .ok_or_else(|| AssetError::MissingConfigError {
                field: NANO_BANANA.api_key_env.to_string(),
            })
    }
}
