use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Storage,
    Encoding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AssetError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AssetError::MissingConfigError { .. }
            | AssetError::InvalidConfigValueError { .. }
            | AssetError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            AssetError::ApiError(_) => ErrorCategory::Network,
            AssetError::IoError(_) => ErrorCategory::Storage,
            AssetError::ZipError(_) | AssetError::SerializationError(_) => ErrorCategory::Encoding,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Storage | ErrorCategory::Encoding => ErrorSeverity::Critical,
        }
    }

    /// Exit code for the CLI binaries.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AssetError::MissingConfigError { field } => {
                format!("{} not found in environment or configuration", field)
            }
            AssetError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            AssetError::ConfigValidationError { field, message } => {
                format!("Configuration '{}' could not be loaded: {}", field, message)
            }
            AssetError::ApiError(e) => format!("Could not reach the image API: {}", e),
            AssetError::IoError(e) => format!("Could not write output files: {}", e),
            AssetError::ZipError(e) => format!("Could not package the presentation: {}", e),
            AssetError::SerializationError(e) => format!("Could not encode data: {}", e),
        }
    }

    /// Logs the error with its classification and prints the user-facing lines to stderr.
    pub fn report(&self) {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            self,
            self.category(),
            self.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", self.recovery_suggestion());
        eprintln!("❌ {}", self.user_friendly_message());
        eprintln!("💡 {}", self.recovery_suggestion());
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AssetError::MissingConfigError { .. } => {
                "Export OPENROUTER_API_KEY or set image_api.api_key in brand-assets.toml"
            }
            AssetError::InvalidConfigValueError { .. }
            | AssetError::ConfigValidationError { .. } => {
                "Check brand-assets.toml against the documented keys and value ranges"
            }
            AssetError::ApiError(_) => {
                "Check network connectivity and the image_api.endpoint setting"
            }
            AssetError::IoError(_) => "Make sure the output directory exists and is writable",
            AssetError::ZipError(_) | AssetError::SerializationError(_) => {
                "Re-run with --verbose and report the log output"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AssetError>;

/// Why a single image could not be produced. Always recoverable at batch level.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("API error: {status} ({body})")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("No choices in response")]
    MissingChoices,

    #[error("No images in response")]
    MissingImages,

    #[error("Unexpected image URL format: {0}")]
    MalformedDataUri(String),

    #[error("Base64 decoding failed: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Response body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
