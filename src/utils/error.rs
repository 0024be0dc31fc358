use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Request to {url} failed: {source}")]
    FetchError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned HTTP {status}")]
    HttpStatusError { url: String, status: u16 },

    #[error("Unexpected page structure: {message}")]
    ExtractionError { message: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Fetch,
    Extraction,
    InvalidArgument,
    Configuration,
    Output,
}

impl EtlError {
    pub fn extraction(message: impl Into<String>) -> Self {
        EtlError::ExtractionError {
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        EtlError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::FetchError { .. } | EtlError::HttpStatusError { .. } => ErrorCategory::Fetch,
            EtlError::ExtractionError { .. } => ErrorCategory::Extraction,
            EtlError::InvalidArgument { .. } => ErrorCategory::InvalidArgument,
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            EtlError::CsvError(_) | EtlError::IoError(_) | EtlError::SerializationError(_) => {
                ErrorCategory::Output
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Fetch => "Check network access and that the site is reachable, then rerun",
            ErrorCategory::Extraction => {
                "The page layout has probably changed; update the selectors or the awards pattern"
            }
            ErrorCategory::InvalidArgument => "Use a non-zero scoring.deviation and a finite scoring.deduction",
            ErrorCategory::Configuration => "Fix the configuration file or the command line overrides",
            ErrorCategory::Output => "Check that the output path is writable",
        }
    }

    /// Process exit status for a run that failed with this error.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::InvalidArgument => 1,
            ErrorCategory::Fetch => 2,
            ErrorCategory::Extraction => 3,
            ErrorCategory::Output => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
