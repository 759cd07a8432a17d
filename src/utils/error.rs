use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Validation error: {field} = {value:?}: {reason}")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Transport error for {location}: {message}")]
    TransportError {
        location: String,
        status: Option<u16>,
        message: String,
    },

    #[error("Unsupported Content-Type: {content_type:?}")]
    UnsupportedContentTypeError { content_type: String },

    #[error("Unsupported file format: {format:?}")]
    UnsupportedFormatError { format: String },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Parquet processing error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    #[error("Arrow conversion error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Validation,
    Transport,
    Format,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn configuration(message: impl Into<String>) -> Self {
        EtlError::ConfigurationError {
            message: message.into(),
        }
    }

    pub fn processing(message: impl Into<String>) -> Self {
        EtlError::ProcessingError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ConfigurationError { .. } => ErrorCategory::Configuration,
            EtlError::ValidationError { .. } => ErrorCategory::Validation,
            EtlError::TransportError { .. } => ErrorCategory::Transport,
            EtlError::UnsupportedContentTypeError { .. }
            | EtlError::UnsupportedFormatError { .. }
            | EtlError::ZipError(_)
            | EtlError::CsvError(_)
            | EtlError::ParquetError(_)
            | EtlError::ArrowError(_) => ErrorCategory::Format,
            EtlError::ProcessingError { .. } => ErrorCategory::Data,
            EtlError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 遠端錯誤通常重試即可
            ErrorCategory::Transport => ErrorSeverity::Medium,
            ErrorCategory::Configuration
            | ErrorCategory::Validation
            | ErrorCategory::Format
            | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::ConfigurationError { .. } => {
                "Check --input_mode / --output_mode against the supported values".to_string()
            }
            EtlError::ValidationError { field, .. } => {
                format!("Fix the value supplied for `{}`", field)
            }
            EtlError::TransportError {
                status: Some(status),
                ..
            } => format!(
                "The remote endpoint answered with HTTP {}; verify the URL and try again",
                status
            ),
            EtlError::TransportError { .. } => {
                "Check network connectivity and storage credentials (AWS_ACCESS_KEY / AWS_SECRET_KEY / AWS_REGION_NAME)".to_string()
            }
            EtlError::UnsupportedContentTypeError { .. } => {
                "The endpoint must serve JSON, CSV, plain text, gzip or zip content".to_string()
            }
            EtlError::UnsupportedFormatError { .. } => {
                "Use one of: csv, tsv, parquet".to_string()
            }
            EtlError::ZipError(_)
            | EtlError::CsvError(_)
            | EtlError::ParquetError(_)
            | EtlError::ArrowError(_) => {
                "Verify that the input really is in the declared format".to_string()
            }
            EtlError::ProcessingError { .. } => {
                "Inspect the input data for unexpected values or missing columns".to_string()
            }
            EtlError::IoError(_) => {
                "Check that the path exists and is readable/writable".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Validation => format!("Invalid input: {}", self),
            ErrorCategory::Transport => format!("Could not reach the data source/sink: {}", self),
            ErrorCategory::Format => format!("Could not decode or encode the data: {}", self),
            ErrorCategory::Data => format!("Data could not be processed: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
