use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Required column '{column}' is missing from the dataset header")]
    MissingColumnError { column: String },

    #[error("Row {row} has {fields} fields, but the header has {expected}")]
    RowWidthError {
        row: usize,
        fields: usize,
        expected: usize,
    },

    #[error("Row {row}: cannot parse year '{value}'")]
    InvalidYearError { row: usize, value: String },

    #[error("Cannot bind {address}: {source}")]
    BindError {
        address: String,
        source: std::io::Error,
    },

    #[error("Server error: {message}")]
    ServerError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 換個位址或稍後重試即可
    Medium,
    High,
    Critical,
}

impl DashboardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DashboardError::ConfigValidationError { .. }
            | DashboardError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            DashboardError::CsvError(_)
            | DashboardError::RowWidthError { .. }
            | DashboardError::MissingColumnError { .. }
            | DashboardError::InvalidYearError { .. } => ErrorCategory::Data,
            DashboardError::IoError(_)
            | DashboardError::BindError { .. }
            | DashboardError::ServerError { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DashboardError::BindError { .. } => ErrorSeverity::Medium,
            _ => match self.category() {
                ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
                ErrorCategory::System => ErrorSeverity::Critical,
            },
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            DashboardError::IoError(_) => {
                "Check that the data file exists and is readable (see --data-path)".to_string()
            }
            DashboardError::CsvError(_) => {
                "Make sure the file is semicolon-delimited UTF-8 text".to_string()
            }
            DashboardError::MissingColumnError { column } => {
                format!("Add the '{}' column to the CSV header", column)
            }
            DashboardError::RowWidthError { row, .. } => {
                format!("Remove the extra ';' separated fields on data row {}", row)
            }
            DashboardError::InvalidYearError { row, .. } => {
                format!("Fix the year value on data row {}", row)
            }
            DashboardError::ConfigValidationError { field, .. }
            | DashboardError::InvalidConfigValueError { field, .. } => {
                format!("Review the '{}' setting in the configuration", field)
            }
            DashboardError::BindError { .. } => {
                "Pick another --port or stop the process using it".to_string()
            }
            DashboardError::ServerError { .. } => {
                "Rerun with --verbose and check the log".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Data => format!("Could not load the dataset: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
