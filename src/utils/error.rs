use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Source '{name}' not found")]
    SourceNotFound { name: String },

    #[error("Student with ERP ID {id} not found")]
    StudentNotFound { id: i64 },

    #[error("Column '{column}' not found in {source_name}")]
    MissingColumn { column: String, source_name: String },

    #[error("Student data could not be loaded")]
    DatasetUnavailable,

    #[error("Invalid ERP ID '{input}': {reason}")]
    InvalidInput { input: String, reason: String },

    #[error("Failed to format '{column}' column: {failed} of {total} values could not be parsed")]
    FormatWarning {
        column: String,
        failed: usize,
        total: usize,
    },

    #[error("Timetable data not found for batch '{batch}'")]
    TimetableNotFound { batch: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Schema,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LookupError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LookupError::InvalidInput { .. } => ErrorCategory::Input,
            LookupError::SourceNotFound { .. }
            | LookupError::StudentNotFound { .. }
            | LookupError::DatasetUnavailable
            | LookupError::FormatWarning { .. }
            | LookupError::TimetableNotFound { .. }
            | LookupError::CsvError(_) => ErrorCategory::Data,
            LookupError::MissingColumn { .. } => ErrorCategory::Schema,
            LookupError::ConfigError { .. } | LookupError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            LookupError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LookupError::FormatWarning { .. } | LookupError::TimetableNotFound { .. } => {
                ErrorSeverity::Low
            }
            LookupError::StudentNotFound { .. } | LookupError::InvalidInput { .. } => {
                ErrorSeverity::Medium
            }
            LookupError::SourceNotFound { .. }
            | LookupError::MissingColumn { .. }
            | LookupError::DatasetUnavailable
            | LookupError::CsvError(_)
            | LookupError::ConfigError { .. }
            | LookupError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            LookupError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// Message shown to the person at the prompt, without internal detail.
    pub fn user_friendly_message(&self) -> String {
        match self {
            LookupError::SourceNotFound { name } => {
                format!("Error: Student data file '{}' not found.", name)
            }
            LookupError::StudentNotFound { id } => {
                format!("No student found with ERP ID {}.", id)
            }
            LookupError::MissingColumn { column, .. } => {
                format!("Column '{}' not found in student data.", column)
            }
            LookupError::DatasetUnavailable => {
                "Error: Student data could not be loaded.".to_string()
            }
            LookupError::InvalidInput { .. } => {
                "Invalid ERP ID. Please enter a valid number.".to_string()
            }
            LookupError::FormatWarning { column, .. } => {
                format!("Error: Failed to format '{}' column. Check data format.", column)
            }
            LookupError::TimetableNotFound { batch } => {
                format!("Timetable data not found for batch '{}'.", batch)
            }
            LookupError::CsvError(e) => format!("Could not read tabular data: {}", e),
            LookupError::IoError(e) => format!("File system error: {}", e),
            LookupError::ConfigError { message } => format!("Configuration problem: {}", message),
            LookupError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LookupError::SourceNotFound { .. } | LookupError::DatasetUnavailable => {
                "Check --data-dir and --student-file point at an existing CSV file"
            }
            LookupError::StudentNotFound { .. } => "Double-check the ERP ID and try again",
            LookupError::MissingColumn { .. } => {
                "Make sure the CSV header matches the column names in the [columns] config section"
            }
            LookupError::InvalidInput { .. } => "Enter digits only, for example 1001",
            LookupError::FormatWarning { .. } => {
                "Dates are shown as written in the file; fix the offending cells to normalise them"
            }
            LookupError::TimetableNotFound { .. } => {
                "The timetable for this batch may not be published yet"
            }
            LookupError::CsvError(_) => "Make sure every row has the same number of fields as the header",
            LookupError::IoError(_) => "Check file permissions and that the data directory is readable",
            LookupError::ConfigError { .. } | LookupError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line flags"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
