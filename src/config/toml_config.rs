use crate::config::{
    DEFAULT_BOUNDARY_CHARS, DEFAULT_DATA_DIR, DEFAULT_STUDENT_FILE, DEFAULT_TIMETABLE_SUFFIX,
    DEFAULT_TITLE,
};
use crate::core::date_formatter::{parse_date, DISPLAY_FORMAT};
use crate::core::ConfigProvider;
use crate::domain::model::{
    StudentColumns, DEFAULT_BATCH_COLUMN, DEFAULT_DATE_COLUMN, DEFAULT_ID_COLUMN,
};
use crate::utils::error::{LookupError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub columns: ColumnsConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourcesConfig {
    pub data_dir: Option<String>,
    pub student_file: Option<String>,
    pub timetable_suffix: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnsConfig {
    pub id: Option<String>,
    pub batch: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub case_sensitive: Option<bool>,
    pub boundary_chars: Option<Vec<char>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub title: Option<String>,
    pub date_format: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    pub enabled: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LookupError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LookupError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LookupError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Flags given on the command line win over the file.
    #[cfg(feature = "cli")]
    pub fn apply_cli_overrides(&mut self, cli: &crate::config::CliConfig) {
        if let Some(dir) = &cli.data_dir {
            self.sources.data_dir = Some(dir.clone());
        }
        if let Some(file) = &cli.student_file {
            self.sources.student_file = Some(file.clone());
        }
        if cli.case_insensitive {
            self.matching.case_sensitive = Some(false);
        }
        if cli.cache {
            self.cache.enabled = Some(true);
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("sources.data_dir", self.data_dir())?;
        validation::validate_path("sources.student_file", self.student_file())?;
        validation::validate_suffix("sources.timetable_suffix", self.timetable_suffix())?;

        let columns = self.student_columns();
        validation::validate_non_empty_string("columns.id", &columns.id)?;
        validation::validate_non_empty_string("columns.batch", &columns.batch)?;
        validation::validate_non_empty_string("columns.date", self.date_column())?;

        validation::validate_boundary_chars("matching.boundary_chars", &self.boundary_chars())?;

        let format = self.date_output_format();
        validation::validate_non_empty_string("display.date_format", format)?;
        if chrono::format::StrftimeItems::new(format)
            .any(|item| matches!(item, chrono::format::Item::Error))
        {
            return Err(LookupError::InvalidConfigValueError {
                field: "display.date_format".to_string(),
                value: format.to_string(),
                reason: "Not a valid strftime format".to_string(),
            });
        }

        // Formatted cells are parsed again on the next pass; the format has
        // to carry a full date that reads back unchanged.
        let sample = chrono::NaiveDate::from_ymd_opt(2024, 3, 5);
        let mut rendered = String::new();
        let reads_back = match sample {
            Some(date) => {
                write!(rendered, "{}", date.format(format)).is_ok()
                    && parse_date(&rendered, format) == Some(date)
            }
            None => false,
        };
        if !reads_back {
            return Err(LookupError::InvalidConfigValueError {
                field: "display.date_format".to_string(),
                value: format.to_string(),
                reason: "Formatted dates must read back as the same date".to_string(),
            });
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn data_dir(&self) -> &str {
        self.sources.data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR)
    }

    fn student_file(&self) -> &str {
        self.sources
            .student_file
            .as_deref()
            .unwrap_or(DEFAULT_STUDENT_FILE)
    }

    fn student_columns(&self) -> StudentColumns {
        StudentColumns {
            id: self
                .columns
                .id
                .clone()
                .unwrap_or_else(|| DEFAULT_ID_COLUMN.to_string()),
            batch: self
                .columns
                .batch
                .clone()
                .unwrap_or_else(|| DEFAULT_BATCH_COLUMN.to_string()),
        }
    }

    fn date_column(&self) -> &str {
        self.columns.date.as_deref().unwrap_or(DEFAULT_DATE_COLUMN)
    }

    fn date_output_format(&self) -> &str {
        self.display.date_format.as_deref().unwrap_or(DISPLAY_FORMAT)
    }

    fn timetable_suffix(&self) -> &str {
        self.sources
            .timetable_suffix
            .as_deref()
            .unwrap_or(DEFAULT_TIMETABLE_SUFFIX)
    }

    fn case_sensitive(&self) -> bool {
        self.matching.case_sensitive.unwrap_or(true)
    }

    fn boundary_chars(&self) -> Vec<char> {
        self.matching
            .boundary_chars
            .clone()
            .unwrap_or_else(|| DEFAULT_BOUNDARY_CHARS.to_vec())
    }

    fn title(&self) -> &str {
        self.display.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    fn cache_enabled(&self) -> bool {
        self.cache.enabled.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
