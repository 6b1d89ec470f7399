pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::{
    app::render::OutputFormat,
    core::{date_formatter::DISPLAY_FORMAT, ConfigProvider},
    domain::model::{StudentColumns, DEFAULT_DATE_COLUMN},
};
#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_DATA_DIR: &str = ".";
pub const DEFAULT_STUDENT_FILE: &str = "c to x.csv";
pub const DEFAULT_TIMETABLE_SUFFIX: &str = ".csv";
pub const DEFAULT_BOUNDARY_CHARS: [char; 3] = ['-', '_', ' '];
pub const DEFAULT_TITLE: &str = "Second Semester External Practicals Section K to X";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "batchmate-lookup")]
#[command(about = "Look up a student's batch, batchmates and timetable by ERP ID")]
pub struct CliConfig {
    /// ERP ID to look up; prompts interactively when omitted
    #[arg(long)]
    pub erp_id: Option<String>,

    /// Directory holding the student file and timetable files
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Master student CSV, relative to the data directory
    #[arg(long)]
    pub student_file: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Match timetable file names without regard to case
    #[arg(long)]
    pub case_insensitive: bool,

    /// Reuse parsed files while their modification time is unchanged
    #[arg(long)]
    pub cache: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn data_dir(&self) -> &str {
        self.data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR)
    }

    fn student_file(&self) -> &str {
        self.student_file.as_deref().unwrap_or(DEFAULT_STUDENT_FILE)
    }

    fn student_columns(&self) -> StudentColumns {
        StudentColumns::default()
    }

    fn date_column(&self) -> &str {
        DEFAULT_DATE_COLUMN
    }

    fn date_output_format(&self) -> &str {
        DISPLAY_FORMAT
    }

    fn timetable_suffix(&self) -> &str {
        DEFAULT_TIMETABLE_SUFFIX
    }

    fn case_sensitive(&self) -> bool {
        !self.case_insensitive
    }

    fn boundary_chars(&self) -> Vec<char> {
        DEFAULT_BOUNDARY_CHARS.to_vec()
    }

    fn title(&self) -> &str {
        DEFAULT_TITLE
    }

    fn cache_enabled(&self) -> bool {
        self.cache
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = CliConfig::parse_from(["batchmate-lookup"]);
        assert_eq!(cli.data_dir(), ".");
        assert_eq!(cli.student_file(), "c to x.csv");
        assert!(cli.case_sensitive());
        assert!(!cli.cache_enabled());
        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.erp_id.is_none());
    }

    #[test]
    fn test_cli_flags() {
        let cli = CliConfig::parse_from([
            "batchmate-lookup",
            "--erp-id",
            "1001",
            "--data-dir",
            "/srv/practicals",
            "--format",
            "json",
            "--case-insensitive",
            "--cache",
        ]);
        assert_eq!(cli.erp_id.as_deref(), Some("1001"));
        assert_eq!(cli.data_dir(), "/srv/practicals");
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(!cli.case_sensitive());
        assert!(cli.cache_enabled());
    }
}
