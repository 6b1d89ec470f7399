use crate::domain::model::StudentColumns;
use crate::utils::error::Result;
use std::time::SystemTime;

/// Where tabular sources live. `read_source` reports a missing source as
/// `LookupError::SourceNotFound`.
pub trait SourceCatalog {
    fn read_source(&self, name: &str) -> Result<Vec<u8>>;
    fn list_names(&self) -> Result<Vec<String>>;
    fn modified(&self, name: &str) -> Result<Option<SystemTime>>;
}

pub trait ConfigProvider {
    fn data_dir(&self) -> &str;
    fn student_file(&self) -> &str;
    fn student_columns(&self) -> StudentColumns;
    fn date_column(&self) -> &str;
    fn date_output_format(&self) -> &str;
    fn timetable_suffix(&self) -> &str;
    fn case_sensitive(&self) -> bool;
    fn boundary_chars(&self) -> Vec<char>;
    fn title(&self) -> &str;
    fn cache_enabled(&self) -> bool;
}
