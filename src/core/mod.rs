pub mod batch_matcher;
pub mod date_formatter;
pub mod lookup;
pub mod record_store;
pub mod timetable_locator;

pub use crate::domain::model::Dataset;
pub use crate::domain::ports::{ConfigProvider, SourceCatalog};
pub use crate::utils::error::Result;
