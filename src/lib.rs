pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::app::render::OutputFormat;
pub use crate::config::{cli::LocalDirectory, toml_config::TomlConfig};
pub use crate::core::lookup::{LookupReport, LookupService, Panel};
pub use crate::domain::model::{Dataset, StudentColumns, StudentId};
pub use crate::utils::error::{LookupError, Result};
