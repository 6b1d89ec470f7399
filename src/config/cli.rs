use crate::core::SourceCatalog;
use crate::utils::error::{LookupError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::SystemTime;

/// Sources resolved against a directory on the local file system.
#[derive(Debug, Clone)]
pub struct LocalDirectory {
    base_path: PathBuf,
}

impl LocalDirectory {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl SourceCatalog for LocalDirectory {
    fn read_source(&self, name: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(name);
        fs::read(&full_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LookupError::SourceNotFound {
                name: name.to_string(),
            },
            _ => LookupError::IoError(e),
        })
    }

    fn list_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => tracing::debug!("Skipping non UTF-8 file name {:?}", raw),
            }
        }
        Ok(names)
    }

    fn modified(&self, name: &str) -> Result<Option<SystemTime>> {
        match fs::metadata(self.base_path.join(name)) {
            Ok(meta) => Ok(meta.modified().ok()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LookupError::IoError(e)),
        }
    }
}
