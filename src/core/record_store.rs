use crate::core::{Dataset, SourceCatalog};
use crate::utils::error::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

/// Parses CSV bytes into a [`Dataset`]. Cells are trimmed; a ragged row fails
/// the whole load.
pub fn parse_csv(name: &str, data: &[u8]) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let headers = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Dataset::new(name, headers, rows))
}

/// Loads `name` from the catalog, all or nothing.
pub fn load<C: SourceCatalog + ?Sized>(catalog: &C, name: &str) -> Result<Dataset> {
    tracing::debug!("Loading source '{}'", name);
    let data = catalog.read_source(name)?;
    let dataset = parse_csv(name, &data)?;
    tracing::debug!(
        "Loaded '{}' with {} rows and {} columns",
        name,
        dataset.len(),
        dataset.headers.len()
    );
    Ok(dataset)
}

/// Read-through cache keyed by source name and modification time.
///
/// Cached datasets are never handed out by reference; each caller gets its
/// own copy to format or filter.
pub struct RecordStore<C: SourceCatalog> {
    catalog: C,
    cache: Option<Mutex<HashMap<String, CachedEntry>>>,
}

struct CachedEntry {
    modified: Option<SystemTime>,
    dataset: Arc<Dataset>,
}

impl<C: SourceCatalog> RecordStore<C> {
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            cache: None,
        }
    }

    pub fn with_cache(catalog: C) -> Self {
        Self {
            catalog,
            cache: Some(Mutex::new(HashMap::new())),
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn load(&self, name: &str) -> Result<Dataset> {
        let Some(cache) = &self.cache else {
            return load(&self.catalog, name);
        };

        let modified = self.catalog.modified(name)?;
        if let Ok(entries) = cache.lock() {
            if let Some(entry) = entries.get(name) {
                if entry.modified.is_some() && entry.modified == modified {
                    tracing::debug!("Cache hit for '{}'", name);
                    return Ok(Dataset::clone(&entry.dataset));
                }
            }
        }

        let dataset = Arc::new(load(&self.catalog, name)?);
        if let Ok(mut entries) = cache.lock() {
            entries.insert(
                name.to_string(),
                CachedEntry {
                    modified,
                    dataset: Arc::clone(&dataset),
                },
            );
        }

        Ok(Arc::unwrap_or_clone(dataset))
    }
}
