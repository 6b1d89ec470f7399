use crate::core::batch_matcher::{batch_of, find_batchmates, find_student};
use crate::core::date_formatter::format_date_column;
use crate::core::record_store::RecordStore;
use crate::core::timetable_locator::{find_timetable_file, MatchRules};
use crate::core::{ConfigProvider, Dataset, SourceCatalog};
use crate::domain::model::StudentId;
use crate::utils::error::{LookupError, Result};
use crate::utils::validation::parse_student_id;

/// One display section: either data (possibly with a non-fatal warning) or
/// the reason it cannot be shown.
#[derive(Debug)]
pub enum Panel {
    Available {
        data: Dataset,
        warning: Option<LookupError>,
    },
    NotAvailable(LookupError),
}

impl Panel {
    fn from_result(result: Result<Dataset>) -> Self {
        match result {
            Ok(data) => Panel::Available {
                data,
                warning: None,
            },
            Err(e) => Panel::NotAvailable(e),
        }
    }

    pub fn data(&self) -> Option<&Dataset> {
        match self {
            Panel::Available { data, .. } => Some(data),
            Panel::NotAvailable(_) => None,
        }
    }

    pub fn error(&self) -> Option<&LookupError> {
        match self {
            Panel::Available { warning, .. } => warning.as_ref(),
            Panel::NotAvailable(e) => Some(e),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Panel::Available { .. })
    }
}

#[derive(Debug)]
pub struct LookupReport {
    pub student_id: StudentId,
    pub student: Panel,
    pub batchmates: Panel,
    pub timetable: Panel,
    pub timetable_file: Option<String>,
}

pub struct LookupService<C: SourceCatalog, P: ConfigProvider> {
    store: RecordStore<C>,
    config: P,
}

impl<C: SourceCatalog, P: ConfigProvider> LookupService<C, P> {
    pub fn new(catalog: C, config: P) -> Self {
        let store = if config.cache_enabled() {
            RecordStore::with_cache(catalog)
        } else {
            RecordStore::new(catalog)
        };
        Self { store, config }
    }

    pub fn config(&self) -> &P {
        &self.config
    }

    fn match_rules(&self) -> MatchRules {
        MatchRules {
            suffix: self.config.timetable_suffix().to_string(),
            boundary_chars: self.config.boundary_chars(),
            case_sensitive: self.config.case_sensitive(),
        }
    }

    /// Handles one line of user input. Only a non-numeric id is an error;
    /// every other failure is reported inside the affected panel.
    pub fn lookup(&self, input: &str) -> Result<LookupReport> {
        let id = parse_student_id(input)?;
        Ok(self.lookup_id(id))
    }

    pub fn lookup_id(&self, id: StudentId) -> LookupReport {
        tracing::info!("Looking up ERP ID {}", id);
        let columns = self.config.student_columns();

        let master = match self.store.load(self.config.student_file()) {
            Ok(master) => master,
            Err(e) => {
                tracing::error!("Failed to load student data: {}", e);
                return LookupReport {
                    student_id: id,
                    student: Panel::NotAvailable(e),
                    batchmates: Panel::NotAvailable(LookupError::DatasetUnavailable),
                    timetable: Panel::NotAvailable(LookupError::DatasetUnavailable),
                    timetable_file: None,
                };
            }
        };

        let student = Panel::from_result(find_student(&master, id, &columns.id));
        let batchmates = Panel::from_result(find_batchmates(&master, id, &columns));

        let (timetable, timetable_file) = match batch_of(&master, id, &columns) {
            Ok(batch) => self.timetable_for(&batch),
            Err(e) => (Panel::NotAvailable(e), None),
        };

        LookupReport {
            student_id: id,
            student,
            batchmates,
            timetable,
            timetable_file,
        }
    }

    fn timetable_for(&self, batch: &str) -> (Panel, Option<String>) {
        let student_file = self.config.student_file();
        let names = match self.store.catalog().list_names() {
            Ok(names) => names
                .into_iter()
                .filter(|name| name != student_file)
                .collect::<Vec<_>>(),
            Err(e) => return (Panel::NotAvailable(e), None),
        };

        let Some(file) = find_timetable_file(batch, &names, &self.match_rules()) else {
            tracing::info!("No timetable published for batch '{}'", batch);
            return (
                Panel::NotAvailable(LookupError::TimetableNotFound {
                    batch: batch.to_string(),
                }),
                None,
            );
        };

        tracing::debug!("Using timetable '{}' for batch '{}'", file, batch);
        let panel = match self.store.load(&file) {
            Ok(mut data) => {
                let outcome = format_date_column(
                    &mut data,
                    self.config.date_column(),
                    self.config.date_output_format(),
                );
                Panel::Available {
                    data,
                    warning: outcome.warning(),
                }
            }
            Err(e) => {
                tracing::error!("Failed to read timetable data from '{}': {}", file, e);
                Panel::NotAvailable(e)
            }
        };
        (panel, Some(file))
    }
}
