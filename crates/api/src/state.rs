use std::sync::Arc;

use apprep_core::entry_service::EntryService;
use apprep_core::import::ImportPipeline;
use apprep_core::print::{load_extra_data, PrintService};
use apprep_core::provision::Provisioner;
use apprep_core::store::EntryStore;
use apprep_db::repositories::PgEntryStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: apprep_db::DbPool,
    pub config: Arc<ServerConfig>,
    pub entries: Arc<EntryService>,
    pub importer: Arc<ImportPipeline>,
    pub provisioner: Arc<Provisioner>,
    pub print: Arc<PrintService>,
}

impl AppState {
    /// Wire the services over a PostgreSQL-backed entry store.
    ///
    /// Reads the print extra data file once.
    pub fn new(pool: apprep_db::DbPool, config: ServerConfig) -> Self {
        let store: Arc<dyn EntryStore> = Arc::new(PgEntryStore::new(pool.clone()));
        let extra_data = load_extra_data(config.print_extra_data_path.as_deref());

        Self {
            pool,
            entries: Arc::new(EntryService::new(Arc::clone(&store))),
            importer: Arc::new(ImportPipeline::new(
                Arc::clone(&store),
                config.import.fields.clone(),
            )),
            provisioner: Arc::new(Provisioner::new(Arc::clone(&store))),
            print: Arc::new(PrintService::new(store, extra_data)),
            config: Arc::new(config),
        }
    }
}
