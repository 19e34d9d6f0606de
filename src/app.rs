//! App Core for Jobflow.
//!
//! Central struct holding the storage, the API client and the bookmark store.
//! Everything is built here and handed to consumers explicitly.

use std::error::Error;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::info;

use crate::database::{Database, LocalStorage};
use crate::managers::bookmark_manager::BookmarkManager;
use crate::services::api_client::ApiClient;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

pub struct App {
    pub db: Arc<Database>,
    pub api: Arc<ApiClient>,
    pub bookmarks: BookmarkManager,
    settings_engine: Mutex<SettingsEngine>,
}

impl App {
    /// Loads settings from `config_path` (or the platform default) and builds the app.
    pub fn new(config_path: Option<String>) -> Result<Self, Box<dyn Error>> {
        let mut settings_engine = SettingsEngine::new(config_path);
        settings_engine.load()?;
        Self::with_settings(settings_engine)
    }

    /// Builds the app from already loaded settings, opening the configured database.
    pub fn with_settings(settings_engine: SettingsEngine) -> Result<Self, Box<dyn Error>> {
        let db_path = settings_engine.database_path();
        let db = Database::open(&db_path)?;
        info!(path = %db_path.display(), "Local storage opened");
        Ok(Self::with_database(settings_engine, db))
    }

    /// Builds the app over an existing database (in-memory in tests).
    pub fn with_database(settings_engine: SettingsEngine, db: Database) -> Self {
        let db = Arc::new(db);
        let storage: Arc<dyn LocalStorage> = db.clone();
        let api = Arc::new(ApiClient::from_settings(
            &settings_engine.get_settings().api,
            storage.clone(),
        ));
        info!(base_url = api.base_url(), "API client ready");

        Self {
            db,
            api,
            bookmarks: BookmarkManager::new(storage),
            settings_engine: Mutex::new(settings_engine),
        }
    }

    /// Locks the settings engine. Do not hold the guard across an await.
    pub fn settings(&self) -> MutexGuard<'_, SettingsEngine> {
        self.settings_engine
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn page_size(&self) -> u32 {
        self.settings().get_settings().api.page_size
    }
}
