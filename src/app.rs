//! App Core for Tabspace.
//!
//! Wires the tab manager to its collaborators: the SQLite session store, the
//! settings file and, when one is available, a rendering host.

use crate::database::connection::Database;
use crate::managers::session_manager::SessionManager;
use crate::managers::tab_manager::TabManager;
use crate::services::render_host::RenderHost;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

/// Central application struct holding the tab manager and the settings engine.
pub struct App {
    pub tab_manager: TabManager,
    pub settings_engine: SettingsEngine,
}

impl App {
    /// Creates an App storing sessions at `db_path` and settings at
    /// `settings_path` (the platform config directory when `None`).
    pub fn new(db_path: &str, settings_path: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Database::open(db_path)?;
        Ok(Self::assemble(db, SettingsEngine::new(settings_path)))
    }

    /// Creates an App using the platform data and config directories.
    pub fn open_default() -> Result<Self, Box<dyn std::error::Error>> {
        let db = Database::open_default()?;
        Ok(Self::assemble(db, SettingsEngine::new(None)))
    }

    fn assemble(db: Database, mut settings_engine: SettingsEngine) -> Self {
        if let Err(e) = settings_engine.load() {
            log::warn!("Failed to load settings, using defaults: {}", e);
        }
        let settings = settings_engine.get_settings().clone();
        let tab_manager = TabManager::with_parts(settings, Box::new(SessionManager::new(db)));
        Self {
            tab_manager,
            settings_engine,
        }
    }

    pub fn set_render_host(&mut self, host: Box<dyn RenderHost>) {
        self.tab_manager.set_render_host(host);
    }

    /// Pushes the settings engine's current values into the tab manager.
    pub fn apply_settings(&mut self) {
        self.tab_manager
            .set_settings(self.settings_engine.get_settings().clone());
    }

    /// Startup sequence: restore the last session (if enabled) or create the first space.
    ///
    /// Returns true when a saved session was restored.
    pub fn startup(&mut self) -> bool {
        let restored = self.tab_manager.bootstrap();
        log::info!(
            "Tabspace started with {} spaces and {} tabs",
            self.tab_manager.containers().len(),
            self.tab_manager.graph().tab_count()
        );
        restored
    }

    /// Shutdown sequence: abandon any drag in flight.
    ///
    /// Every applied mutation has already been saved.
    pub fn shutdown(&mut self) {
        self.tab_manager.end_drag();
        log::info!("Tabspace shut down");
    }
}
