//! Session persistence for the tab graph.
//!
//! The tab manager hands a [`GraphSnapshot`] to a [`TabPersistence`] after
//! every applied mutation. [`SessionManager`] stores those snapshots as JSON
//! rows in SQLite; [`MemoryPersistence`] keeps them in memory.

use std::cell::RefCell;
use std::rc::Rc;

use rusqlite::params;
use uuid::Uuid;

use crate::database::connection::Database;
use crate::types::errors::StoreError;
use crate::types::snapshot::GraphSnapshot;

/// Number of snapshots kept in the database; older rows are pruned on save.
pub const DEFAULT_SESSION_HISTORY: usize = 5;

/// The persistence collaborator of the tab manager.
pub trait TabPersistence {
    fn save(&mut self, snapshot: &GraphSnapshot) -> Result<(), StoreError>;
    fn load(&self) -> Result<Option<GraphSnapshot>, StoreError>;
}

/// Snapshot store backed by SQLite.
pub struct SessionManager {
    db: Database,
    history: usize,
}

impl SessionManager {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            history: DEFAULT_SESSION_HISTORY,
        }
    }

    /// Keeps at most `history` snapshots (minimum one).
    pub fn with_history(mut self, history: usize) -> Self {
        self.history = history.max(1);
        self
    }

    /// Number of snapshots currently stored.
    pub fn session_count(&self) -> Result<i64, StoreError> {
        let count = self
            .db
            .connection()
            .query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Returns true if at least one snapshot exists.
    pub fn has_session(&self) -> bool {
        self.session_count().map(|c| c > 0).unwrap_or(false)
    }

    /// Removes every stored snapshot.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.db.connection().execute("DELETE FROM sessions", [])?;
        Ok(())
    }

    fn prune(&self) -> Result<(), StoreError> {
        self.db.connection().execute(
            "DELETE FROM sessions WHERE id NOT IN (
                 SELECT id FROM sessions ORDER BY timestamp DESC, rowid DESC LIMIT ?1
             )",
            params![self.history as i64],
        )?;
        Ok(())
    }
}

impl TabPersistence for SessionManager {
    /// Serializes the snapshot to JSON and inserts it as the newest session.
    fn save(&mut self, snapshot: &GraphSnapshot) -> Result<(), StoreError> {
        let json = serde_json::to_string(snapshot)?;
        let id = Uuid::new_v4().to_string();
        self.db.connection().execute(
            "INSERT INTO sessions (id, snapshot, timestamp, tab_count) VALUES (?1, ?2, ?3, ?4)",
            params![id, json, snapshot.timestamp, snapshot.tabs.len() as i64],
        )?;
        self.prune()
    }

    /// Loads the most recent snapshot, `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<GraphSnapshot>, StoreError> {
        let result = self.db.connection().query_row(
            "SELECT snapshot FROM sessions ORDER BY timestamp DESC, rowid DESC LIMIT 1",
            [],
            |row| row.get::<_, String>(0),
        );
        match result {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Shared state behind a [`MemoryPersistence`], inspectable from tests.
#[derive(Debug, Default)]
pub struct MemoryStoreState {
    pub saved: Option<GraphSnapshot>,
    pub save_count: usize,
    pub fail_writes: bool,
}

/// In-memory snapshot store. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    state: Rc<RefCell<MemoryStoreState>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following `save` fail until switched back.
    pub fn set_fail_writes(&self, fail: bool) {
        self.state.borrow_mut().fail_writes = fail;
    }

    pub fn save_count(&self) -> usize {
        self.state.borrow().save_count
    }

    pub fn last_saved(&self) -> Option<GraphSnapshot> {
        self.state.borrow().saved.clone()
    }
}

impl TabPersistence for MemoryPersistence {
    fn save(&mut self, snapshot: &GraphSnapshot) -> Result<(), StoreError> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(StoreError::Unavailable("memory store rejects writes".to_string()));
        }
        state.saved = Some(snapshot.clone());
        state.save_count += 1;
        Ok(())
    }

    fn load(&self) -> Result<Option<GraphSnapshot>, StoreError> {
        Ok(self.state.borrow().saved.clone())
    }
}
