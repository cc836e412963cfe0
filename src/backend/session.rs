//! Stores keeping the session context between views and invocations.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use crate::backend::SessionStore;
use crate::backend::errors::BackendResult;
use crate::domain::session::SessionContext;

/// Session context persisted as a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load_session(&self) -> BackendResult<SessionContext> {
        if !self.path.exists() {
            return Ok(SessionContext::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save_session(&self, session: &SessionContext) -> BackendResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(session)?)?;
        Ok(())
    }
}

/// Session context that lives as long as the store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RefCell<SessionContext>,
}

impl SessionStore for MemorySessionStore {
    fn load_session(&self) -> BackendResult<SessionContext> {
        Ok(self.session.borrow().clone())
    }

    fn save_session(&self, session: &SessionContext) -> BackendResult<()> {
        self.session.replace(session.clone());
        Ok(())
    }
}
