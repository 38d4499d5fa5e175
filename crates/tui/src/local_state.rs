use std::{
    fs,
    path::{Path, PathBuf},
};

use operation_form::{OperationId, SavedForm};

use crate::error::Result;

/// Draft of an interrupted edit, kept on disk between runs.
#[derive(Debug, Clone)]
pub struct DraftStore {
    path: PathBuf,
}

impl DraftStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the saved draft, if any. An unreadable draft is logged and
    /// treated as absent.
    pub fn load(&self) -> Result<Option<SavedForm>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        match serde_json::from_str(&content) {
            Ok(saved) => Ok(Some(saved)),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "ignoring unreadable draft: {err}");
                Ok(None)
            }
        }
    }

    /// Returns the draft only if it belongs to the operation being opened.
    pub fn load_for(&self, id: Option<OperationId>) -> Result<Option<SavedForm>> {
        Ok(self.load()?.filter(|saved| saved.operation_id() == id))
    }

    pub fn save(&self, saved: &SavedForm) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(saved)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
