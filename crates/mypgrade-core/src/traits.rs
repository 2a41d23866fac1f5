//! Seams between the pure core and its surroundings.
//!
//! Reading import text is the only asynchronous step; confirming a
//! destructive action is delegated to whatever front end is driving the
//! store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::ImportError;
use crate::import::{reconcile, ImportPlan};
use crate::model::Subject;

// ---------------------------------------------------------------------------
// Import text sources
// ---------------------------------------------------------------------------

/// Something that yields the full text of a CSV export.
#[async_trait]
pub trait TextSource: Send + Sync {
    /// Short description for log lines (e.g. the file path).
    fn describe(&self) -> String;

    /// Read the whole content. Fails with [`ImportError::Read`] or
    /// [`ImportError::Decode`].
    async fn read_text(&self) -> Result<String, ImportError>;
}

/// A CSV file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl TextSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn read_text(&self) -> Result<String, ImportError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(ImportError::Read)?;
        String::from_utf8(bytes).map_err(ImportError::Decode)
    }
}

/// In-memory text, mostly for tests and piped input.
#[async_trait]
impl TextSource for String {
    fn describe(&self) -> String {
        "<memory>".to_string()
    }

    async fn read_text(&self) -> Result<String, ImportError> {
        Ok(self.clone())
    }
}

/// Read a source and reconcile it against the roster.
pub async fn read_and_reconcile(
    source: &dyn TextSource,
    roster: &[Subject],
) -> Result<ImportPlan, ImportError> {
    let text = source.read_text().await?;
    tracing::debug!(source = %source.describe(), bytes = text.len(), "read import text");
    reconcile(&text, roster)
}

// ---------------------------------------------------------------------------
// Confirmation
// ---------------------------------------------------------------------------

/// Asks the user to approve a destructive step (import merge, reset).
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Answers every prompt with a fixed value.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, _: &str) -> bool {
        self.0
    }
}
