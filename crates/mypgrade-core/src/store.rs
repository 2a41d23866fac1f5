//! The subject document and its JSON persistence.
//!
//! The store is the only owner of the subject list. Grading and import code
//! borrow from it and hand back values or plans; every mutation goes through
//! a method here and is followed by a whole-file save.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use crate::error::StoreError;
use crate::grading::{summarize, Dashboard};
use crate::import::ImportPlan;
use crate::model::{default_roster, Criterion, Subject};
use crate::traits::Confirm;
use crate::validation::validate_score;

/// Prompt shown before a reset.
pub const RESET_PROMPT: &str = "Start fresh? This will clear all your recorded scores.";

/// Parse a persisted document, normalizing legacy single-value criteria.
pub fn document_from_json(json: &str) -> serde_json::Result<Vec<Subject>> {
    serde_json::from_str(json)
}

/// Serialize a document in its persisted layout.
pub fn document_to_json(subjects: &[Subject]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(subjects)
}

/// Where an unreadable state file is copied before it gets overwritten:
/// the same path with `.bak` appended.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}

/// What happened to a reconciled import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The user confirmed and these subjects were replaced.
    Merged {
        processed: usize,
        replaced: Vec<String>,
    },
    /// The user declined; nothing changed.
    Declined { processed: usize },
}

/// The subject document bound to its file.
#[derive(Debug, Clone)]
pub struct GradeStore {
    path: PathBuf,
    subjects: Vec<Subject>,
}

impl GradeStore {
    /// A store holding `subjects`, saved to `path` on [`GradeStore::save`].
    pub fn new(path: impl Into<PathBuf>, subjects: Vec<Subject>) -> Self {
        Self {
            path: path.into(),
            subjects,
        }
    }

    /// Load the document at `path`.
    ///
    /// A missing file starts from the default roster. A file that exists but
    /// does not parse is copied to [`backup_path`] first, then also replaced
    /// by the default roster. If the copy fails, so does `open`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no saved state, starting from default roster");
            return Ok(Self::new(path, default_roster()));
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read state from {}", path.display()))?;
        let subjects = match document_from_json(&content) {
            Ok(subjects) => subjects,
            Err(e) => {
                let backup = backup_path(&path);
                std::fs::copy(&path, &backup).with_context(|| {
                    format!(
                        "state in {} is unreadable ({e}) and could not be backed up to {}",
                        path.display(),
                        backup.display()
                    )
                })?;
                tracing::error!(
                    path = %path.display(),
                    backup = %backup.display(),
                    "failed to parse saved data: {e}; starting from default roster"
                );
                default_roster()
            }
        };
        Ok(Self::new(path, subjects))
    }

    /// Write the whole document, replacing the file atomically.
    pub fn save(&self) -> Result<()> {
        let json = document_to_json(&self.subjects).context("failed to serialize state")?;
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;

        let mut tmp = NamedTempFile::new_in(parent)
            .with_context(|| format!("failed to create temporary file in {}", parent.display()))?;
        tmp.write_all(json.as_bytes())
            .context("failed to write temporary state file")?;
        tmp.persist(&self.path)
            .with_context(|| format!("failed to write state to {}", self.path.display()))?;

        tracing::debug!(path = %self.path.display(), "state saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    fn subject_mut(&mut self, id: &str) -> Result<&mut Subject, StoreError> {
        self.subjects
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::UnknownSubject(id.to_string()))
    }

    /// Derived grades for the current document.
    pub fn dashboard(&self) -> Dashboard {
        summarize(&self.subjects)
    }

    /// Append one validated entry.
    pub fn add_score(
        &mut self,
        subject_id: &str,
        criterion: Criterion,
        value: i64,
    ) -> Result<u8, StoreError> {
        let score = validate_score(value)?;
        let subject = self.subject_mut(subject_id)?;
        subject.scores.get_mut(criterion).push(score);
        Ok(score)
    }

    /// Remove the entry at zero-based `index` and return it.
    pub fn remove_score(
        &mut self,
        subject_id: &str,
        criterion: Criterion,
        index: usize,
    ) -> Result<u8, StoreError> {
        let subject = self.subject_mut(subject_id)?;
        let entries = subject.scores.get_mut(criterion);
        if index >= entries.len() {
            return Err(StoreError::IndexOutOfRange {
                subject: subject_id.to_string(),
                criterion,
                index,
                len: entries.len(),
            });
        }
        Ok(entries.remove(index))
    }

    /// Replace one criterion's entries. All values are checked before anything
    /// changes.
    pub fn set_scores(
        &mut self,
        subject_id: &str,
        criterion: Criterion,
        values: &[i64],
    ) -> Result<(), StoreError> {
        let scores = values
            .iter()
            .map(|&v| validate_score(v))
            .collect::<Result<Vec<u8>, _>>()?;
        let subject = self.subject_mut(subject_id)?;
        *subject.scores.get_mut(criterion) = scores;
        Ok(())
    }

    /// Replace the document with the default roster if the user agrees.
    pub fn reset(&mut self, confirm: &dyn Confirm) -> bool {
        if !confirm.confirm(RESET_PROMPT) {
            return false;
        }
        self.subjects = default_roster();
        tracing::info!("state reset to default roster");
        true
    }

    /// Offer a reconciled import for confirmation and merge it if accepted.
    pub fn import(&mut self, plan: ImportPlan, confirm: &dyn Confirm) -> ImportOutcome {
        let processed = plan.processed();
        if !confirm.confirm(&plan.confirmation_message()) {
            tracing::info!(processed, "import declined");
            return ImportOutcome::Declined { processed };
        }
        let replaced = plan.apply(&mut self.subjects);
        ImportOutcome::Merged {
            processed,
            replaced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::import::reconcile;
    use crate::traits::AutoConfirm;

    fn temp_store() -> (tempfile::TempDir, GradeStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = GradeStore::open(dir.path().join("state.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn open_missing_file_gives_default_roster() {
        let (_dir, store) = temp_store();
        assert_eq!(store.subjects(), default_roster().as_slice());
    }

    #[test]
    fn save_and_reopen_roundtrip() {
        let (dir, mut store) = temp_store();
        store.add_score("math", Criterion::A, 7).unwrap();
        store.add_score("math", Criterion::A, 5).unwrap();
        store.add_score("phe", Criterion::D, 0).unwrap();
        store.save().unwrap();

        let reopened = GradeStore::open(dir.path().join("state.json")).unwrap();
        assert_eq!(reopened.subjects(), store.subjects());
        assert_eq!(reopened.subject("math").unwrap().scores.a, vec![7, 5]);
    }

    #[test]
    fn json_roundtrip_is_identical() {
        let mut subjects = default_roster();
        subjects[3].scores.b = vec![1, 2, 3];
        let json = document_to_json(&subjects).unwrap();
        let back = document_from_json(&json).unwrap();
        assert_eq!(back, subjects);
        assert_eq!(document_to_json(&back).unwrap(), json);
    }

    #[test]
    fn legacy_document_normalized() {
        let json = r#"[{"id":"math","name":"Mathematics","scores":{"A":5,"B":[6],"C":null}}]"#;
        let subjects = document_from_json(json).unwrap();
        assert_eq!(subjects[0].scores.a, vec![5]);
        assert_eq!(subjects[0].scores.b, vec![6]);
        assert!(subjects[0].scores.c.is_empty());
        assert!(subjects[0].scores.d.is_empty());
    }

    #[test]
    fn corrupt_file_is_backed_up_before_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = GradeStore::open(&path).unwrap();
        assert_eq!(store.subjects(), default_roster().as_slice());
        store.save().unwrap();

        let backup = dir.path().join("state.json.bak");
        assert_eq!(std::fs::read_to_string(backup).unwrap(), "{not json");
    }

    #[test]
    fn one_odd_criterion_keeps_the_rest_of_the_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(
            &path,
            r#"[{"id":"math","name":"Mathematics","scores":{"A":[7,7,7]}},
                {"id":"eng","name":"English","scores":{"A":"6"}}]"#,
        )
        .unwrap();

        let mut store = GradeStore::open(&path).unwrap();
        assert_eq!(store.subject("math").unwrap().scores.a, vec![7, 7, 7]);
        assert!(store.subject("eng").unwrap().scores.a.is_empty());
        assert!(!backup_path(&path).exists());

        store.add_score("math", Criterion::B, 5).unwrap();
        store.save().unwrap();
        let reopened = GradeStore::open(&path).unwrap();
        assert_eq!(reopened.subject("math").unwrap().scores.a, vec![7, 7, 7]);
    }

    #[test]
    fn out_of_range_entries_cannot_inflate_totals() {
        let json = r#"[{"id":"math","name":"Mathematics","scores":{"A":[200],"B":[200],"C":[9],"D":[9,8]}}]"#;
        let subjects = document_from_json(json).unwrap();
        let dashboard = summarize(&subjects);
        assert_eq!(dashboard.subjects[0].total, 8);
        assert!(dashboard.subjects.iter().all(|s| s.total <= 32));
    }

    #[test]
    fn save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/state.json");
        let store = GradeStore::new(&path, default_roster());
        store.save().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn add_score_validates() {
        let (_dir, mut store) = temp_store();
        assert_eq!(
            store.add_score("math", Criterion::B, 9),
            Err(StoreError::Invalid(ValidationError::OutOfRange(9)))
        );
        assert_eq!(
            store.add_score("art", Criterion::B, 3),
            Err(StoreError::UnknownSubject("art".into()))
        );
        assert!(store.subject("math").unwrap().scores.is_empty());
    }

    #[test]
    fn remove_score_by_position() {
        let (_dir, mut store) = temp_store();
        store.set_scores("bio", Criterion::C, &[3, 4, 5]).unwrap();
        assert_eq!(store.remove_score("bio", Criterion::C, 1), Ok(4));
        assert_eq!(store.subject("bio").unwrap().scores.c, vec![3, 5]);
        assert!(matches!(
            store.remove_score("bio", Criterion::C, 2),
            Err(StoreError::IndexOutOfRange { len: 2, index: 2, .. })
        ));
    }

    #[test]
    fn set_scores_is_all_or_nothing() {
        let (_dir, mut store) = temp_store();
        store.set_scores("eng", Criterion::A, &[4]).unwrap();
        assert!(store.set_scores("eng", Criterion::A, &[5, 11]).is_err());
        assert_eq!(store.subject("eng").unwrap().scores.a, vec![4]);
    }

    #[test]
    fn reset_needs_confirmation() {
        let (_dir, mut store) = temp_store();
        store.add_score("chn", Criterion::A, 6).unwrap();
        assert!(!store.reset(&AutoConfirm(false)));
        assert_eq!(store.subject("chn").unwrap().scores.a, vec![6]);
        assert!(store.reset(&AutoConfirm(true)));
        assert_eq!(store.subjects(), default_roster().as_slice());
    }

    #[test]
    fn declined_import_changes_nothing() {
        let (_dir, mut store) = temp_store();
        store.add_score("chn", Criterion::A, 2).unwrap();
        let before = store.subjects().to_vec();
        let plan = reconcile("h\nChinese,,,,,,7/8,,,", store.subjects()).unwrap();
        let outcome = store.import(plan, &AutoConfirm(false));
        assert_eq!(outcome, ImportOutcome::Declined { processed: 1 });
        assert_eq!(store.subjects(), before.as_slice());
    }

    #[test]
    fn confirmed_import_only_touches_present_subjects() {
        let (_dir, mut store) = temp_store();
        store.set_scores("chn", Criterion::D, &[1, 1]).unwrap();
        store.set_scores("math", Criterion::A, &[8, 8]).unwrap();
        let plan = reconcile("h\nChinese (Grade 8),,,,,,7/8,,,", store.subjects()).unwrap();
        let outcome = store.import(plan, &AutoConfirm(true));
        assert_eq!(
            outcome,
            ImportOutcome::Merged {
                processed: 1,
                replaced: vec!["chn".into()]
            }
        );
        let chn = &store.subject("chn").unwrap().scores;
        assert_eq!(chn.a, vec![7]);
        assert!(chn.d.is_empty());
        assert_eq!(store.subject("math").unwrap().scores.a, vec![8, 8]);
    }
}
