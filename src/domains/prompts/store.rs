//! File-backed prompt store.
//!
//! The store keeps no state besides its root directory: every call walks the
//! tree again, so edits on disk are picked up by the next request.

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::{BoxFuture, try_join_all};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, instrument, warn};

use super::error::PromptError;
use super::record::{PromptRecord, parse_prompt_file};

/// File name suffix of prompt files.
pub const PROMPT_FILE_EXTENSION: &str = ".json";

/// Source of prompt records.
///
/// Services depend on this trait rather than on the file system so that the
/// storage can be swapped out in tests.
#[async_trait]
pub trait PromptSource: Send + Sync {
    /// Load every record, in traversal order.
    async fn load_all(&self) -> Result<Vec<PromptRecord>, PromptError>;

    /// First record whose `id`, `name` or `title` equals `identifier`.
    async fn find_by_id(&self, identifier: &str) -> Result<PromptRecord, PromptError>;
}

/// Prompt store reading `.json` files below a root directory.
#[derive(Debug, Clone)]
pub struct FilePromptStore {
    root: PathBuf,
}

impl FilePromptStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Recursively list every prompt file below the root.
    ///
    /// Entries of each directory are visited in file name order; nested
    /// directories are read concurrently.
    pub async fn discover_files(&self) -> Result<Vec<PathBuf>, PromptError> {
        collect_prompt_files(self.root.clone()).await
    }
}

#[async_trait]
impl PromptSource for FilePromptStore {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn load_all(&self) -> Result<Vec<PromptRecord>, PromptError> {
        let files = self.discover_files().await?;

        let parsed = try_join_all(files.iter().map(|path| async move {
            let content = read_prompt_file(path).await?;
            parse_prompt_file(path, &content)
        }))
        .await?;

        let records: Vec<PromptRecord> = parsed.into_iter().flatten().collect();
        warn_duplicate_identifiers(&records);

        debug!("Loaded {} prompts from {} files", records.len(), files.len());
        Ok(records)
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn find_by_id(&self, identifier: &str) -> Result<PromptRecord, PromptError> {
        for path in self.discover_files().await? {
            let content = read_prompt_file(&path).await?;
            let found = parse_prompt_file(&path, &content)?
                .into_iter()
                .find(|record| record.matches(identifier));

            if let Some(record) = found {
                debug!("Found prompt '{}' in {}", identifier, path.display());
                return Ok(record);
            }
        }

        Err(PromptError::not_found(identifier))
    }
}

fn collect_prompt_files(dir: PathBuf) -> BoxFuture<'static, Result<Vec<PathBuf>, PromptError>> {
    async move {
        let read_error =
            |e| PromptError::load(format!("Failed to read prompt directory {}", dir.display()), e);

        let mut reader = fs::read_dir(&dir).await.map_err(read_error)?;
        let mut entries = Vec::new();
        while let Some(entry) = reader.next_entry().await.map_err(read_error)? {
            entries.push(entry);
        }
        entries.sort_by_key(|entry| entry.file_name());

        let nested = try_join_all(entries.into_iter().map(|entry| async move {
            let path = entry.path();
            let file_type = entry.file_type().await.map_err(|e| {
                PromptError::load(format!("Failed to inspect {}", path.display()), e)
            })?;

            if file_type.is_dir() {
                collect_prompt_files(path).await
            } else if file_type.is_file() && is_prompt_file(&path) {
                Ok(vec![path])
            } else {
                Ok(Vec::new())
            }
        }))
        .await?;

        Ok(nested.into_iter().flatten().collect())
    }
    .boxed()
}

fn is_prompt_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(PROMPT_FILE_EXTENSION))
}

async fn read_prompt_file(path: &Path) -> Result<String, PromptError> {
    fs::read_to_string(path)
        .await
        .map_err(|e| PromptError::load(format!("Failed to read prompt file {}", path.display()), e))
}

/// Lookups resolve duplicates by traversal order, so make them visible.
fn warn_duplicate_identifiers(records: &[PromptRecord]) {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *seen.entry(record.identifier()).or_default() += 1;
    }

    for (identifier, count) in seen.into_iter().filter(|(_, count)| *count > 1) {
        warn!(
            "Prompt identifier '{}' is defined {} times; lookups return the first in traversal order",
            identifier, count
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn test_discover_files_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        write(root, "a.json", "{}");
        write(root, "notes.txt", "ignored");
        write(root, "react/hooks.json", "{}");
        write(root, "react/deep/nested/more.json", "{}");
        write(root, "react/readme.md", "ignored");

        let store = FilePromptStore::new(root);
        let files = store.discover_files().await.unwrap();

        let relative: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(
            relative,
            vec!["a.json", "react/deep/nested/more.json", "react/hooks.json"]
        );
    }

    #[tokio::test]
    async fn test_discover_missing_root_is_load_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = FilePromptStore::new(temp_dir.path().join("does-not-exist"));

        let err = store.discover_files().await.unwrap_err();
        assert!(matches!(err, PromptError::Load { .. }));
    }

    #[tokio::test]
    async fn test_load_all_flattens_arrays() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        write(root, "a.json", r#"{"id":"x","template":"Hi {{who}}"}"#);
        write(
            root,
            "sub/b.json",
            r#"[{"title":"p1","prompt":"A"},{"title":"p2","prompt":"B"}]"#,
        );

        let records = FilePromptStore::new(root).load_all().await.unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.identifier()).collect();
        assert_eq!(ids, vec!["x", "p1", "p2"]);
        assert_eq!(records[0].body(), "Hi {{who}}");
    }

    #[tokio::test]
    async fn test_load_all_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let records = FilePromptStore::new(temp_dir.path()).load_all().await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_load_all_fails_fast_on_bad_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        write(root, "good.json", r#"{"id":"ok","prompt":"fine"}"#);
        write(root, "nested/bad.json", r#"{"description":"no id, no body"}"#);

        let err = FilePromptStore::new(root).load_all().await.unwrap_err();
        match err {
            PromptError::Format { path, .. } => assert!(path.ends_with("nested/bad.json")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_all_malformed_json() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "bad.json", "{ invalid json }");

        let err = FilePromptStore::new(temp_dir.path()).load_all().await.unwrap_err();
        assert_eq!(err.code(), "INVALID_PROMPT_FORMAT");
    }

    #[tokio::test]
    async fn test_load_all_sees_edits() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let store = FilePromptStore::new(root);

        write(root, "a.json", r#"{"id":"a","prompt":"A"}"#);
        assert_eq!(store.load_all().await.unwrap().len(), 1);

        write(root, "b.json", r#"{"id":"b","prompt":"B"}"#);
        assert_eq!(store.load_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_id_matches_aliases() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        write(root, "a.json", r#"{"id":"first","prompt":"1"}"#);
        write(
            root,
            "b.json",
            r#"[{"name":"Named","prompt":"2"},{"title":"Titled","template":"3"}]"#,
        );

        let store = FilePromptStore::new(root);
        assert_eq!(store.find_by_id("first").await.unwrap().body(), "1");
        assert_eq!(store.find_by_id("Named").await.unwrap().body(), "2");

        let titled = store.find_by_id("Titled").await.unwrap();
        assert_eq!(titled.body(), "3");
        assert_eq!(titled.display_name(), "Titled");
    }

    #[tokio::test]
    async fn test_find_by_id_first_match_wins() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        write(root, "1-first.json", r#"{"id":"dup","prompt":"first"}"#);
        write(root, "2-second.json", r#"{"id":"dup","prompt":"second"}"#);

        let record = FilePromptStore::new(root).find_by_id("dup").await.unwrap();
        assert_eq!(record.body(), "first");
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "a.json", r#"{"id":"x","prompt":"p"}"#);

        let err = FilePromptStore::new(temp_dir.path())
            .find_by_id("missing")
            .await
            .unwrap_err();
        assert!(matches!(err, PromptError::NotFound { ref id } if id == "missing"));
        assert_eq!(err.details().unwrap()["promptId"], "missing");
    }

    #[tokio::test]
    async fn test_find_by_id_stops_at_match() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        write(root, "a.json", r#"{"id":"x","prompt":"p"}"#);
        write(root, "z.json", "{ not json");

        let record = FilePromptStore::new(root).find_by_id("x").await.unwrap();
        assert_eq!(record.identifier(), "x");
    }
}
