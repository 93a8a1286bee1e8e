//! One JSON file per session under the hook state directory.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use uuid::Uuid;

use recall_core::api::{sanitize_session_id, SessionRecord, SessionStore};

pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/<sanitized id>.json`; the id can never escape `dir`.
    pub fn path_for(&self, session_id: &str) -> PathBuf {
        self.dir
            .join(format!("{}.json", sanitize_session_id(session_id)))
    }

    fn read(&self, path: &Path) -> Result<Option<SessionRecord>> {
        let raw = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("read {}", path.display())),
        };
        let record = serde_json::from_str::<SessionRecord>(&raw)
            .with_context(|| format!("decode {}", path.display()))?;
        Ok(Some(record))
    }

    /// Writes to a unique temp file next to the target, then renames over it so
    /// readers never observe a partially written record.
    fn write(&self, path: &Path, record: &SessionRecord) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create state dir {}", self.dir.display()))?;

        let body = serde_json::to_string_pretty(record)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "session.json".to_string());
        let tmp = self
            .dir
            .join(format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple()));

        fs::write(&tmp, body).with_context(|| format!("write {}", tmp.display()))?;
        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(e).with_context(|| format!("rename into {}", path.display()));
        }
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn name(&self) -> &str {
        "file"
    }

    fn load(&self, session_id: &str) -> SessionRecord {
        let path = self.path_for(session_id);
        match self.read(&path) {
            Ok(Some(mut record)) => {
                if record.session_id.is_empty() {
                    record.session_id = session_id.to_string();
                }
                record
            }
            Ok(None) => SessionRecord::new(session_id),
            Err(e) => {
                tracing::warn!(
                    target: "recall.store",
                    path = %path.display(),
                    error = %format!("{e:#}"),
                    "unreadable session record, starting fresh"
                );
                SessionRecord::new(session_id)
            }
        }
    }

    fn save(&self, session_id: &str, record: &SessionRecord) {
        let path = self.path_for(session_id);
        match self.write(&path, record) {
            Ok(()) => tracing::debug!(target: "recall.store", path = %path.display(), "saved"),
            Err(e) => tracing::warn!(
                target: "recall.store",
                path = %path.display(),
                error = %format!("{e:#}"),
                "failed to persist session record"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_record_is_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        let r = store.load("s1");
        assert_eq!(r, SessionRecord::new("s1"));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested/state"));
        let mut r = SessionRecord::new("s1");
        r.record_search(1_000, Some("logging"));
        r.push_tool_call("mcp__claude-recall__search", 1_000, 20);
        store.save("s1", &r);

        assert!(store.path_for("s1").exists());
        assert_eq!(store.load("s1"), r);
    }

    #[test]
    fn writes_original_key_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        let mut r = SessionRecord::new("s1");
        r.record_search(5, Some("q"));
        store.save("s1", &r);

        let raw = fs::read_to_string(store.path_for("s1")).unwrap();
        let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(v["sessionId"], "s1");
        assert_eq!(v["lastSearchAt"], 5);
        assert_eq!(v["searchQuery"], "q");
        assert!(v["toolHistory"].is_array());
    }

    #[test]
    fn reads_records_written_by_older_hooks() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        fs::write(
            store.path_for("abc"),
            concat!(
                r#"{"sessionId":"abc","lastSearchAt":1700000000000,"#,
                r#""toolHistory":[{"tool":"mcp__claude-recall__search","at":1700000000000}],"#,
                r#""extra":true}"#,
            ),
        )
        .unwrap();
        let r = store.load("abc");
        assert_eq!(r.last_search_at, Some(1_700_000_000_000));
        assert_eq!(r.recent_tool_calls.len(), 1);
        assert_eq!(r.last_search_query, None);
    }

    #[test]
    fn corrupt_record_degrades_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        fs::write(store.path_for("s1"), "{not json").unwrap();
        assert_eq!(store.load("s1"), SessionRecord::new("s1"));
    }

    #[test]
    fn hostile_ids_stay_inside_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        let path = store.path_for("../../etc/passwd");
        assert_eq!(path.parent().unwrap(), dir.path());
        assert_eq!(path.file_name().unwrap(), "______etc_passwd.json");
    }

    #[test]
    fn no_temp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        store.save("s1", &SessionRecord::new("s1"));
        store.save("s1", &SessionRecord::new("s1"));
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["s1.json".to_string()]);
    }

    #[test]
    fn unwritable_dir_is_absorbed() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let store = FileSessionStore::new(blocker.join("state"));
        store.save("s1", &SessionRecord::new("s1"));
        assert_eq!(store.load("s1"), SessionRecord::new("s1"));
    }
}
