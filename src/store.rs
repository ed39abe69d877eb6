#[cfg(test)]
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError
{
    #[error("failed to read '{key}' from {}: {source}", .path.display())]
    Read {
        key: String,
        path: PathBuf,
        source: io::Error,
    },
    #[error("failed to write '{key}' to {}: {source}", .path.display())]
    Write {
        key: String,
        path: PathBuf,
        source: io::Error,
    },
    #[error("failed to serialize '{key}': {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },
}

pub trait KeyValueStore
{
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

pub struct FileStore
{
    dir: PathBuf,
}

impl FileStore
{
    pub fn new(dir: impl Into<PathBuf>) -> Self
    {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path
    {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf
    {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore
{
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>
    {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                key: key.to_string(),
                path,
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>
    {
        let path = self.path_for(key);
        let write_err = |source| StoreError::Write {
            key: key.to_string(),
            path: path.clone(),
            source,
        };
        let tmp = path.with_extension("json.tmp");
        fs::create_dir_all(&self.dir).map_err(write_err)?;
        fs::write(&tmp, value).map_err(write_err)?;
        fs::rename(&tmp, &path).map_err(write_err)?;
        debug!(key, path = %path.display(), bytes = value.len(), "stored value");
        Ok(())
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore
{
    values: HashMap<String, String>,
}

#[cfg(test)]
impl MemoryStore
{
    pub fn new() -> Self
    {
        Self::default()
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore
{
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>
    {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>
    {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf
    {
        let dir = std::env::temp_dir().join(format!(
            "quiz-games-store-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn file_store_missing_key_is_none()
    {
        let store = FileStore::new(scratch_dir("missing"));
        assert!(store.get("geo_rankings").unwrap().is_none());
    }

    #[test]
    fn file_store_creates_directory_and_reads_back()
    {
        let dir = scratch_dir("roundtrip").join("nested");
        let mut store = FileStore::new(&dir);
        store.set("gugudan_rankings", "[]").unwrap();

        assert!(dir.join("gugudan_rankings.json").exists());
        assert_eq!(store.get("gugudan_rankings").unwrap().as_deref(), Some("[]"));

        store.set("gugudan_rankings", "[1]").unwrap();
        assert_eq!(store.get("gugudan_rankings").unwrap().as_deref(), Some("[1]"));
        let _ = fs::remove_dir_all(dir.parent().unwrap());
    }

    #[test]
    fn file_store_replaces_through_temp_file()
    {
        let dir = scratch_dir("replace");
        let mut store = FileStore::new(&dir);
        store.set("geo_rankings", "[\"old\"]").unwrap();
        store.set("geo_rankings", "[\"new\"]").unwrap();

        assert!(!dir.join("geo_rankings.json.tmp").exists());
        assert_eq!(
            fs::read_to_string(dir.join("geo_rankings.json")).unwrap(),
            "[\"new\"]"
        );
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn file_store_ignores_leftover_temp_file()
    {
        let dir = scratch_dir("leftover");
        let mut store = FileStore::new(&dir);
        store.set("geo_rankings", "[1]").unwrap();
        fs::write(dir.join("geo_rankings.json.tmp"), "[1, 2").unwrap();

        assert_eq!(store.get("geo_rankings").unwrap().as_deref(), Some("[1]"));
        store.set("geo_rankings", "[3]").unwrap();
        assert_eq!(store.get("geo_rankings").unwrap().as_deref(), Some("[3]"));
        assert!(!dir.join("geo_rankings.json.tmp").exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn memory_store_overwrites()
    {
        let mut store = MemoryStore::new();
        assert!(store.get("k").unwrap().is_none());
        store.set("k", "a").unwrap();
        store.set("k", "b").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("b"));
    }
}
