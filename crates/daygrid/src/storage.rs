use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::Result;

pub const SNAPSHOT_FILE: &str = "calendar_state.json";

/// Persistence port for the store. Injected so the store never touches
/// ambient global storage and tests can swap in a memory-backed slot.
pub trait SnapshotStorage {
    /// Raw snapshot contents, or `None` when nothing has been written yet.
    fn load(&self) -> Result<Option<String>>;

    fn save(&mut self, data: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct DataPath {
    base: PathBuf,
}

impl DataPath {
    pub fn new(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref().to_path_buf();
        Self { base }
    }

    pub fn default_base() -> Option<PathBuf> {
        dirs::data_local_dir().map(|pb| pb.join("daygrid"))
    }

    pub fn default_base_or_cwd() -> PathBuf {
        use std::str::FromStr;
        Self::default_base().unwrap_or_else(|| PathBuf::from_str(".").unwrap())
    }

    pub fn snapshot_file(&self) -> PathBuf {
        self.base.join(SNAPSHOT_FILE)
    }
}

impl Default for DataPath {
    fn default() -> Self {
        Self::new(Self::default_base_or_cwd())
    }
}

/// Single-file snapshot slot under the app data directory.
#[derive(Debug, Clone)]
pub struct FileSnapshotStorage {
    path: PathBuf,
}

impl FileSnapshotStorage {
    pub fn new(path: &DataPath) -> Self {
        Self {
            path: path.snapshot_file(),
        }
    }
}

impl SnapshotStorage for FileSnapshotStorage {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.is_file() {
            return Ok(None);
        }

        Ok(Some(fs::read_to_string(&self.path)?))
    }

    fn save(&mut self, data: &str) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        fs::write(&self.path, data)?;
        Ok(())
    }
}

/// In-memory slot for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStorage {
    contents: Option<String>,
}

impl MemorySnapshotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed with serialized contents, as if a previous run had saved.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
        }
    }
}

impl SnapshotStorage for MemorySnapshotStorage {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.contents.clone())
    }

    fn save(&mut self, data: &str) -> Result<()> {
        self.contents = Some(data.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = DataPath::new(dir.path());
        let mut storage = FileSnapshotStorage::new(&path);

        assert!(storage.load().unwrap().is_none());

        storage.save("{\"events\":[]}").unwrap();
        assert_eq!(storage.load().unwrap().unwrap(), "{\"events\":[]}");

        storage.save("{}").unwrap();
        assert_eq!(storage.load().unwrap().unwrap(), "{}");
    }

    #[test]
    fn file_storage_creates_missing_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = DataPath::new(dir.path().join("nested").join("deeper"));
        let mut storage = FileSnapshotStorage::new(&path);

        storage.save("x").unwrap();
        assert_eq!(storage.load().unwrap().unwrap(), "x");
    }

    #[test]
    fn memory_storage_roundtrip() {
        let mut storage = MemorySnapshotStorage::new();
        assert!(storage.load().unwrap().is_none());
        storage.save("hello").unwrap();
        assert_eq!(storage.load().unwrap().unwrap(), "hello");
    }
}
