use crate::config::OutputConfig;
use crate::model::{Record, Stub};
use crate::storage::traits::{ArtifactStore, StorageError, StorageResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Stores each artifact as a JSON array in its own file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    roster_path: PathBuf,
    detail_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(roster_path: impl Into<PathBuf>, detail_path: impl Into<PathBuf>) -> Self {
        Self {
            roster_path: roster_path.into(),
            detail_path: detail_path.into(),
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(&config.roster_path, &config.detail_path)
    }

    pub fn roster_path(&self) -> &Path {
        &self.roster_path
    }

    pub fn detail_path(&self) -> &Path {
        &self.detail_path
    }
}

impl ArtifactStore for JsonFileStore {
    fn write_roster(&self, stubs: &[Stub]) -> StorageResult<()> {
        write_json_atomic(&self.roster_path, stubs)
    }

    fn read_roster(&self) -> StorageResult<Vec<Stub>> {
        read_json(&self.roster_path)
    }

    fn write_records(&self, records: &[Record]) -> StorageResult<()> {
        write_json_atomic(&self.detail_path, records)
    }

    fn read_records(&self) -> StorageResult<Vec<Record>> {
        read_json(&self.detail_path)
    }
}

/// Writes `value` to a sibling temp file, then renames it over `path`
fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> StorageResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    {
        let file = fs::File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, value)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
    }

    fs::rename(&tmp_path, path)?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> StorageResult<T> {
    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(StorageError::NotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
