use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{Result, ToolError};
use crate::inventory::{ArchiveEntry, ArchiveSource};

/// A mod directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalSource {
    dir: PathBuf,
    metadata_entries: Vec<String>,
}

impl LocalSource {
    /// Fails with [`ToolError::MissingInput`] when `dir` is not a directory.
    pub fn new(dir: impl Into<PathBuf>, metadata_entries: Vec<String>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(ToolError::MissingInput(dir));
        }
        Ok(Self {
            dir,
            metadata_entries,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArchiveSource for LocalSource {
    fn describe(&self) -> String {
        self.dir.display().to_string()
    }

    fn list_entries(&self) -> Result<Vec<ArchiveEntry>> {
        let mut entries = Vec::new();
        let walker = WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();
        for entry in walker {
            let entry = entry.map_err(|error| ToolError::fetch(self.describe(), error.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            entries.push(ArchiveEntry {
                file_name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path().display().to_string(),
            });
        }
        Ok(entries)
    }

    fn fetch_metadata(&self, entry: &ArchiveEntry) -> Result<Vec<u8>> {
        read_metadata_entry(Path::new(&entry.path), &self.metadata_entries)
    }
}

/// Reads the first of `entry_names` present in the archive at `path`.
pub fn read_metadata_entry(path: &Path, entry_names: &[String]) -> Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;

    for name in entry_names {
        match archive.by_name(name) {
            Ok(mut metadata) => {
                let mut raw = Vec::new();
                metadata.read_to_end(&mut raw)?;
                debug!(archive = %path.display(), entry = %name, bytes = raw.len(), "read metadata entry");
                return Ok(raw);
            }
            Err(ZipError::FileNotFound) => continue,
            Err(error) => return Err(error.into()),
        }
    }

    Err(ToolError::fetch(
        path.display().to_string(),
        format!("none of {entry_names:?} present in archive"),
    ))
}
