// File: src/loader.rs
use crate::core::dataset::Dataset;
use crate::core::types::Year;
use crate::error::{Result, TrendsError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::info;

pub const MANIFEST_FILE: &str = "manifest.json";

/// One chunk listed in the manifest. Both manifest dialects are accepted:
/// `{"filename", "startYear", "endYear"}` and `{"file", "years": [a, b]}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkInfo {
    #[serde(alias = "file")]
    pub filename: String,
    #[serde(default)]
    pub start_year: Option<Year>,
    #[serde(default)]
    pub end_year: Option<Year>,
    #[serde(default)]
    pub years: Option<(Year, Year)>,
}

impl ChunkInfo {
    pub fn span(&self) -> Option<(Year, Year)> {
        match (self.start_year, self.end_year, self.years) {
            (Some(start), Some(end), _) => Some((start, end)),
            (_, _, years) => years,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    pub chunks: Vec<ChunkInfo>,
}

impl Manifest {
    pub fn parse(json: &str) -> Result<Self> {
        let manifest: Manifest =
            serde_json::from_str(json).map_err(|e| TrendsError::Manifest(e.to_string()))?;
        if manifest.chunks.is_empty() {
            return Err(TrendsError::Manifest("no chunks listed".to_string()));
        }
        if let Some(bad) = manifest
            .chunks
            .iter()
            .find(|c| c.filename.contains("..") || Path::new(&c.filename).is_absolute())
        {
            return Err(TrendsError::Manifest(format!("chunk path escapes the data dir: {}", bad.filename)));
        }
        Ok(manifest)
    }
}

pub fn manifest_path(dir: &Path) -> PathBuf {
    dir.join(MANIFEST_FILE)
}

pub fn read_manifest(dir: &Path) -> Result<Manifest> {
    Manifest::parse(&fs::read_to_string(manifest_path(dir))?)
}

/// Size and mtime of one source file, relative to the data dir.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStamp {
    pub name: String,
    pub len: u64,
    pub modified: SystemTime,
}

/// Identifies the files a dataset was merged from: the canonical data dir,
/// the manifest and every chunk it lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStamp {
    pub dir: PathBuf,
    pub files: Vec<FileStamp>,
}

/// Fails when the dir, the manifest or any listed chunk cannot be stat'ed.
pub fn source_stamp(dir: &Path) -> Result<SourceStamp> {
    let dir = fs::canonicalize(dir)?;
    let manifest = read_manifest(&dir)?;
    let files = std::iter::once(MANIFEST_FILE.to_string())
        .chain(manifest.chunks.into_iter().map(|chunk| chunk.filename))
        .map(|name| -> Result<FileStamp> {
            let meta = fs::metadata(dir.join(&name))?;
            Ok(FileStamp { len: meta.len(), modified: meta.modified()?, name })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(SourceStamp { dir, files })
}

/// Loads every chunk the manifest in `dir` lists and merges them. Chunks are
/// read and parsed in parallel; any failure fails the whole load.
pub fn load_dir(dir: &Path) -> Result<Dataset> {
    let manifest = read_manifest(dir)?;
    let partials = manifest
        .chunks
        .par_iter()
        .map(|chunk| -> Result<Dataset> {
            let json = fs::read_to_string(dir.join(&chunk.filename))?;
            Dataset::from_chunk_json(&chunk.filename, &json)
        })
        .collect::<Result<Vec<_>>>()?;

    let dataset = Dataset::merge(partials);
    info!(dir = %dir.display(), chunks = manifest.chunks.len(), names = dataset.len(), "loaded dataset");
    Ok(dataset)
}
