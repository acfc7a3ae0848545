// File: src/persistence.rs
use crate::core::dataset::Dataset;
use crate::error::Result;
use crate::loader::SourceStamp;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

const SNAPSHOT_VERSION: u32 = 2;

/// On-disk form of a merged dataset, so later sessions skip chunk parsing.
#[derive(serde::Serialize, serde::Deserialize)]
struct Snapshot {
    version: u32,
    source: SourceStamp,
    dataset: Dataset,
}

/// Borrowing twin of `Snapshot`; bincode lays both out identically.
#[derive(serde::Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    source: &'a SourceStamp,
    dataset: &'a Dataset,
}

/// Writes the dataset, tagged with the sources it was merged from, to a temp
/// file beside `path`, then renames it into place.
pub fn save_snapshot(dataset: &Dataset, source: &SourceStamp, path: &Path) -> Result<()> {
    let parent_dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        bincode::serialize_into(&mut writer, &SnapshotRef { version: SNAPSHOT_VERSION, source, dataset })?;
        writer.flush()?;
    }
    temp_file.persist(path).map_err(|e| e.error)?;
    info!(path = %path.display(), names = dataset.len(), "saved snapshot");
    Ok(())
}

/// Loads a snapshot built from exactly `source`. A snapshot from another
/// format version or other source files is treated as absent.
pub fn load_snapshot(path: &Path, source: &SourceStamp) -> Result<Option<Dataset>> {
    let file = File::open(path)?;
    let snapshot: Snapshot = bincode::deserialize_from(BufReader::new(file))?;
    if snapshot.version != SNAPSHOT_VERSION {
        info!(path = %path.display(), version = snapshot.version, "ignoring snapshot from another version");
        return Ok(None);
    }
    if snapshot.source != *source {
        info!(path = %path.display(), dir = %snapshot.source.dir.display(), "ignoring snapshot of other sources");
        return Ok(None);
    }
    Ok(Some(snapshot.dataset))
}
