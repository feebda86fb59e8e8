use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::StorageError;
use crate::store::schema::Snapshot;

/// Write a snapshot as pretty JSON through a temp file, so a crash never
/// leaves a half-written export behind.
pub fn write(path: &Path, snapshot: &Snapshot) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("json.tmp");

    let json = serde_json::to_string_pretty(snapshot)?;
    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;

    fs::rename(&tmp_path, path)?;
    Ok(())
}

pub fn read(path: &Path) -> Result<Snapshot, StorageError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
