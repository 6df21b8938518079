use std::{fs, path::Path};

use crate::{domain::snapshot::Snapshot, errors::LedgerResult};

/// Writes a snapshot to disk atomically by staging to a temporary file.
pub fn save_snapshot_to_file(snapshot: &Snapshot, path: &Path) -> LedgerResult<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, snapshot.to_json()?)?;
    fs::rename(tmp, path)?;
    Ok(())
}

pub fn load_snapshot_from_file(path: &Path) -> LedgerResult<Snapshot> {
    let data = fs::read_to_string(path)?;
    Snapshot::from_json(&data)
}
