//! JSON snapshot files.

use crate::document::GridSnapshot;
use crate::error::{LedgerError, Result};
use std::fs;
use std::path::Path;

const MAX_SNAPSHOT_BYTES: u64 = 4 * 1_048_576; // 4 MiB

/// Read a grid snapshot from a JSON file.
pub fn read_snapshot(path: &Path) -> Result<GridSnapshot> {
    let meta = fs::metadata(path)?;
    if meta.len() > MAX_SNAPSHOT_BYTES {
        return Err(LedgerError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!(
                "Refusing to read {}: grid file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_SNAPSHOT_BYTES
            ),
        )));
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write a grid snapshot as pretty-printed JSON.
pub fn write_snapshot(path: &Path, snapshot: &GridSnapshot) -> Result<()> {
    let content = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, content + "\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::CellRecord;

    #[test]
    fn test_write_then_read() {
        let path = std::env::temp_dir().join(format!(
            "ledgergrid_json_test_{}.json",
            std::process::id()
        ));
        let mut snapshot = GridSnapshot::new();
        snapshot.insert(
            "B2".to_string(),
            CellRecord {
                raw_input: "=1+1".to_string(),
                formula: Some("1+1".to_string()),
                computed_value: 2.0,
                style: Default::default(),
            },
        );

        write_snapshot(&path, &snapshot).unwrap();
        assert_eq!(read_snapshot(&path).unwrap(), snapshot);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let path = Path::new("/nonexistent/ledgergrid/grid.json");
        assert!(matches!(read_snapshot(path), Err(LedgerError::Io(_))));
    }
}
