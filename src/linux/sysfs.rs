use std::fs;
use std::path::Path;

use crate::errors::SplitError;

// sysfs always counts in 512-byte units, whatever the device sector size
const SYSFS_SECTOR_BYTES: u64 = 512;

/// Reads the start of `partition` from `{sys_class_block}/{name}/start`
/// and returns it as a byte offset.
pub fn partition_start(sys_class_block: &Path, partition: &str) -> Result<u64, SplitError> {
    let name = Path::new(partition)
        .file_name()
        .ok_or_else(|| SplitError::NoSuchDevice(partition.to_string()))?;

    let path = sys_class_block.join(name).join("start");
    let start = fs::read_to_string(&path)
        .map_err(|err| SplitError::NoSuchFile(err, path.display().to_string()))?;

    let sectors: u64 = start.trim().parse().map_err(|err| {
        SplitError::DiskSplitBug(format!("bad sysfs start {start:?} for {partition}: {err}"))
    })?;

    Ok(sectors * SYSFS_SECTOR_BYTES)
}
