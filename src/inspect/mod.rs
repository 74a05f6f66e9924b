#[cfg(test)]
pub mod fake;

use std::fmt;

use crate::entity::geometry::DiskGeometry;
use crate::errors::SplitError;

/// Kind of block device, as reported by the system
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceClass {
    Disk,
    Partition,
    Other(String),
}

impl From<&str> for DeviceClass {
    fn from(s: &str) -> Self {
        match s.trim() {
            "disk" => Self::Disk,
            "part" => Self::Partition,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disk => f.write_str("disk"),
            Self::Partition => f.write_str("part"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

/// Read-only queries about block devices on the host.
///
/// Nothing here modifies a device, so an inspector may be used freely
/// in dry-run mode.
pub trait DeviceInspector {
    /// Logical sector size in bytes, and device size in such sectors
    fn geometry(&self, device: &str) -> Result<(u64, u64), SplitError>;

    fn classify(&self, device: &str) -> Result<DeviceClass, SplitError>;

    /// True if `device`, or anything on it, is mounted
    fn is_mounted(&self, device: &str) -> Result<bool, SplitError>;

    /// Describes any filesystem, volume manager or partition table
    /// signature found on `device`, or None if it is blank.
    fn signature(&self, device: &str) -> Result<Option<String>, SplitError>;

    /// Partition device paths on `disk`, in the order the system lists them
    fn children(&self, disk: &str) -> Result<Vec<String>, SplitError>;

    /// Byte offset at which `partition` starts on its disk
    fn start_offset(&self, partition: &str) -> Result<u64, SplitError>;

    fn uuid(&self, device: &str) -> Result<String, SplitError>;
}

/// Reads `device` geometry once for this invocation
pub fn read_geometry(
    inspector: &dyn DeviceInspector,
    device: &str,
) -> Result<DiskGeometry, SplitError> {
    let (sector_bytes, total_sectors) = inspector.geometry(device)?;
    let geometry = DiskGeometry::from_sectors(device, sector_bytes, total_sectors)?;

    log::debug!(
        "geometry of {device}: {} bytes ({} MiB), {}-byte sectors",
        geometry.total_bytes(),
        geometry.total_mib(),
        geometry.sector_bytes(),
    );

    Ok(geometry)
}

#[cfg(test)]
mod tests {
    use super::fake::FakeInspector;
    use super::*;

    #[test]
    fn test_device_class() {
        assert_eq!(DeviceClass::Disk, DeviceClass::from("disk"));
        assert_eq!(DeviceClass::Partition, DeviceClass::from("part\n"));
        assert_eq!(DeviceClass::Other("rom".into()), DeviceClass::from("rom"));
    }

    #[test]
    fn test_read_geometry() {
        let inspector = FakeInspector::disk("/dev/sdb", 512, 2_048_000);
        let geometry = read_geometry(&inspector, "/dev/sdb").unwrap();
        assert_eq!(1000, geometry.total_mib());

        let inspector = FakeInspector::disk("/dev/sdb", 512, 0);
        assert!(matches!(
            read_geometry(&inspector, "/dev/sdb"),
            Err(SplitError::Geometry { .. })
        ));
    }
}
