use serde::{
    Deserialize,
    Serialize,
};

use super::filesystem::Filesystem;
use super::geometry::DiskGeometry;
use crate::linux::partition_name;

/// A contiguous, inclusive range of MiB destined to become one partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionExtent {
    pub index: u32,

    #[serde(rename = "startMiB")]
    pub start_mib: u64,

    #[serde(rename = "endMiB")]
    pub end_mib: u64,
}

impl PartitionExtent {
    pub fn size_mib(&self) -> u64 {
        self.end_mib - self.start_mib + 1
    }

    /// First and last device sector covered by this extent
    pub fn sectors(&self, geometry: &DiskGeometry) -> (u64, u64) {
        let per_mib = geometry.sectors_per_mib();
        (self.start_mib * per_mib, (self.end_mib + 1) * per_mib - 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    #[serde(flatten)]
    pub extent: PartitionExtent,

    #[serde(rename = "fstype")]
    pub filesystem: Filesystem,

    pub label: String,
    pub mountpoint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub disk: String,
    pub geometry: DiskGeometry,

    #[serde(rename = "alignMiB")]
    pub alignment_mib: u64,

    pub entries: Vec<PlanEntry>,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Human-readable table shown before confirmation
    pub fn table(&self) -> String {
        let mut lines = vec![
            format!(
                "disk {} ({} MiB, {}-byte sectors), GPT, {} partitions",
                self.disk,
                self.geometry.total_mib(),
                self.geometry.sector_bytes(),
                self.len(),
            ),
            format!(
                "{:>3}  {:<16} {:>12} {:>12} {:>12}  {:<6} {:<12} {}",
                "#", "DEVICE", "START(MiB)", "END(MiB)", "SIZE(MiB)", "FS", "LABEL", "MOUNT"
            ),
        ];

        for entry in &self.entries {
            let extent = &entry.extent;
            lines.push(format!(
                "{:>3}  {:<16} {:>12} {:>12} {:>12}  {:<6} {:<12} {}",
                extent.index,
                partition_name(&self.disk, extent.index),
                extent.start_mib,
                extent.end_mib,
                extent.size_mib(),
                entry.filesystem,
                entry.label,
                entry.mountpoint,
            ));
        }

        lines.join("\n")
    }
}
