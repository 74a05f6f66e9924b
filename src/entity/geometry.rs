use serde::{
    Deserialize,
    Serialize,
};

use crate::errors::SplitError;

pub const MIB: u64 = 1 << 20;

/// Snapshot of a device's addressable size, taken once per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskGeometry {
    #[serde(rename = "totalBytes")]
    total_bytes: u64,

    #[serde(rename = "sectorBytes")]
    sector_bytes: u64,
}

impl DiskGeometry {
    pub fn new(total_bytes: u64, sector_bytes: u64) -> Result<Self, String> {
        if total_bytes == 0 {
            return Err("device reports zero size".to_string());
        }

        if sector_bytes == 0 {
            return Err("device reports zero sector size".to_string());
        }

        // Partitions are laid out in whole MiB
        if MIB % sector_bytes != 0 {
            return Err(format!(
                "sector size of {sector_bytes} bytes does not divide 1 MiB"
            ));
        }

        Ok(Self {
            total_bytes,
            sector_bytes,
        })
    }

    /// Builds geometry from what the device reports:
    /// its logical sector size and number of such sectors.
    pub fn from_sectors(
        device: &str,
        sector_bytes: u64,
        total_sectors: u64,
    ) -> Result<Self, SplitError> {
        let total_bytes = sector_bytes.checked_mul(total_sectors).ok_or_else(|| {
            SplitError::Geometry {
                device: device.to_string(),
                reason: format!(
                    "{total_sectors} sectors of {sector_bytes} bytes overflows"
                ),
            }
        })?;

        Self::new(total_bytes, sector_bytes).map_err(|reason| SplitError::Geometry {
            device: device.to_string(),
            reason,
        })
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn sector_bytes(&self) -> u64 {
        self.sector_bytes
    }

    pub fn total_mib(&self) -> u64 {
        self.total_bytes / MIB
    }

    /// Number of device sectors in one MiB
    pub fn sectors_per_mib(&self) -> u64 {
        MIB / self.sector_bytes
    }
}
