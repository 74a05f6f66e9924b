use std::cell::RefCell;
use std::collections::{
    HashMap,
    HashSet,
};

use super::{
    DeviceClass,
    DeviceInspector,
};
use crate::errors::SplitError;

/// In-memory inspector for tests. Unknown devices are reported
/// as missing, so a test only sees the devices it declared.
#[derive(Debug, Default)]
pub struct FakeInspector {
    pub geometry: (u64, u64),
    pub classes: HashMap<String, DeviceClass>,
    pub mounted: HashSet<String>,
    pub signatures: HashMap<String, String>,
    pub children: Vec<String>,
    pub starts: HashMap<String, u64>,
    pub uuids: HashMap<String, String>,

    /// Every query made, as `method device`
    pub queries: RefCell<Vec<String>>,
}

impl FakeInspector {
    pub fn disk(device: &str, sector_bytes: u64, total_sectors: u64) -> Self {
        Self {
            geometry: (sector_bytes, total_sectors),
            classes: HashMap::from([(device.to_string(), DeviceClass::Disk)]),
            ..Default::default()
        }
    }

    /// Adds partitions `(path, start byte offset)` to the disk
    pub fn with_children(mut self, children: &[(&str, u64)]) -> Self {
        for (path, start) in children {
            self.classes.insert(path.to_string(), DeviceClass::Partition);
            self.children.push(path.to_string());
            self.starts.insert(path.to_string(), *start);
            self.uuids
                .insert(path.to_string(), format!("uuid-{}", path.trim_start_matches("/dev/")));
        }

        self
    }

    pub fn queried(&self, prefix: &str) -> bool {
        self.queries.borrow().iter().any(|q| q.starts_with(prefix))
    }

    fn record(&self, method: &str, device: &str) {
        self.queries.borrow_mut().push(format!("{method} {device}"));
    }

    fn missing(device: &str) -> SplitError {
        SplitError::NoSuchDevice(device.to_string())
    }
}

impl DeviceInspector for FakeInspector {
    fn geometry(&self, device: &str) -> Result<(u64, u64), SplitError> {
        self.record("geometry", device);
        Ok(self.geometry)
    }

    fn classify(&self, device: &str) -> Result<DeviceClass, SplitError> {
        self.record("classify", device);
        self.classes.get(device).cloned().ok_or_else(|| Self::missing(device))
    }

    fn is_mounted(&self, device: &str) -> Result<bool, SplitError> {
        self.record("is_mounted", device);
        Ok(self.mounted.contains(device))
    }

    fn signature(&self, device: &str) -> Result<Option<String>, SplitError> {
        self.record("signature", device);
        Ok(self.signatures.get(device).cloned())
    }

    fn children(&self, disk: &str) -> Result<Vec<String>, SplitError> {
        self.record("children", disk);
        Ok(self.children.clone())
    }

    fn start_offset(&self, partition: &str) -> Result<u64, SplitError> {
        self.record("start_offset", partition);
        self.starts.get(partition).copied().ok_or_else(|| Self::missing(partition))
    }

    fn uuid(&self, device: &str) -> Result<String, SplitError> {
        self.record("uuid", device);
        self.uuids.get(device).cloned().ok_or_else(|| Self::missing(device))
    }
}
