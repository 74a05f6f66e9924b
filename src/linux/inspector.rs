use std::path::PathBuf;

use super::{
    blkid,
    blockdev,
    lsblk,
    sysfs,
};
use crate::constants::SYS_CLASS_BLOCK;
use crate::errors::SplitError;
use crate::inspect::{
    DeviceClass,
    DeviceInspector,
};
use crate::utils::shell::Runner;

/// Inspects devices with util-linux tools and sysfs
pub struct LinuxInspector<'a> {
    runner: &'a dyn Runner,
    sys_class_block: PathBuf,
}

impl<'a> LinuxInspector<'a> {
    pub fn new(runner: &'a dyn Runner) -> Self {
        Self {
            runner,
            sys_class_block: PathBuf::from(SYS_CLASS_BLOCK),
        }
    }
}

impl DeviceInspector for LinuxInspector<'_> {
    fn geometry(&self, device: &str) -> Result<(u64, u64), SplitError> {
        blockdev::geometry(self.runner, device)
    }

    fn classify(&self, device: &str) -> Result<DeviceClass, SplitError> {
        let entry = lsblk::lsblk(self.runner, device)?;
        Ok(DeviceClass::from(entry.dev_type.as_str()))
    }

    fn is_mounted(&self, device: &str) -> Result<bool, SplitError> {
        let entry = lsblk::lsblk(self.runner, device)?;
        Ok(!entry.mountpoints().is_empty())
    }

    fn signature(&self, device: &str) -> Result<Option<String>, SplitError> {
        Ok(blkid::probe(self.runner, device)?.signature())
    }

    fn children(&self, disk: &str) -> Result<Vec<String>, SplitError> {
        let entry = lsblk::lsblk(self.runner, disk)?;
        Ok(entry.partitions().into_iter().map(|p| p.name.clone()).collect())
    }

    fn start_offset(&self, partition: &str) -> Result<u64, SplitError> {
        sysfs::partition_start(&self.sys_class_block, partition)
    }

    fn uuid(&self, device: &str) -> Result<String, SplitError> {
        blkid::uuid(self.runner, device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::shell::test_utils::FakeRunner;

    const LSBLK: &str = "lsblk --json --paths --output NAME,TYPE,MOUNTPOINT";

    #[test]
    fn test_linux_inspector() {
        let runner = FakeRunner::new()
            .respond(
                &format!("{LSBLK} /dev/sdb"),
                r#"{"blockdevices": [{"name":"/dev/sdb", "type":"disk", "mountpoint":null,
                    "children": [{"name":"/dev/sdb1", "type":"part", "mountpoint":"/mnt/old"}]}]}"#,
            )
            .respond(
                &format!("{LSBLK} /dev/sdb1"),
                r#"{"blockdevices": [{"name":"/dev/sdb1", "type":"part", "mountpoint":"/mnt/old"}]}"#,
            )
            .respond("blockdev --getss --getsize64 /dev/sdb", "512\n10737418240\n");

        let inspector = LinuxInspector::new(&runner);

        assert_eq!(DeviceClass::Disk, inspector.classify("/dev/sdb").unwrap());
        assert_eq!(DeviceClass::Partition, inspector.classify("/dev/sdb1").unwrap());
        assert!(inspector.is_mounted("/dev/sdb").unwrap());
        assert!(inspector.is_mounted("/dev/sdb1").unwrap());
        assert_eq!(vec!["/dev/sdb1"], inspector.children("/dev/sdb").unwrap());
        assert_eq!((512, 20_971_520), inspector.geometry("/dev/sdb").unwrap());
    }
}
