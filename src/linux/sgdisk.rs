use crate::apply::Executor;
use crate::entity::plan::{
    Plan,
    PlanEntry,
};
use crate::errors::SplitError;
use crate::utils::shell::Runner;

// GPT type code for Linux filesystem data
const TYPE_LINUX_FS: &str = "8300";

/// Partitions disks with `sgdisk` from gdisk
#[derive(Debug, Default, Clone, Copy)]
pub struct Sgdisk;

/// Argument for `sgdisk --new`. The last partition ends at sgdisk's
/// default, i.e. the last usable sector before the backup GPT.
pub(crate) fn new_partition_arg(plan: &Plan, entry: &PlanEntry) -> String {
    let (start, end) = entry.extent.sectors(&plan.geometry);
    let number = entry.extent.index;

    match number as usize == plan.len() {
        true => format!("--new={number}:{start}:0"),
        false => format!("--new={number}:{start}:{end}"),
    }
}

impl Executor for Sgdisk {
    fn program(&self) -> &'static str {
        "sgdisk"
    }

    /// Executes:
    /// ```shell
    /// sgdisk --zap-all {disk}
    /// sgdisk --clear {disk}
    /// ```
    fn create_table(&self, runner: &dyn Runner, disk: &str) -> Result<(), SplitError> {
        runner.exec("sgdisk", &["--zap-all", disk])?;
        runner.exec("sgdisk", &["--clear", disk])?;

        Ok(())
    }

    /// Executes:
    /// ```shell
    /// sgdisk --new={n}:{start}:{end} --typecode={n}:8300 --change-name={n}:{label} {disk}
    /// ```
    fn create_partition(
        &self,
        runner: &dyn Runner,
        plan: &Plan,
        entry: &PlanEntry,
    ) -> Result<(), SplitError> {
        let number = entry.extent.index;

        runner.exec(
            "sgdisk",
            &[
                &new_partition_arg(plan, entry),
                &format!("--typecode={number}:{TYPE_LINUX_FS}"),
                &format!("--change-name={number}:{}", entry.label),
                &plan.disk,
            ],
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::filesystem::Filesystem;
    use crate::entity::geometry::DiskGeometry;
    use crate::entity::plan::PartitionExtent;
    use crate::utils::shell::test_utils::FakeRunner;

    fn plan() -> Plan {
        let entry = |index, start_mib, end_mib| PlanEntry {
            extent: PartitionExtent {
                index,
                start_mib,
                end_mib,
            },
            filesystem: Filesystem::Ext4,
            label: format!("data{index}"),
            mountpoint: format!("/mnt/data{index}"),
        };

        Plan {
            disk: "/dev/sdb".into(),
            geometry: DiskGeometry::new(1000 << 20, 512).unwrap(),
            alignment_mib: 1,
            entries: vec![entry(1, 1, 333), entry(2, 334, 666), entry(3, 667, 999)],
        }
    }

    #[test]
    fn test_sgdisk_cmds() {
        let plan = plan();
        let runner = FakeRunner::new();

        Sgdisk.create_table(&runner, &plan.disk).unwrap();
        for entry in &plan.entries {
            Sgdisk.create_partition(&runner, &plan, entry).unwrap();
        }

        assert_eq!(
            vec![
                "sgdisk --zap-all /dev/sdb",
                "sgdisk --clear /dev/sdb",
                "sgdisk --new=1:2048:684031 --typecode=1:8300 --change-name=1:data1 /dev/sdb",
                "sgdisk --new=2:684032:1366015 --typecode=2:8300 --change-name=2:data2 /dev/sdb",
                "sgdisk --new=3:1366016:0 --typecode=3:8300 --change-name=3:data3 /dev/sdb",
            ],
            runner.commands()
        );
    }
}
