use crate::apply::Executor;
use crate::entity::plan::{
    Plan,
    PlanEntry,
};
use crate::errors::SplitError;
use crate::utils::shell::Runner;

/// Partitions disks with GNU `parted`, for hosts without gdisk
#[derive(Debug, Default, Clone, Copy)]
pub struct Parted;

impl Executor for Parted {
    fn program(&self) -> &'static str {
        "parted"
    }

    /// Executes:
    /// ```shell
    /// parted -s {disk} mklabel gpt
    /// ```
    fn create_table(&self, runner: &dyn Runner, disk: &str) -> Result<(), SplitError> {
        runner.exec("parted", &["-s", disk, "mklabel", "gpt"])?;

        Ok(())
    }

    /// Executes:
    /// ```shell
    /// parted -s -a none {disk} unit s mkpart {label} {fs} {start}s {end}s
    /// ```
    ///
    /// The last partition ends at `100%`, which parted maps to the last
    /// usable sector before the backup GPT.
    fn create_partition(
        &self,
        runner: &dyn Runner,
        plan: &Plan,
        entry: &PlanEntry,
    ) -> Result<(), SplitError> {
        let (start, end) = entry.extent.sectors(&plan.geometry);
        let end = match entry.extent.index as usize == plan.len() {
            true => "100%".to_string(),
            false => format!("{end}s"),
        };

        runner.exec(
            "parted",
            &[
                "-s",
                "-a",
                "none",
                &plan.disk,
                "unit",
                "s",
                "mkpart",
                &entry.label,
                entry.filesystem.as_str(),
                &format!("{start}s"),
                &end,
            ],
        )?;

        Ok(())
    }
}

#[test]
fn test_parted_cmds() {
    use crate::entity::filesystem::Filesystem;
    use crate::entity::geometry::DiskGeometry;
    use crate::entity::plan::PartitionExtent;
    use crate::utils::shell::test_utils::FakeRunner;

    let plan = Plan {
        disk: "/dev/nvme0n1".into(),
        geometry: DiskGeometry::new(100 << 20, 4096).unwrap(),
        alignment_mib: 1,
        entries: vec![
            PlanEntry {
                extent: PartitionExtent {
                    index: 1,
                    start_mib: 1,
                    end_mib: 59,
                },
                filesystem: Filesystem::Xfs,
                label: "fast1".into(),
                mountpoint: "/srv/fast1".into(),
            },
            PlanEntry {
                extent: PartitionExtent {
                    index: 2,
                    start_mib: 60,
                    end_mib: 99,
                },
                filesystem: Filesystem::Btrfs,
                label: "fast2".into(),
                mountpoint: "/srv/fast2".into(),
            },
        ],
    };

    let runner = FakeRunner::new();
    Parted.create_table(&runner, &plan.disk).unwrap();
    for entry in &plan.entries {
        Parted.create_partition(&runner, &plan, entry).unwrap();
    }

    assert_eq!(
        vec![
            "parted -s /dev/nvme0n1 mklabel gpt",
            "parted -s -a none /dev/nvme0n1 unit s mkpart fast1 xfs 256s 15359s",
            "parted -s -a none /dev/nvme0n1 unit s mkpart fast2 btrfs 15360s 100%",
        ],
        runner.commands()
    );
}
