use crate::entity::geometry::MIB;
use crate::entity::plan::Plan;
use crate::errors::SplitError;
use crate::inspect::DeviceInspector;

/// Matches the partitions the system now lists on the disk to planned
/// entries by start offset, and returns their device paths in plan order.
///
/// Device names are never guessed from the disk name, and any partition
/// that does not line up with the plan is an error.
pub fn reconcile(
    plan: &Plan,
    inspector: &dyn DeviceInspector,
) -> Result<Vec<String>, SplitError> {
    let children = inspector.children(&plan.disk)?;
    if children.len() != plan.len() {
        return Err(SplitError::PartitionCountMismatch {
            disk: plan.disk.clone(),
            expected: plan.len(),
            found: children.len(),
        });
    }

    let mut matched: Vec<Option<String>> = vec![None; plan.len()];

    for child in children {
        let start_bytes = inspector.start_offset(&child)?;

        let position = plan
            .entries
            .iter()
            .position(|entry| entry.extent.start_mib * MIB == start_bytes);

        match position {
            Some(i) if matched[i].is_none() => {
                log::debug!("{child} is planned partition {}", plan.entries[i].extent.index);
                matched[i] = Some(child);
            }
            _ => {
                return Err(SplitError::UnplannedPartition {
                    disk: plan.disk.clone(),
                    partition: child,
                    start_bytes,
                })
            }
        }
    }

    // Counts agree and every child matched a distinct entry
    Ok(matched.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::filesystem::Filesystem;
    use crate::entity::geometry::DiskGeometry;
    use crate::entity::plan::{
        PartitionExtent,
        PlanEntry,
    };
    use crate::inspect::fake::FakeInspector;

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
            disk: "/dev/nvme0n1".into(),
            geometry: DiskGeometry::new(300 << 20, 512).unwrap(),
            alignment_mib: 1,
            entries: vec![entry(1, 1, 99), entry(2, 100, 199), entry(3, 200, 299)],
        }
    }

    #[test]
    fn test_reconcile_out_of_order() {
        let inspector = FakeInspector::disk("/dev/nvme0n1", 512, 614_400).with_children(&[
            ("/dev/nvme0n1p3", 200 * MIB),
            ("/dev/nvme0n1p1", MIB),
            ("/dev/nvme0n1p2", 100 * MIB),
        ]);

        assert_eq!(
            vec!["/dev/nvme0n1p1", "/dev/nvme0n1p2", "/dev/nvme0n1p3"],
            reconcile(&plan(), &inspector).unwrap()
        );
    }

    #[test]
    fn test_reconcile_errors() {
        let inspector = FakeInspector::disk("/dev/nvme0n1", 512, 614_400)
            .with_children(&[("/dev/nvme0n1p1", MIB), ("/dev/nvme0n1p2", 100 * MIB)]);

        assert!(matches!(
            reconcile(&plan(), &inspector),
            Err(SplitError::PartitionCountMismatch {
                expected: 3,
                found: 2,
                ..
            })
        ));

        let inspector = FakeInspector::disk("/dev/nvme0n1", 512, 614_400).with_children(&[
            ("/dev/nvme0n1p1", MIB),
            ("/dev/nvme0n1p2", 100 * MIB),
            ("/dev/nvme0n1p3", 150 * MIB),
        ]);

        assert!(matches!(
            reconcile(&plan(), &inspector),
            Err(SplitError::UnplannedPartition { start_bytes, .. }) if start_bytes == 150 * MIB
        ));

        let inspector = FakeInspector::disk("/dev/nvme0n1", 512, 614_400).with_children(&[
            ("/dev/nvme0n1p1", MIB),
            ("/dev/nvme0n1p2", MIB),
            ("/dev/nvme0n1p3", 200 * MIB),
        ]);

        assert!(matches!(
            reconcile(&plan(), &inspector),
            Err(SplitError::UnplannedPartition { .. })
        ));
    }
}
