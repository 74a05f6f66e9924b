use crate::entity::filesystem::FilesystemSpec;
use crate::entity::plan::{
    PartitionExtent,
    PlanEntry,
};
use crate::errors::SplitError;

/// Pairs each extent with its filesystem, label and mountpoint.
///
/// Labels and mountpoints are derived from the extent index,
/// e.g. prefix `data` and base `/mnt/data` give `data2` and `/mnt/data2`
/// for the second extent. Labels that the filesystem cannot hold are
/// rejected here, before anything is written.
pub fn assign(
    extents: &[PartitionExtent],
    filesystems: &FilesystemSpec,
    label_prefix: &str,
    mount_base: &str,
) -> Result<Vec<PlanEntry>, SplitError> {
    let filesystems = filesystems.resolve(extents.len())?;

    let mut entries = Vec::with_capacity(extents.len());
    for (extent, filesystem) in extents.iter().zip(filesystems) {
        let label = format!("{label_prefix}{}", extent.index);
        filesystem.check_label(&label)?;

        entries.push(PlanEntry {
            extent: *extent,
            filesystem,
            label,
            mountpoint: format!("{mount_base}{}", extent.index),
        });
    }

    Ok(entries)
}
