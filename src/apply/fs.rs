use std::path::{
    Path,
    PathBuf,
};

use crate::entity::action::Action;
use crate::entity::plan::Plan;
use crate::errors::SplitError;
use crate::fstab::{
    self,
    SnippetRecord,
};
use crate::inspect::DeviceInspector;
use crate::linux::{
    mkfs,
    mount,
};
use crate::utils::shell::Runner;

use super::perform;

pub(super) fn format(
    plan: &Plan,
    partitions: &[String],
    runner: &dyn Runner,
    actions: &mut Vec<Action>,
) -> Result<(), SplitError> {
    for (entry, partition) in plan.entries.iter().zip(partitions) {
        let action_create_fs = Action::CreateFs {
            device: partition.clone(),
            fs_type: entry.filesystem,
            label: entry.label.clone(),
        };

        perform(actions, action_create_fs, || {
            mkfs::create_fs(runner, partition, entry.filesystem, &entry.label)
        })?;
    }

    Ok(())
}

pub(super) fn mkdir_mountpoints(
    plan: &Plan,
    runner: &dyn Runner,
    actions: &mut Vec<Action>,
) -> Result<(), SplitError> {
    for entry in &plan.entries {
        let action_mkdir = Action::MkdirMountpoint(entry.mountpoint.clone());

        perform(actions, action_mkdir, || {
            runner.exec("mkdir", &["-p", &entry.mountpoint]).map(|_| ())
        })?;
    }

    Ok(())
}

pub(super) fn mount(
    plan: &Plan,
    partitions: &[String],
    runner: &dyn Runner,
    actions: &mut Vec<Action>,
) -> Result<(), SplitError> {
    for (entry, partition) in plan.entries.iter().zip(partitions) {
        let action_mount = Action::MountFs {
            src: partition.clone(),
            dst: entry.mountpoint.clone(),
            fs_type: entry.filesystem,
        };

        perform(actions, action_mount, || {
            mount::mount_fs(runner, partition, &entry.mountpoint, entry.filesystem)
        })?;
    }

    Ok(())
}

/// Looks up the new filesystem UUIDs and writes the fstab snippet
pub(super) fn write_snippet(
    plan: &Plan,
    partitions: &[String],
    inspector: &dyn DeviceInspector,
    dir: &Path,
    actions: &mut Vec<Action>,
) -> Result<PathBuf, SplitError> {
    let path = fstab::snippet_path(dir, &plan.disk);
    let action_write = Action::WriteSnippet(path.display().to_string());

    perform(actions, action_write, || {
        let mut records = Vec::with_capacity(plan.len());
        for (entry, partition) in plan.entries.iter().zip(partitions) {
            records.push(SnippetRecord {
                entry,
                device: partition,
                uuid: inspector.uuid(partition)?,
            });
        }

        fstab::write(dir, &plan.disk, &records)
    })
}
