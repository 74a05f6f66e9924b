mod disk;
mod fs;
mod map_err;
mod reconcile;

use std::path::PathBuf;

use crate::config::Config;
use crate::entity::action::Action;
use crate::entity::plan::{
    Plan,
    PlanEntry,
};
use crate::errors::SplitError;
use crate::inspect::DeviceInspector;
use crate::linux::{
    parted,
    sgdisk,
};
use crate::utils::shell::Runner;

use self::map_err::map_err_apply;

pub use self::reconcile::reconcile;

/// Writes a GPT partition table for a [`Plan`] with some partitioning program
pub trait Executor {
    /// Program this executor runs, checked for in `PATH` before use
    fn program(&self) -> &'static str;

    /// Replaces whatever partition table `disk` has with an empty GPT
    fn create_table(&self, runner: &dyn Runner, disk: &str) -> Result<(), SplitError>;

    /// Creates the partition for `entry`, named after its label
    fn create_partition(
        &self,
        runner: &dyn Runner,
        plan: &Plan,
        entry: &PlanEntry,
    ) -> Result<(), SplitError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sgdisk,
    Parted,
}

impl Backend {
    pub fn executor(self) -> Box<dyn Executor> {
        match self {
            Self::Sgdisk => Box::new(sgdisk::Sgdisk),
            Self::Parted => Box::new(parted::Parted),
        }
    }
}

/// Result of a fully applied plan
#[derive(Debug)]
pub struct Applied {
    pub actions: Vec<Action>,

    /// Partition devices, in plan order
    pub partitions: Vec<String>,
    pub snippet: PathBuf,
}

/// Partitions, formats and optionally mounts the disk as planned,
/// then writes the fstab snippet.
///
/// Nothing is rolled back. On failure the returned
/// [`SplitError::ApplyError`] lists the actions already performed.
pub fn apply_plan(
    plan: &Plan,
    config: &Config,
    executor: &dyn Executor,
    runner: &dyn Runner,
    inspector: &dyn DeviceInspector,
) -> Result<Applied, SplitError> {
    let mut actions = Vec::new();

    disk::partition(plan, executor, runner, &mut actions)?;
    let partitions = disk::settle(plan, runner, inspector, &mut actions)?;

    fs::format(plan, &partitions, runner, &mut actions)?;
    if config.create_mounts {
        fs::mkdir_mountpoints(plan, runner, &mut actions)?;
    }
    if config.mount_now {
        fs::mount(plan, &partitions, runner, &mut actions)?;
    }

    let snippet = fs::write_snippet(plan, &partitions, inspector, &config.snippet_dir, &mut actions)?;

    Ok(Applied {
        actions,
        partitions,
        snippet,
    })
}

/// Runs `f` for `action`, recording the action only if it succeeded
fn perform<T>(
    actions: &mut Vec<Action>,
    action: Action,
    f: impl FnOnce() -> Result<T, SplitError>,
) -> Result<T, SplitError> {
    match f() {
        Ok(value) => {
            log::info!("done: {action:?}");
            actions.push(action);

            Ok(value)
        }
        Err(err) => {
            log::error!("failed: {action:?}");

            Err(map_err_apply(err, action, std::mem::take(actions)))
        }
    }
}
