use crate::entity::action::Action;
use crate::entity::plan::Plan;
use crate::errors::SplitError;
use crate::inspect::DeviceInspector;
use crate::linux::udev;
use crate::utils::shell::Runner;

use super::{
    perform,
    reconcile,
    Executor,
};

/// Writes a new GPT with every planned partition
pub(super) fn partition(
    plan: &Plan,
    executor: &dyn Executor,
    runner: &dyn Runner,
    actions: &mut Vec<Action>,
) -> Result<(), SplitError> {
    let action_create_table = Action::CreatePartitionTable {
        device: plan.disk.clone(),
    };
    perform(actions, action_create_table, || {
        executor.create_table(runner, &plan.disk)
    })?;

    for entry in &plan.entries {
        let action_create_part = Action::CreatePartition {
            device: plan.disk.clone(),
            number: entry.extent.index,
            start_mib: entry.extent.start_mib,
            end_mib: entry.extent.end_mib,
            label: entry.label.clone(),
        };

        perform(actions, action_create_part, || {
            executor.create_partition(runner, plan, entry)
        })?;
    }

    Ok(())
}

/// Waits for the kernel to pick up the new table, then returns
/// the partition devices in plan order.
pub(super) fn settle(
    plan: &Plan,
    runner: &dyn Runner,
    inspector: &dyn DeviceInspector,
    actions: &mut Vec<Action>,
) -> Result<Vec<String>, SplitError> {
    let action_reread = Action::RereadPartitions {
        device: plan.disk.clone(),
    };
    perform(actions, action_reread, || {
        udev::reread_partitions(runner, &plan.disk)
    })?;

    let action_reconcile = Action::ReconcilePartitions {
        device: plan.disk.clone(),
    };
    let partitions = perform(actions, action_reconcile, || reconcile(plan, inspector))?;

    for (entry, partition) in plan.entries.iter().zip(&partitions) {
        log::info!("partition {} is {partition}", entry.extent.index);
    }

    Ok(partitions)
}
