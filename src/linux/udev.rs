use crate::errors::SplitError;
use crate::utils::shell::Runner;

/// Asks the kernel to re-read the partition table of `disk`,
/// then waits for udev to create the new device nodes.
///
/// Executes:
/// ```shell
/// partprobe {disk}
/// udevadm settle
/// ```
pub fn reread_partitions(runner: &dyn Runner, disk: &str) -> Result<(), SplitError> {
    runner.exec("partprobe", &[disk])?;
    runner.exec("udevadm", &["settle"])?;

    Ok(())
}
