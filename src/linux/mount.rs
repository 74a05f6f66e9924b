use crate::entity::filesystem::Filesystem;
use crate::errors::SplitError;
use crate::utils::shell::Runner;

/// Executes:
/// ```shell
/// mount -t {fs_type} {device} {mountpoint}
/// ```
pub fn mount_fs(
    runner: &dyn Runner,
    device: &str,
    mountpoint: &str,
    fs_type: Filesystem,
) -> Result<(), SplitError> {
    runner.exec("mount", &["-t", fs_type.as_str(), device, mountpoint])?;

    Ok(())
}
