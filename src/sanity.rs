use crate::config::Config;
use crate::constants::{
    APPLY_COMMANDS,
    INSPECT_COMMANDS,
};
use crate::errors::SplitError;
use crate::utils::fs::file_exists;
use crate::utils::shell::{
    in_path,
    CmdError,
};

/// Programs needed for this invocation. Dry runs only inspect.
pub fn required_commands(config: &Config) -> Result<Vec<String>, SplitError> {
    let mut commands: Vec<String> = INSPECT_COMMANDS.iter().map(|c| c.to_string()).collect();

    if config.dry_run {
        return Ok(commands);
    }

    commands.push(config.backend.executor().program().to_string());
    commands.extend(APPLY_COMMANDS.iter().map(|c| c.to_string()));

    for fs in config.filesystems.distinct(config.split.partitions())? {
        commands.push(fs.mkfs_program());
    }

    if config.mount_now {
        commands.push("mount".to_string());
    }

    Ok(commands)
}

pub fn check(config: &Config) -> Result<(), SplitError> {
    if !file_exists(&config.disk) {
        return Err(SplitError::NoSuchDevice(config.disk.clone()));
    }

    for cmd in required_commands(config)? {
        if !in_path(&cmd) {
            return Err(SplitError::CmdFailed {
                error: CmdError::ErrSpawn {
                    error: std::io::Error::from(std::io::ErrorKind::NotFound),
                },
                context: format!("command {cmd} not in PATH"),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::apply::Backend;
    use crate::entity::filesystem::FilesystemSpec;
    use crate::entity::split::SplitSpec;

    fn config(dry_run: bool) -> Config {
        Config {
            disk: "/dev/sdb".into(),
            split: SplitSpec::EqualCount { n: 3 },
            filesystems: FilesystemSpec::parse_list("xfs,ext4,xfs"),
            label_prefix: "data".into(),
            mount_base: "/mnt/data".into(),
            align_mib: 1,
            create_mounts: true,
            mount_now: true,
            backend: Backend::Parted,
            assume_yes: false,
            dry_run,
            verbose: false,
            snippet_dir: PathBuf::from("/var/tmp"),
        }
    }

    #[test]
    fn test_required_commands() {
        assert_eq!(
            vec!["lsblk", "blkid", "blockdev"],
            required_commands(&config(true)).unwrap()
        );

        assert_eq!(
            vec![
                "lsblk",
                "blkid",
                "blockdev",
                "parted",
                "partprobe",
                "udevadm",
                "mkdir",
                "mkfs.xfs",
                "mkfs.ext4",
                "mount",
            ],
            required_commands(&config(false)).unwrap()
        );
    }

    #[test]
    fn test_check_missing_device() {
        let mut config = config(true);
        config.disk = "/dev/disksplit-no-such-disk".into();

        assert!(matches!(check(&config), Err(SplitError::NoSuchDevice(_))));
    }
}
