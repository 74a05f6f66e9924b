use clap::Parser;

use crate::errors::SplitError;

#[derive(Debug, Parser)]
#[clap(
    author = "github.com/soyart",
    version,
    about = "Partition, format and label a whole disk in one go"
)]
pub struct Cli {
    /// Profile file providing defaults for any of the options below
    #[arg(short = 'f', long = "file", value_parser = validate_filename)]
    pub profile: Option<String>,

    /// Whole disk to partition, e.g. /dev/sdb. All data on it is destroyed
    #[arg(short = 'd', long = "disk", value_parser = validate_device)]
    pub disk: Option<String>,

    /// Split the disk into this many equal partitions
    #[arg(short = 'c', long = "count", conflicts_with = "layout")]
    pub count: Option<u32>,

    /// Split the disk by percentages, e.g. 60,30,10. Must add up to 100
    #[arg(short = 'l', long = "layout")]
    pub layout: Option<String>,

    /// Filesystem for every partition: ext4, ext3, xfs or btrfs
    #[arg(short = 't', long = "fstype", conflicts_with = "fstypes")]
    pub fstype: Option<String>,

    /// Comma-separated filesystems, one per partition
    #[arg(short = 'T', long = "fstypes")]
    pub fstypes: Option<String>,

    /// Partition and filesystem labels are this prefix plus the partition number
    #[arg(long = "label-prefix")]
    pub label_prefix: Option<String>,

    /// Mountpoints are this path plus the partition number
    #[arg(long = "mount-base")]
    pub mount_base: Option<String>,

    /// Create mountpoint directories
    #[arg(long = "create-mounts")]
    pub create_mounts: bool,

    /// Mount new filesystems right away (implies --create-mounts)
    #[arg(long = "mount-now")]
    pub mount_now: bool,

    /// Partition with parted instead of sgdisk
    #[arg(long = "use-parted")]
    pub use_parted: bool,

    /// Offset of the first partition and alignment, in MiB
    #[arg(long = "align-mib")]
    pub align_mib: Option<u64>,

    /// Do not ask for confirmation before writing to the disk
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,

    /// Dry-run, disksplit will not commit any changes to the disk,
    /// and will just print the plan
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,

    /// Log every external command
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

fn validate_filename(name: &str) -> Result<String, SplitError> {
    if name.is_empty() {
        return Err(SplitError::BadArgs(String::from("empty filename")));
    }

    Ok(name.to_string())
}

fn validate_device(device: &str) -> Result<String, SplitError> {
    if !device.starts_with("/dev/") {
        return Err(SplitError::BadArgs(format!(
            "{device} is not a device path under /dev"
        )));
    }

    Ok(device.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_conflicts() {
        let tests_should_err = vec![
            vec!["disksplit", "-d", "/dev/sdb", "--count", "2", "--layout", "50,50"],
            vec!["disksplit", "-d", "/dev/sdb", "-c", "2", "-t", "ext4", "-T", "ext4,xfs"],
            vec!["disksplit", "-d", "sdb", "-c", "2"],
            vec!["disksplit", "-f", "", "-c", "2"],
        ];

        for args in tests_should_err {
            assert!(Cli::try_parse_from(&args).is_err(), "unexpected ok for {args:?}");
        }

        let cli = Cli::try_parse_from(["disksplit", "-d", "/dev/sdb", "-l", "60,30,10", "-y"])
            .unwrap();
        assert_eq!(Some("/dev/sdb".to_string()), cli.disk);
        assert_eq!(Some("60,30,10".to_string()), cli.layout);
        assert!(cli.yes && !cli.dry_run);
    }
}
