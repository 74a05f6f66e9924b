pub mod defaults {
    pub const ALIGN_MIB: u64 = 1;
    pub const LABEL_PREFIX: &str = "data";
    pub const MOUNT_BASE: &str = "/mnt/data";
    pub const FSTYPE: &str = "ext4";
    pub const SNIPPET_DIR: &str = "/var/tmp";
}

/// Overrides the directory fstab snippets are written to
pub const ENV_SNIPPET_DIR: &str = "DISKSPLIT_SNIPPET_DIR";

/// Smallest partition, in MiB, that an equal split may produce
pub const MIN_EXTENT_MIB: u64 = 10;

/// Entries in a default GPT partition entry array
pub const MAX_PARTITIONS: usize = 128;

pub const SYS_CLASS_BLOCK: &str = "/sys/class/block";

pub const MOUNT_OPTIONS: &str = "defaults,noatime";

// Use programs instead of bindings to avoid API dependencies
pub const INSPECT_COMMANDS: [&str; 3] = ["lsblk", "blkid", "blockdev"];

pub const APPLY_COMMANDS: [&str; 3] = ["partprobe", "udevadm", "mkdir"];
