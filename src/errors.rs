use thiserror::Error;

use crate::entity::action::Action;
use crate::entity::filesystem::Filesystem;
use crate::utils::shell::CmdError;

/// Broad failure categories. Only [`ErrorKind::Execution`] may leave
/// partial state on the disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Safety,
    Geometry,
    Planning,
    Execution,
    Bug,
}

#[derive(Debug, Error)]
pub enum SplitError {
    #[error("no such file {1}: {0}")]
    NoSuchFile(std::io::Error, String),

    #[error("file error: {1}: {0}")]
    FileError(std::io::Error, String),

    #[error("no such device: {0}")]
    NoSuchDevice(String),

    #[error("bad cli arguments: {0}")]
    BadArgs(String),

    #[error("bad profile: {0}")]
    BadProfile(String),

    #[error("invalid split: {0}")]
    InvalidSpec(String),

    #[error("unsupported filesystem: {0}")]
    UnsupportedFilesystem(String),

    #[error("got {filesystems} filesystems for {partitions} partitions")]
    CardinalityMismatch {
        filesystems: usize,
        partitions: usize,
    },

    #[error("device {0} is not a whole disk")]
    NotWholeDisk(String),

    #[error("device {0} is mounted")]
    DeviceMounted(String),

    #[error("partition {child} on disk {disk} is mounted")]
    ChildMounted { disk: String, child: String },

    #[error("partition {child} on disk {disk} has a signature: {signature}")]
    ChildHasSignature {
        disk: String,
        child: String,
        signature: String,
    },

    #[error("label {label:?} is longer than the {max} characters {fs_type} allows")]
    LabelTooLong {
        label: String,
        fs_type: Filesystem,
        max: usize,
    },

    #[error("cannot read geometry of {device}: {reason}")]
    Geometry { device: String, reason: String },

    #[error(
        "disk too small: {usable_mib} MiB usable, at least {required_mib} MiB needed"
    )]
    SizeTooSmall { usable_mib: u64, required_mib: u64 },

    #[error("planned layout is inconsistent: {0}")]
    PlanViolation(String),

    #[error("{context}: {error}")]
    CmdFailed { error: CmdError, context: String },

    #[error("expected {expected} partitions on {disk}, found {found}")]
    PartitionCountMismatch {
        disk: String,
        expected: usize,
        found: usize,
    },

    #[error("partition {partition} on {disk} starts at byte {start_bytes}, which matches no planned partition")]
    UnplannedPartition {
        disk: String,
        partition: String,
        start_bytes: u64,
    },

    #[error("failed to apply plan: {error}")]
    ApplyError {
        error: Box<SplitError>,
        action_failed: Box<Action>,
        actions_performed: Vec<Action>,
    },

    #[error("disksplit bug: {0}")]
    DiskSplitBug(String),
}

impl SplitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoSuchFile(..)
            | Self::BadArgs(_)
            | Self::BadProfile(_)
            | Self::InvalidSpec(_)
            | Self::UnsupportedFilesystem(_)
            | Self::CardinalityMismatch { .. }
            | Self::LabelTooLong { .. } => ErrorKind::Input,

            Self::NoSuchDevice(_)
            | Self::NotWholeDisk(_)
            | Self::DeviceMounted(_)
            | Self::ChildMounted { .. }
            | Self::ChildHasSignature { .. } => ErrorKind::Safety,

            Self::Geometry { .. } => ErrorKind::Geometry,

            Self::SizeTooSmall { .. }
            | Self::PlanViolation(_) => ErrorKind::Planning,

            Self::CmdFailed { .. }
            | Self::FileError(..)
            | Self::PartitionCountMismatch { .. }
            | Self::UnplannedPartition { .. }
            | Self::ApplyError { .. } => ErrorKind::Execution,

            Self::DiskSplitBug(_) => ErrorKind::Bug,
        }
    }

    /// Returns true if the disk may already have been modified
    /// when this error was returned.
    pub fn may_have_modified_disk(&self) -> bool {
        matches!(self, Self::ApplyError { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let tests = vec![
            (SplitError::InvalidSpec("sum is 105".into()), ErrorKind::Input),
            (
                SplitError::CardinalityMismatch {
                    filesystems: 2,
                    partitions: 3,
                },
                ErrorKind::Input,
            ),
            (SplitError::NotWholeDisk("/dev/sda1".into()), ErrorKind::Safety),
            (
                SplitError::Geometry {
                    device: "/dev/sda".into(),
                    reason: "zero sectors".into(),
                },
                ErrorKind::Geometry,
            ),
            (
                SplitError::SizeTooSmall {
                    usable_mib: 4,
                    required_mib: 10,
                },
                ErrorKind::Planning,
            ),
            (
                SplitError::PlanViolation("gap after extent #1".into()),
                ErrorKind::Planning,
            ),
            (
                SplitError::LabelTooLong {
                    label: "scratch-volume1".into(),
                    fs_type: Filesystem::Xfs,
                    max: 12,
                },
                ErrorKind::Input,
            ),
            (
                SplitError::PartitionCountMismatch {
                    disk: "/dev/sda".into(),
                    expected: 3,
                    found: 2,
                },
                ErrorKind::Execution,
            ),
        ];

        for (err, expected) in tests {
            assert_eq!(expected, err.kind(), "unexpected kind for {err}");
            assert!(!err.may_have_modified_disk());
        }
    }
}
