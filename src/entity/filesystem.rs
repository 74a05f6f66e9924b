use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

use crate::errors::SplitError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filesystem {
    Ext4,
    Ext3,
    Xfs,
    Btrfs,
}

impl Filesystem {
    pub const ALL: [Filesystem; 4] =
        [Self::Ext4, Self::Ext3, Self::Xfs, Self::Btrfs];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ext4 => "ext4",
            Self::Ext3 => "ext3",
            Self::Xfs => "xfs",
            Self::Btrfs => "btrfs",
        }
    }

    pub fn mkfs_program(&self) -> String {
        format!("mkfs.{}", self.as_str())
    }

    /// Flag telling mkfs to overwrite whatever is on the device
    pub fn force_flag(&self) -> &'static str {
        match self {
            Self::Ext4 | Self::Ext3 => "-F",
            Self::Xfs | Self::Btrfs => "-f",
        }
    }

    /// Longest volume label mkfs accepts for this filesystem
    pub fn max_label_len(&self) -> usize {
        match self {
            Self::Xfs => 12,
            Self::Ext4 | Self::Ext3 => 16,
            Self::Btrfs => 255,
        }
    }

    /// Fails unless `label` fits this filesystem
    pub fn check_label(&self, label: &str) -> Result<(), SplitError> {
        let max = self.max_label_len();
        if label.len() > max {
            return Err(SplitError::LabelTooLong {
                label: label.to_string(),
                fs_type: *self,
                max,
            });
        }

        Ok(())
    }

    /// fsck pass number in fstab. XFS is never checked at boot.
    pub fn fsck_pass(&self) -> u8 {
        match self {
            Self::Xfs => 0,
            _ => 2,
        }
    }
}

impl fmt::Display for Filesystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filesystem {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|fs| fs.as_str() == s.trim())
            .ok_or_else(|| SplitError::UnsupportedFilesystem(s.to_string()))
    }
}

/// Filesystems as given by the user, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilesystemSpec {
    /// Broadcast to every partition
    Single(String),

    /// One per partition, in partition order
    List(Vec<String>),
}

impl FilesystemSpec {
    /// Parses a comma-separated list such as `ext4,xfs,btrfs`
    pub fn parse_list(list: &str) -> Self {
        Self::List(list.split(',').map(|fs| fs.trim().to_string()).collect())
    }

    /// Checks this spec against `partitions` without expanding it, and
    /// returns the distinct filesystems it names, in order of appearance.
    pub fn distinct(&self, partitions: usize) -> Result<Vec<Filesystem>, SplitError> {
        match self {
            Self::Single(fs) => Ok(vec![fs.parse::<Filesystem>()?]),
            Self::List(list) => {
                if list.len() != partitions {
                    return Err(SplitError::CardinalityMismatch {
                        filesystems: list.len(),
                        partitions,
                    });
                }

                let mut distinct = Vec::new();
                for fs in list {
                    let fs = fs.parse::<Filesystem>()?;
                    if !distinct.contains(&fs) {
                        distinct.push(fs);
                    }
                }

                Ok(distinct)
            }
        }
    }

    /// Resolves this spec into exactly `partitions` filesystems
    pub fn resolve(&self, partitions: usize) -> Result<Vec<Filesystem>, SplitError> {
        match self {
            Self::Single(fs) => {
                let fs = fs.parse::<Filesystem>()?;
                Ok(vec![fs; partitions])
            }
            Self::List(list) => {
                if list.len() != partitions {
                    return Err(SplitError::CardinalityMismatch {
                        filesystems: list.len(),
                        partitions,
                    });
                }

                list.iter().map(|fs| fs.parse::<Filesystem>()).collect()
            }
        }
    }
}
