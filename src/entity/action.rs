use serde::{
    Deserialize,
    Serialize,
};

use super::filesystem::Filesystem;

/// A destructive or host-modifying step performed while applying a plan.
/// Performed actions are reported back so that the operator knows
/// what state a disk was left in if a later step fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "createPartitionTable")]
    CreatePartitionTable { device: String },

    #[serde(rename = "createPartition")]
    CreatePartition {
        device: String,
        number: u32,
        #[serde(rename = "startMiB")]
        start_mib: u64,
        #[serde(rename = "endMiB")]
        end_mib: u64,
        label: String,
    },

    #[serde(rename = "rereadPartitions")]
    RereadPartitions { device: String },

    #[serde(rename = "reconcilePartitions")]
    ReconcilePartitions { device: String },

    #[serde(rename = "createFilesystem")]
    CreateFs {
        device: String,
        fs_type: Filesystem,
        label: String,
    },

    #[serde(rename = "mkdirMountpoint")]
    MkdirMountpoint(String),

    #[serde(rename = "mountFilesystem")]
    MountFs {
        src: String,
        dst: String,
        fs_type: Filesystem,
    },

    #[serde(rename = "writeFstabSnippet")]
    WriteSnippet(String),
}
