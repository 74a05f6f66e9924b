use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use crate::constants::MOUNT_OPTIONS;
use crate::entity::plan::PlanEntry;
use crate::errors::SplitError;
use crate::linux::kernel_name;

/// One partition as it will appear in the fstab snippet
#[derive(Debug, Clone)]
pub struct SnippetRecord<'a> {
    pub entry: &'a PlanEntry,
    pub device: &'a str,
    pub uuid: String,
}

impl SnippetRecord<'_> {
    /// fstab line for this partition, commented out
    pub fn line(&self) -> String {
        format!(
            "# UUID={}  {}  {}  {}  0  {}",
            self.uuid,
            self.entry.mountpoint,
            self.entry.filesystem,
            MOUNT_OPTIONS,
            self.entry.filesystem.fsck_pass(),
        )
    }
}

pub fn snippet_path(dir: &Path, disk: &str) -> PathBuf {
    dir.join(format!("fstab-{}.snippet", kernel_name(disk)))
}

/// Renders the snippet for `disk`. Every line is a comment, so the
/// operator has to review and uncomment records before use.
pub fn render(disk: &str, records: &[SnippetRecord]) -> String {
    let mut out = format!(
        "# fstab records for partitions created on {disk} by disksplit\n\
         # Review, uncomment and append to /etc/fstab to mount at boot\n"
    );

    for record in records {
        let extent = &record.entry.extent;
        out.push_str(&format!(
            "\n# {} ({}, {}-{} MiB)\n{}\n",
            record.device,
            record.entry.label,
            extent.start_mib,
            extent.end_mib,
            record.line(),
        ));
    }

    out
}

/// Writes the rendered snippet to `{dir}/fstab-{disk name}.snippet`,
/// replacing any previous snippet for the same disk.
pub fn write(dir: &Path, disk: &str, records: &[SnippetRecord]) -> Result<PathBuf, SplitError> {
    let path = snippet_path(dir, disk);

    fs::create_dir_all(dir).map_err(|err| {
        SplitError::FileError(err, format!("failed to create snippet directory {}", dir.display()))
    })?;

    fs::write(&path, render(disk, records)).map_err(|err| {
        SplitError::FileError(err, format!("failed to write fstab snippet {}", path.display()))
    })?;

    log::info!("wrote fstab snippet {}", path.display());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::filesystem::Filesystem;
    use crate::entity::plan::PartitionExtent;

    fn entries() -> Vec<PlanEntry> {
        vec![
            PlanEntry {
                extent: PartitionExtent {
                    index: 1,
                    start_mib: 1,
                    end_mib: 599_999,
                },
                filesystem: Filesystem::Ext4,
                label: "data1".into(),
                mountpoint: "/mnt/data1".into(),
            },
            PlanEntry {
                extent: PartitionExtent {
                    index: 2,
                    start_mib: 600_000,
                    end_mib: 999_999,
                },
                filesystem: Filesystem::Xfs,
                label: "data2".into(),
                mountpoint: "/mnt/data2".into(),
            },
        ]
    }

    #[test]
    fn test_snippet_lines() {
        let entries = entries();
        let records = vec![
            SnippetRecord {
                entry: &entries[0],
                device: "/dev/sdb1",
                uuid: "1111-aaaa".into(),
            },
            SnippetRecord {
                entry: &entries[1],
                device: "/dev/sdb2",
                uuid: "2222-bbbb".into(),
            },
        ];

        let snippet = render("/dev/sdb", &records);

        assert!(snippet.contains("# UUID=1111-aaaa  /mnt/data1  ext4  defaults,noatime  0  2\n"));
        assert!(snippet.contains("# UUID=2222-bbbb  /mnt/data2  xfs  defaults,noatime  0  0\n"));
        assert!(snippet.contains("# /dev/sdb2 (data2, 600000-999999 MiB)"));
        assert!(snippet.lines().all(|line| line.is_empty() || line.starts_with('#')));
    }

    #[test]
    fn test_write_snippet() {
        let entries = entries();
        let records = vec![SnippetRecord {
            entry: &entries[0],
            device: "/dev/nvme0n1p1",
            uuid: "1111-aaaa".into(),
        }];

        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("snippets");
        let path = write(&dir, "/dev/nvme0n1", &records).unwrap();

        assert_eq!(dir.join("fstab-nvme0n1.snippet"), path);

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(render("/dev/nvme0n1", &records), written);
    }
}
