use serde::{
    Deserialize,
    Serialize,
};

use crate::errors::SplitError;
use crate::utils::shell::Runner;

// For parsing `lsblk --json` output
#[derive(Debug, Serialize, Deserialize)]
struct OutputLsblk {
    blockdevices: Vec<EntryLsblk>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryLsblk {
    pub name: String,

    #[serde(rename = "type")]
    pub dev_type: String,

    pub mountpoint: Option<String>,

    #[serde(default)]
    pub children: Vec<EntryLsblk>,
}

impl EntryLsblk {
    /// Mountpoints of this device and all devices stacked on it
    pub fn mountpoints(&self) -> Vec<&str> {
        let mut mountpoints: Vec<&str> = self.mountpoint.iter().map(String::as_str).collect();
        for child in &self.children {
            mountpoints.extend(child.mountpoints());
        }

        mountpoints
    }

    /// Direct children that are partitions
    pub fn partitions(&self) -> Vec<&EntryLsblk> {
        self.children
            .iter()
            .filter(|child| child.dev_type == "part")
            .collect()
    }
}

/// Executes:
/// ```shell
/// lsblk --json --paths --output NAME,TYPE,MOUNTPOINT {device}
/// ```
pub fn lsblk(runner: &dyn Runner, device: &str) -> Result<EntryLsblk, SplitError> {
    let output = runner.exec(
        "lsblk",
        &["--json", "--paths", "--output", "NAME,TYPE,MOUNTPOINT", device],
    )?;

    parse(&output, device)
}

fn parse(output: &str, device: &str) -> Result<EntryLsblk, SplitError> {
    let parsed: OutputLsblk = serde_json::from_str(output).map_err(|err| {
        SplitError::DiskSplitBug(format!("unexpected lsblk output for {device}: {err}"))
    })?;

    parsed
        .blockdevices
        .into_iter()
        .next()
        .ok_or_else(|| SplitError::NoSuchDevice(device.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTPUT_DISK: &str = r#"{
   "blockdevices": [
      {"name":"/dev/sdb", "type":"disk", "mountpoint":null,
         "children": [
            {"name":"/dev/sdb1", "type":"part", "mountpoint":null},
            {"name":"/dev/sdb2", "type":"part", "mountpoint":null,
               "children": [
                  {"name":"/dev/mapper/vg-data", "type":"lvm", "mountpoint":"/srv"}
               ]
            }
         ]
      }
   ]
}"#;

    #[test]
    fn test_parse_lsblk() {
        let disk = parse(OUTPUT_DISK, "/dev/sdb").unwrap();

        assert_eq!("/dev/sdb", disk.name);
        assert_eq!("disk", disk.dev_type);
        assert_eq!(vec!["/srv"], disk.mountpoints());

        let partitions: Vec<&str> =
            disk.partitions().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(vec!["/dev/sdb1", "/dev/sdb2"], partitions);

        assert!(disk.partitions()[0].mountpoints().is_empty());
        assert_eq!(vec!["/srv"], disk.partitions()[1].mountpoints());
    }

    #[test]
    fn test_parse_lsblk_bad() {
        assert!(matches!(
            parse(r#"{"blockdevices": []}"#, "/dev/sdz"),
            Err(SplitError::NoSuchDevice(_))
        ));

        assert!(matches!(
            parse("lsblk: /dev/sdz: not a block device", "/dev/sdz"),
            Err(SplitError::DiskSplitBug(_))
        ));
    }
}
