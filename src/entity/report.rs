use serde_json::json;

use super::action::Action;
use super::plan::Plan;

#[derive(Debug)]
pub struct Report {
    pub dry_run: bool,
    pub plan: Plan,
    pub actions: Vec<Action>,

    /// Partition devices in plan order, known only after applying
    pub partitions: Vec<String>,
    pub snippet: Option<String>,
    pub duration: std::time::Duration,
}

impl Report {
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "disk": self.plan.disk,
            "dryRun": self.dry_run,
            "plan": self.plan,
            "actions": self.actions,
            "partitions": self.partitions,
            "fstabSnippet": self.snippet,
            "elaspedTime": self.duration,
        })
    }

    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_json_string())
    }
}

#[ignore = "Ignored because just dummy print JSON"]
#[test]
// Dummy function to see JSON result
fn test_json_report() {
    use super::filesystem::Filesystem;
    use super::geometry::DiskGeometry;
    use super::plan::{
        PartitionExtent,
        PlanEntry,
    };

    let plan = Plan {
        disk: "/dev/sdb".into(),
        geometry: DiskGeometry::new(1 << 30, 512).unwrap(),
        alignment_mib: 1,
        entries: vec![PlanEntry {
            extent: PartitionExtent {
                index: 1,
                start_mib: 1,
                end_mib: 1023,
            },
            filesystem: Filesystem::Ext4,
            label: "data1".into(),
            mountpoint: "/mnt/data1".into(),
        }],
    };

    let report = Report {
        dry_run: false,
        plan,
        actions: vec![
            Action::CreatePartitionTable {
                device: "/dev/sdb".into(),
            },
            Action::CreateFs {
                device: "/dev/sdb1".into(),
                fs_type: Filesystem::Ext4,
                label: "data1".into(),
            },
        ],
        partitions: vec!["/dev/sdb1".into()],
        snippet: Some("/var/tmp/fstab-sdb.snippet".into()),
        duration: std::time::Duration::from_secs(20),
    };

    println!("{}", report.to_json_string());
}

#[test]
fn test_report_json_fields() {
    use super::geometry::DiskGeometry;

    let report = Report {
        dry_run: true,
        plan: Plan {
            disk: "/dev/sdb".into(),
            geometry: DiskGeometry::new(1 << 30, 512).unwrap(),
            alignment_mib: 1,
            entries: vec![],
        },
        actions: vec![],
        partitions: vec![],
        snippet: None,
        duration: std::time::Duration::from_millis(5),
    };

    let json = report.to_json();
    assert_eq!("/dev/sdb", json["disk"]);
    assert_eq!(true, json["dryRun"]);
    assert!(json["fstabSnippet"].is_null());
    assert_eq!(1, json["plan"]["alignMiB"]);
}
