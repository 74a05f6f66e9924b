use serde::{
    Deserialize,
    Serialize,
};

use crate::errors::SplitError;
use crate::utils::shell::{
    render,
    CmdError,
    Runner,
};

// blkid exits with 2 if it finds nothing on the device
const EXIT_NOTHING_FOUND: i32 = 2;

// For parsing Linux blkid output
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryBlkid {
    #[serde(rename = "UUID")]
    pub uuid: Option<String>,

    #[serde(rename = "TYPE")]
    pub dev_type: Option<String>,

    #[serde(rename = "USAGE")]
    pub usage: Option<String>,

    #[serde(rename = "PTTYPE")]
    pub pt_type: Option<String>,
}

impl EntryBlkid {
    /// Describes the signature found, e.g. `ext4 (filesystem)`
    pub fn signature(&self) -> Option<String> {
        match (&self.dev_type, &self.usage, &self.pt_type) {
            (Some(t), Some(usage), _) => Some(format!("{t} ({usage})")),
            (Some(t), None, _) => Some(t.clone()),
            (None, _, Some(pt)) => Some(format!("{pt} (partition table)")),
            (None, _, None) => None,
        }
    }
}

/// Executes:
/// ```shell
/// blkid -p -s TYPE -s USAGE -s PTTYPE {device}
/// ```
///
/// Low-level probing reads the device itself instead of the blkid cache,
/// so stale cache entries cannot hide a signature.
pub fn probe(runner: &dyn Runner, device: &str) -> Result<EntryBlkid, SplitError> {
    let args = ["-p", "-s", "TYPE", "-s", "USAGE", "-s", "PTTYPE", device];
    let output = runner.output("blkid", &args)?;

    match output.code {
        Some(0) => parse(&output.stdout),
        Some(EXIT_NOTHING_FOUND) => Ok(EntryBlkid::default()),
        Some(code) => Err(SplitError::CmdFailed {
            error: CmdError::ErrExitStatus {
                code,
                stderr: output.stderr.trim().to_string(),
            },
            context: format!("command `{}` failed", render("blkid", &args)),
        }),
        None => Err(SplitError::CmdFailed {
            error: CmdError::ErrSignal,
            context: format!("command `{}` failed", render("blkid", &args)),
        }),
    }
}

/// Executes:
/// ```shell
/// blkid -s UUID {device}
/// ```
pub fn uuid(runner: &dyn Runner, device: &str) -> Result<String, SplitError> {
    let output = runner.exec("blkid", &["-s", "UUID", device])?;

    parse(&output)?
        .uuid
        .ok_or_else(|| SplitError::DiskSplitBug(format!("no UUID found for {device}")))
}

// blkid output looks like:
// /dev/sdb1: UUID="1a2b-3c4d" TYPE="ext4"
fn parse(output: &str) -> Result<EntryBlkid, SplitError> {
    let line = match output.lines().find(|line| !line.trim().is_empty()) {
        Some(line) => line,
        None => return Ok(EntryBlkid::default()),
    };

    let dev_entry = match line.split_once(": ") {
        Some((_dev_name, entry)) => entry,
        None => line,
    };

    // Make dev_entry looks like TOML
    // KEY1="VAL1"
    // KEY2="VAL2"
    let dev_entry: Vec<&str> = dev_entry.split_whitespace().collect();
    let dev_entry = dev_entry.join("\n");

    toml::from_str(&dev_entry)
        .map_err(|err| SplitError::DiskSplitBug(format!("failed to unmarshal blkid output: {err}")))
}
