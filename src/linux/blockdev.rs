use crate::errors::SplitError;
use crate::utils::shell::Runner;

/// Executes:
/// ```shell
/// blockdev --getss --getsize64 {device}
/// ```
///
/// Returns the logical sector size and the device size in such sectors.
pub fn geometry(runner: &dyn Runner, device: &str) -> Result<(u64, u64), SplitError> {
    let output = runner
        .exec("blockdev", &["--getss", "--getsize64", device])
        .map_err(|err| SplitError::Geometry {
            device: device.to_string(),
            reason: err.to_string(),
        })?;

    parse(&output).map_err(|reason| SplitError::Geometry {
        device: device.to_string(),
        reason,
    })
}

fn parse(output: &str) -> Result<(u64, u64), String> {
    let values: Vec<u64> = output
        .split_whitespace()
        .map(|v| v.parse::<u64>().map_err(|err| format!("bad blockdev value {v}: {err}")))
        .collect::<Result<_, _>>()?;

    match values.as_slice() {
        [0, _] => Err("device reports zero sector size".to_string()),
        [sector_bytes, size_bytes] => Ok((*sector_bytes, size_bytes / sector_bytes)),
        _ => Err(format!("unexpected blockdev output: {output:?}")),
    }
}

#[test]
fn test_parse_blockdev() {
    assert_eq!(Ok((512, 1_953_525_168)), parse("512\n1000204886016\n"));
    assert_eq!(Ok((4096, 244_190_646)), parse("4096\n1000204886016\n"));

    assert!(parse("512\n").is_err());
    assert!(parse("0\n1024\n").is_err());
    assert!(parse("512\nbig\n").is_err());
}
