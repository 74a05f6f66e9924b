use std::io::{
    self,
    BufRead,
    Write,
};

use colored::Colorize;

use crate::entity::plan::Plan;
use crate::errors::SplitError;

const CONFIRMATION: &str = "yes";

/// Shows the plan on stdout and asks the operator on stdin
pub fn confirm(plan: &Plan) -> Result<bool, SplitError> {
    ask(plan, &mut io::stdin().lock(), &mut io::stdout())
}

/// Only the exact answer `yes` confirms
fn ask(plan: &Plan, input: &mut impl BufRead, output: &mut impl Write) -> Result<bool, SplitError> {
    let prompt = format!(
        "{}\n\n{}\nType '{CONFIRMATION}' to continue: ",
        plan.table(),
        format!("WARN: all data on {} will be destroyed", plan.disk).red().bold(),
    );

    output
        .write_all(prompt.as_bytes())
        .and_then(|_| output.flush())
        .map_err(|err| SplitError::FileError(err, "failed to write prompt".to_string()))?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .map_err(|err| SplitError::FileError(err, "failed to read confirmation".to_string()))?;

    Ok(answer.trim_end_matches(['\n', '\r']) == CONFIRMATION)
}

#[test]
fn test_ask() {
    use crate::entity::geometry::DiskGeometry;

    let plan = Plan {
        disk: "/dev/sdb".into(),
        geometry: DiskGeometry::new(100 << 20, 512).unwrap(),
        alignment_mib: 1,
        entries: vec![],
    };

    let tests = vec![
        ("yes\n", true),
        ("yes", true),
        ("yes\r\n", true),
        ("y\n", false),
        ("YES\n", false),
        (" yes\n", false),
        ("\n", false),
        ("", false),
    ];

    for (answer, expected) in tests {
        let mut output = Vec::new();
        let confirmed = ask(&plan, &mut answer.as_bytes(), &mut output).unwrap();

        assert_eq!(expected, confirmed, "unexpected result for {answer:?}");
        assert!(String::from_utf8(output).unwrap().contains("/dev/sdb"));
    }
}
