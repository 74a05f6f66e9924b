use crate::entity::filesystem::Filesystem;
use crate::errors::SplitError;
use crate::utils::shell::Runner;

/// Executes:
/// ```shell
/// mkfs.{fs_type} {force flag} -L {label} {device}
/// ```
pub fn create_fs(
    runner: &dyn Runner,
    device: &str,
    fs_type: Filesystem,
    label: &str,
) -> Result<(), SplitError> {
    runner.exec(
        &fs_type.mkfs_program(),
        &[fs_type.force_flag(), "-L", label, device],
    )?;

    Ok(())
}

#[test]
fn test_create_fs() {
    use crate::utils::shell::test_utils::FakeRunner;

    let runner = FakeRunner::new();
    create_fs(&runner, "/dev/sdb1", Filesystem::Ext4, "data1").unwrap();
    create_fs(&runner, "/dev/sdb2", Filesystem::Xfs, "data2").unwrap();
    create_fs(&runner, "/dev/sdb3", Filesystem::Btrfs, "data3").unwrap();

    assert_eq!(
        vec![
            "mkfs.ext4 -F -L data1 /dev/sdb1",
            "mkfs.xfs -f -L data2 /dev/sdb2",
            "mkfs.btrfs -f -L data3 /dev/sdb3",
        ],
        runner.commands()
    );
}
