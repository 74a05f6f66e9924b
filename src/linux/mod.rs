pub mod blkid;
pub mod blockdev;
pub mod inspector;
pub mod lsblk;
pub mod mkfs;
pub mod mount;
pub mod parted;
pub mod sgdisk;
pub mod sysfs;
pub mod udev;
pub mod user;

pub use inspector::LinuxInspector;

// See linux/block/partition-generic.c
//
// char *disk_name(struct gendisk *hd, int partno, char *buf)
// {
// 	if (!partno)
// 		snprintf(buf, BDEVNAME_SIZE, "%s", hd->disk_name);
// 	else if (isdigit(hd->disk_name[strlen(hd->disk_name)-1]))
// 		snprintf(buf, BDEVNAME_SIZE, "%sp%d", hd->disk_name, partno);
// 	else
// 		snprintf(buf, BDEVNAME_SIZE, "%s%d", hd->disk_name, partno);
// 	return buf;
// }
//
/// Kernel name of partition `part_number` on disk `name`. Only used
/// for display, actual partition paths are read back from the system.
pub(crate) fn partition_name(name: &str, part_number: u32) -> String {
    if name.ends_with(|c: char| c.is_ascii_digit()) {
        return format!("{name}p{part_number}");
    }

    format!("{name}{part_number}")
}

/// Last path component of a device, e.g. `sdb` for `/dev/sdb`
pub(crate) fn kernel_name(device: &str) -> &str {
    device.rsplit('/').next().unwrap_or(device)
}
