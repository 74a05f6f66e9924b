use crate::errors::SplitError;
use crate::inspect::{
    DeviceClass,
    DeviceInspector,
};

/// Refuses to go on unless `disk` is a whole disk that is safe to wipe:
/// not mounted, and with no partition that is mounted or carries any
/// filesystem, volume manager or partition table signature.
///
/// Checks short-circuit in that order, so a partition node is rejected
/// before its mount state is looked at.
pub fn validate(disk: &str, inspector: &dyn DeviceInspector) -> Result<(), SplitError> {
    match inspector.classify(disk)? {
        DeviceClass::Disk => {}
        class => {
            log::debug!("{disk} is a {class}, not a disk");
            return Err(SplitError::NotWholeDisk(disk.to_string()));
        }
    }

    if inspector.is_mounted(disk)? {
        return Err(SplitError::DeviceMounted(disk.to_string()));
    }

    for child in inspector.children(disk)? {
        if inspector.is_mounted(&child)? {
            return Err(SplitError::ChildMounted {
                disk: disk.to_string(),
                child,
            });
        }

        if let Some(signature) = inspector.signature(&child)? {
            return Err(SplitError::ChildHasSignature {
                disk: disk.to_string(),
                child,
                signature,
            });
        }
    }

    log::info!("{disk} is safe to partition");

    Ok(())
}
