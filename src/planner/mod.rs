mod assign;

pub use self::assign::assign;

use crate::config::Config;
use crate::constants::{
    MAX_PARTITIONS,
    MIN_EXTENT_MIB,
};
use crate::entity::geometry::DiskGeometry;
use crate::entity::plan::{
    PartitionExtent,
    Plan,
};
use crate::entity::split::SplitSpec;
use crate::errors::SplitError;

/// Builds the full plan for the disk in `config`
pub fn build(config: &Config, geometry: DiskGeometry) -> Result<Plan, SplitError> {
    let extents = plan(&geometry, &config.split, config.align_mib)?;
    let entries = assign(
        &extents,
        &config.filesystems,
        &config.label_prefix,
        &config.mount_base,
    )?;

    Ok(Plan {
        disk: config.disk.clone(),
        geometry,
        alignment_mib: config.align_mib,
        entries,
    })
}

/// Divides the disk described by `geometry` into extents according to `spec`.
///
/// The first `alignment_mib` MiB are left unused, so that the first extent
/// starts on the alignment boundary. Extents are then laid out back to back,
/// and the last extent always ends on the last whole MiB of the disk,
/// absorbing any rounding remainder left by floor division.
///
/// The result is checked against the layout invariants before it is
/// returned; see [`verify`].
pub fn plan(
    geometry: &DiskGeometry,
    spec: &SplitSpec,
    alignment_mib: u64,
) -> Result<Vec<PartitionExtent>, SplitError> {
    if alignment_mib == 0 {
        return Err(SplitError::InvalidSpec(
            "alignment must be at least 1 MiB".to_string(),
        ));
    }

    if spec.partitions() > MAX_PARTITIONS {
        return Err(SplitError::InvalidSpec(format!(
            "{} partitions requested, GPT holds at most {MAX_PARTITIONS}",
            spec.partitions()
        )));
    }

    let total_mib = geometry.total_mib();
    let usable = total_mib.saturating_sub(alignment_mib);
    if usable == 0 {
        return Err(SplitError::SizeTooSmall {
            usable_mib: 0,
            required_mib: MIN_EXTENT_MIB,
        });
    }

    let extents = match spec {
        SplitSpec::EqualCount { n } => {
            equal(total_mib, usable, alignment_mib, u64::from(*n))?
        }
        SplitSpec::PercentageList { weights } => {
            percentage(total_mib, usable, alignment_mib, weights)?
        }
    };

    verify(&extents, total_mib, alignment_mib)?;

    Ok(extents)
}

fn equal(
    total_mib: u64,
    usable: u64,
    alignment_mib: u64,
    n: u64,
) -> Result<Vec<PartitionExtent>, SplitError> {
    if n == 0 {
        return Err(SplitError::InvalidSpec(
            "partition count must be at least 1".to_string(),
        ));
    }

    let each = usable / n;
    if each < MIN_EXTENT_MIB {
        return Err(SplitError::SizeTooSmall {
            usable_mib: usable,
            required_mib: MIN_EXTENT_MIB * n,
        });
    }

    let extents = (1..=n)
        .map(|i| {
            let start_mib = alignment_mib + (i - 1) * each;
            let end_mib = match i == n {
                true => total_mib - 1,
                false => start_mib + each - 1,
            };

            PartitionExtent {
                index: i as u32,
                start_mib,
                end_mib,
            }
        })
        .collect();

    Ok(extents)
}

// Each span is computed from the original usable size, not from what is
// left over, so rounding error only ever lands on the last extent.
fn percentage(
    total_mib: u64,
    usable: u64,
    alignment_mib: u64,
    weights: &[u32],
) -> Result<Vec<PartitionExtent>, SplitError> {
    let sum: u32 = weights.iter().sum();
    if weights.is_empty() || sum != 100 {
        return Err(SplitError::InvalidSpec(format!(
            "layout sums to {sum}%, expecting 100%"
        )));
    }

    let last = weights.len() - 1;
    let mut extents = Vec::with_capacity(weights.len());
    let mut start_mib = alignment_mib;

    for (i, weight) in weights.iter().enumerate() {
        let span = usable * u64::from(*weight) / 100;

        let end_mib = match i == last {
            true => total_mib - 1,
            false => {
                if span <= 1 {
                    return Err(SplitError::InvalidSpec(format!(
                        "partition #{} ({weight}%) would be {span} MiB",
                        i + 1,
                    )));
                }

                start_mib + span - 1
            }
        };

        extents.push(PartitionExtent {
            index: i as u32 + 1,
            start_mib,
            end_mib,
        });

        start_mib = end_mib + 1;
    }

    Ok(extents)
}

/// Checks that `extents` are numbered 1..=N, ordered, disjoint and gap-free,
/// start at `alignment_mib` and end at `total_mib - 1`.
pub fn verify(
    extents: &[PartitionExtent],
    total_mib: u64,
    alignment_mib: u64,
) -> Result<(), SplitError> {
    let (first, last) = match (extents.first(), extents.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(SplitError::PlanViolation(
                "planner produced no extents".to_string(),
            ));
        }
    };

    if first.start_mib != alignment_mib {
        return Err(SplitError::PlanViolation(format!(
            "first extent starts at {} MiB, expecting {alignment_mib} MiB",
            first.start_mib
        )));
    }

    if last.end_mib + 1 != total_mib {
        return Err(SplitError::PlanViolation(format!(
            "last extent ends at {} MiB, expecting {} MiB",
            last.end_mib,
            total_mib - 1,
        )));
    }

    for (i, extent) in extents.iter().enumerate() {
        if extent.index as usize != i + 1 {
            return Err(SplitError::PlanViolation(format!(
                "extent #{} has index {}",
                i + 1,
                extent.index
            )));
        }

        if extent.start_mib > extent.end_mib {
            return Err(SplitError::PlanViolation(format!(
                "extent #{} starts after it ends ({} > {})",
                extent.index, extent.start_mib, extent.end_mib
            )));
        }
    }

    for pair in extents.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if prev.end_mib + 1 != next.start_mib {
            return Err(SplitError::PlanViolation(format!(
                "extents #{} and #{} are not contiguous ({} -> {})",
                prev.index, next.index, prev.end_mib, next.start_mib
            )));
        }
    }

    Ok(())
}
