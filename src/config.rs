use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};

use crate::apply::Backend;
use crate::cli::Cli;
use crate::constants::defaults;
use crate::entity::filesystem::FilesystemSpec;
use crate::entity::split::SplitSpec;
use crate::errors::SplitError;

/// Layout value in a profile, either `60,30,10` or a YAML list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileLayout {
    Weights(Vec<u32>),
    Single(u32),
    Text(String),
}

/// Optional YAML file carrying defaults for any command-line option
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    #[serde(alias = "device")]
    pub disk: Option<String>,

    #[serde(alias = "partitions")]
    pub count: Option<u32>,

    #[serde(alias = "percentages")]
    pub layout: Option<ProfileLayout>,

    #[serde(alias = "fs_type", alias = "fs")]
    pub fstype: Option<String>,

    #[serde(alias = "fs_types")]
    pub fstypes: Option<Vec<String>>,

    #[serde(alias = "label-prefix")]
    pub label_prefix: Option<String>,

    #[serde(alias = "mount-base")]
    pub mount_base: Option<String>,

    #[serde(alias = "align-mib", alias = "align")]
    pub align_mib: Option<u64>,

    #[serde(default, alias = "create-mounts")]
    pub create_mounts: bool,

    #[serde(default, alias = "mount-now")]
    pub mount_now: bool,

    #[serde(default, alias = "use-parted")]
    pub use_parted: bool,
}

impl Profile {
    pub fn from_yaml(yaml: &str) -> Result<Self, SplitError> {
        let profile: Self = serde_yaml::from_str(yaml)
            .map_err(|err| SplitError::BadProfile(err.to_string()))?;

        if profile.count.is_some() && profile.layout.is_some() {
            return Err(SplitError::BadProfile(
                "count and layout are mutually exclusive".to_string(),
            ));
        }

        if profile.fstype.is_some() && profile.fstypes.is_some() {
            return Err(SplitError::BadProfile(
                "fstype and fstypes are mutually exclusive".to_string(),
            ));
        }

        Ok(profile)
    }

    pub fn from_file(path: &str) -> Result<Self, SplitError> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|err| SplitError::NoSuchFile(err, path.to_string()))?;

        Self::from_yaml(&yaml)
    }

    fn layout_text(&self) -> Option<String> {
        self.layout.as_ref().map(|layout| match layout {
            ProfileLayout::Weights(weights) => weights
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(","),
            ProfileLayout::Single(weight) => weight.to_string(),
            ProfileLayout::Text(text) => text.clone(),
        })
    }
}

/// Everything one invocation needs to know, fixed before any device is
/// touched and passed explicitly from there on.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub disk: String,
    pub split: SplitSpec,
    pub filesystems: FilesystemSpec,
    pub label_prefix: String,
    pub mount_base: String,
    pub align_mib: u64,
    pub create_mounts: bool,
    pub mount_now: bool,
    pub backend: Backend,
    pub assume_yes: bool,
    pub dry_run: bool,
    pub verbose: bool,
    pub snippet_dir: PathBuf,
}

impl Config {
    /// Merges command-line arguments over `profile`. The split and the
    /// filesystem list are validated here, so that malformed input is
    /// rejected before any device is inspected.
    pub fn new(
        cli: &Cli,
        profile: Profile,
        snippet_dir: Option<String>,
    ) -> Result<Self, SplitError> {
        let disk = cli
            .disk
            .clone()
            .or(profile.disk.clone())
            .ok_or_else(|| SplitError::BadArgs("missing disk".to_string()))?;

        // Picking one side as a whole keeps count and layout exclusive
        // even when they come from different sources
        let split = match (cli.count, &cli.layout) {
            (None, None) => SplitSpec::from_choice(profile.count, profile.layout_text().as_deref())?,
            (count, layout) => SplitSpec::from_choice(count, layout.as_deref())?,
        };

        let filesystems = match (&cli.fstype, &cli.fstypes, profile.fstype, profile.fstypes) {
            (Some(_), Some(_), _, _) => {
                return Err(SplitError::BadArgs(
                    "fstype and fstypes are mutually exclusive".to_string(),
                ))
            }
            (Some(fstype), None, _, _) => FilesystemSpec::Single(fstype.clone()),
            (None, Some(fstypes), _, _) => FilesystemSpec::parse_list(fstypes),
            (None, None, Some(fstype), _) => FilesystemSpec::Single(fstype),
            (None, None, None, Some(fstypes)) => FilesystemSpec::List(fstypes),
            (None, None, None, None) => FilesystemSpec::Single(defaults::FSTYPE.to_string()),
        };

        filesystems.distinct(split.partitions())?;

        let align_mib = cli
            .align_mib
            .or(profile.align_mib)
            .unwrap_or(defaults::ALIGN_MIB);

        if align_mib == 0 {
            return Err(SplitError::InvalidSpec("alignment must be at least 1 MiB".to_string()));
        }

        let mount_now = cli.mount_now || profile.mount_now;
        let backend = match cli.use_parted || profile.use_parted {
            true => Backend::Parted,
            false => Backend::Sgdisk,
        };

        Ok(Self {
            disk,
            split,
            filesystems,
            label_prefix: cli
                .label_prefix
                .clone()
                .or(profile.label_prefix)
                .unwrap_or(defaults::LABEL_PREFIX.to_string()),
            mount_base: cli
                .mount_base
                .clone()
                .or(profile.mount_base)
                .unwrap_or(defaults::MOUNT_BASE.to_string()),
            align_mib,
            // Mounting needs the mountpoints
            create_mounts: mount_now || cli.create_mounts || profile.create_mounts,
            mount_now,
            backend,
            assume_yes: cli.yes,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
            snippet_dir: PathBuf::from(
                snippet_dir.unwrap_or(defaults::SNIPPET_DIR.to_string()),
            ),
        })
    }
}
