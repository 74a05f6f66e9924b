use serde::{
    Deserialize,
    Serialize,
};

use crate::constants::MAX_PARTITIONS;
use crate::errors::SplitError;

/// How the usable space of a disk is divided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum SplitSpec {
    /// `n` equal partitions, the last absorbing the remainder
    #[serde(rename = "equal")]
    EqualCount { n: u32 },

    /// One partition per weight, weights are percentages summing to 100
    #[serde(rename = "percentage")]
    PercentageList { weights: Vec<u32> },
}

impl SplitSpec {
    pub fn equal(n: u32) -> Result<Self, SplitError> {
        if n == 0 {
            return Err(SplitError::InvalidSpec(
                "partition count must be at least 1".to_string(),
            ));
        }

        if n as usize > MAX_PARTITIONS {
            return Err(SplitError::InvalidSpec(format!(
                "{n} partitions requested, GPT holds at most {MAX_PARTITIONS}"
            )));
        }

        Ok(Self::EqualCount { n })
    }

    pub fn percentages(weights: Vec<u32>) -> Result<Self, SplitError> {
        if weights.is_empty() {
            return Err(SplitError::InvalidSpec("empty layout".to_string()));
        }

        if weights.len() > MAX_PARTITIONS {
            return Err(SplitError::InvalidSpec(format!(
                "layout has {} weights, GPT holds at most {MAX_PARTITIONS}",
                weights.len()
            )));
        }

        for (i, w) in weights.iter().enumerate() {
            if !(1..=100).contains(w) {
                return Err(SplitError::InvalidSpec(format!(
                    "weight #{} ({w}%) is outside 1-100",
                    i + 1
                )));
            }
        }

        let sum: u32 = weights.iter().sum();
        if sum != 100 {
            return Err(SplitError::InvalidSpec(format!(
                "layout sums to {sum}%, expecting 100%"
            )));
        }

        Ok(Self::PercentageList { weights })
    }

    /// Parses a comma-separated layout such as `60,30,10` or `60%,30%,10%`
    pub fn parse_layout(layout: &str) -> Result<Self, SplitError> {
        let mut weights = Vec::new();

        for elem in layout.split(',') {
            let elem = elem.trim();
            let number = elem.strip_suffix('%').unwrap_or(elem).trim();

            let weight = number.parse::<u32>().map_err(|err| {
                SplitError::InvalidSpec(format!("bad layout weight {elem:?}: {err}"))
            })?;

            weights.push(weight);
        }

        Self::percentages(weights)
    }

    /// Builds the split from the two mutually exclusive sources.
    /// Supplying both, or neither, is an input error.
    pub fn from_choice(
        count: Option<u32>,
        layout: Option<&str>,
    ) -> Result<Self, SplitError> {
        match (count, layout) {
            (Some(_), Some(_)) => Err(SplitError::InvalidSpec(
                "count and layout are mutually exclusive".to_string(),
            )),
            (Some(n), None) => Self::equal(n),
            (None, Some(layout)) => Self::parse_layout(layout),
            (None, None) => Err(SplitError::BadArgs(
                "one of count or layout is required".to_string(),
            )),
        }
    }

    /// Number of partitions this split produces
    pub fn partitions(&self) -> usize {
        match self {
            Self::EqualCount { n } => *n as usize,
            Self::PercentageList { weights } => weights.len(),
        }
    }
}

impl std::fmt::Display for SplitSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EqualCount { n } => write!(f, "{n} equal partitions"),
            Self::PercentageList { weights } => {
                let weights: Vec<String> =
                    weights.iter().map(|w| format!("{w}%")).collect();
                write!(f, "layout {}", weights.join(","))
            }
        }
    }
}
