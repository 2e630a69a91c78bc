use serde::{
    Deserialize,
    Serialize,
};

use super::FromInterval;
use crate::config::AnnotationConfig;
use crate::data_structs::interval::GenomicInterval;
use crate::data_structs::typedef::ScoreType;
use crate::error::{
    AnnotError,
    Result,
};
use crate::impl_genomic_region;

/// Values that mark a missing score in the source files.
const MISSING_SCORES: [&str; 4] = ["", ".", "NA", "None"];

/// Parses an optional score column. Missing columns and missing-value
/// markers give `None`, anything else must be a number.
pub(crate) fn parse_score(
    value: Option<&str>,
    column: &str,
) -> Result<Option<ScoreType>> {
    match value {
        None => Ok(None),
        Some(v) if MISSING_SCORES.contains(&v) => Ok(None),
        Some(v) => {
            v.parse::<ScoreType>().map(Some).map_err(|e| {
                AnnotError::malformed(format!(
                    "column '{}' value '{}' is not numeric: {}",
                    column, v, e
                ))
            })
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gene {
    interval:   GenomicInterval,
    /// Constraint score (pLI by default).
    constraint: Option<ScoreType>,
}

impl_genomic_region!(Gene);

impl Gene {
    pub fn new(
        interval: GenomicInterval,
        constraint: Option<ScoreType>,
    ) -> Self {
        Self {
            interval,
            constraint,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.interval.field("name")
    }

    pub fn constraint(&self) -> Option<ScoreType> {
        self.constraint
    }
}

impl FromInterval for Gene {
    fn from_interval(
        interval: GenomicInterval,
        config: &AnnotationConfig,
    ) -> Result<Self> {
        let field = config.constraint_field.as_str();
        let constraint = parse_score(interval.field(field), field)?;
        Ok(Self::new(interval, constraint))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enhancer {
    interval:     GenomicInterval,
    /// Conservation score (Phastcon by default).
    conservation: Option<ScoreType>,
}

impl_genomic_region!(Enhancer);

impl Enhancer {
    pub fn new(
        interval: GenomicInterval,
        conservation: Option<ScoreType>,
    ) -> Self {
        Self {
            interval,
            conservation,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.interval.field("ID")
    }

    pub fn conservation(&self) -> Option<ScoreType> {
        self.conservation
    }
}

impl FromInterval for Enhancer {
    fn from_interval(
        interval: GenomicInterval,
        config: &AnnotationConfig,
    ) -> Result<Self> {
        let field = config.conservation_field.as_str();
        let conservation = parse_score(interval.field(field), field)?;
        Ok(Self::new(interval, conservation))
    }
}
