use std::io::Read;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::typedef::ScoreType;
use crate::error::{
    AnnotError,
    Result,
};
use crate::with_field_fn;

/// How the per-element "distance" indicator of a CNV is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Placeholder metric: `1` if the CNV overlaps the element, `0`
    /// otherwise. This is what the feature vector is built on.
    #[default]
    Binary,
    /// Gap in bp between the CNV and the element, `0` when they overlap.
    /// Defined, but not used by default.
    Genomic,
}

impl FromStr for DistanceMetric {
    type Err = AnnotError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "binary" => Ok(Self::Binary),
            "genomic" => Ok(Self::Genomic),
            other => {
                Err(AnnotError::Config(serde::de::Error::custom(format!(
                    "unknown distance metric '{}'",
                    other
                ))))
            },
        }
    }
}

/// Thresholds and column names used while annotating TADs and CNVs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// Gene column holding the constraint score.
    pub constraint_field:       String,
    /// Enhancer column holding the conservation score.
    pub conservation_field:     String,
    /// A TAD is highly constrained if any gene has a score `>=` this.
    pub constraint_threshold:   ScoreType,
    /// A TAD is conserved if any enhancer has a score `>=` this.
    pub conservation_threshold: ScoreType,
    pub distance_metric:        DistanceMetric,
    /// Only link elements that really overlap a TAD. The sweep itself is
    /// unchanged (consumption and carry-over still follow the touches
    /// rule).
    pub strict_overlap:         bool,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            constraint_field:       "pLI".to_string(),
            conservation_field:     "Phastcon".to_string(),
            constraint_threshold:   0.9,
            conservation_threshold: 0.9,
            distance_metric:        DistanceMetric::Binary,
            strict_overlap:         false,
        }
    }
}

impl AnnotationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a (possibly partial) JSON config. Missing keys take their
    /// default values.
    pub fn from_json<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    with_field_fn!(constraint_field, String);

    with_field_fn!(conservation_field, String);

    with_field_fn!(constraint_threshold, ScoreType);

    with_field_fn!(conservation_threshold, ScoreType);

    with_field_fn!(distance_metric, DistanceMetric);

    with_field_fn!(strict_overlap, bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{"constraint_threshold": 0.5, "distance_metric": "genomic"}"#;
        let config = AnnotationConfig::from_json(json.as_bytes()).unwrap();
        assert_eq!(config.constraint_threshold, 0.5);
        assert_eq!(config.distance_metric, DistanceMetric::Genomic);
        assert_eq!(config.conservation_field, "Phastcon");
        assert!(!config.strict_overlap);
    }

    #[test]
    fn bad_json_is_config_error() {
        let res = AnnotationConfig::from_json("{not json".as_bytes());
        assert!(matches!(res, Err(AnnotError::Config(_))));
    }

    #[test]
    fn builder() {
        let config = AnnotationConfig::new()
            .with_constraint_field("LOEUF".to_string())
            .with_strict_overlap(true);
        assert_eq!(config.constraint_field, "LOEUF");
        assert!(config.strict_overlap);
        assert_eq!("Binary".parse::<DistanceMetric>().unwrap(), DistanceMetric::Binary);
        assert!("manhattan".parse::<DistanceMetric>().is_err());
    }
}
