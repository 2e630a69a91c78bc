//! Numeric feature tables built from annotated CNVs.
//!
//! Three nested feature sets are available:
//!
//! | set                   | columns                                              |
//! |-----------------------|------------------------------------------------------|
//! | `binary`              | gene/enhancer overlap, high pLI TAD, high Phastcon TAD |
//! | `extended`            | + boundary spanning, TAD/element counts              |
//! | `extended_continuous` | + CNV length, max pLI, max Phastcon                  |

use std::fmt::{
    self,
    Display,
};
use std::io::Write;
use std::str::FromStr;

use anyhow::Context;
use itertools::Itertools;
use ndarray::Array2;
use polars::prelude::*;
use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::collection::IntervalCollection;
use crate::data_structs::entities::Cnv;
use crate::data_structs::interval::{
    GenomicRegion,
    Span,
};
use crate::data_structs::typedef::{
    PosType,
    ScoreType,
};
use crate::error::AnnotError;

const BINARY_COLUMNS: [&str; 4] = [
    "gene_overlap",
    "enhancer_overlap",
    "high_pLI",
    "high_Phastcon",
];
const EXTENDED_COLUMNS: [&str; 6] = [
    "boundary_spanning",
    "n_tads",
    "n_genes",
    "n_enhancers",
    "n_overlapped_genes",
    "n_overlapped_enhancers",
];
const CONTINUOUS_COLUMNS: [&str; 3] = ["cnv_length", "max_pLI", "max_Phastcon"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureSet {
    Binary,
    Extended,
    #[default]
    ExtendedContinuous,
}

impl FeatureSet {
    pub const ALL: [FeatureSet; 3] = [
        FeatureSet::Binary,
        FeatureSet::Extended,
        FeatureSet::ExtendedContinuous,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FeatureSet::Binary => "binary",
            FeatureSet::Extended => "extended",
            FeatureSet::ExtendedContinuous => "extended_continuous",
        }
    }

    pub fn columns(&self) -> Vec<&'static str> {
        let mut columns = BINARY_COLUMNS.to_vec();
        if matches!(self, FeatureSet::Extended | FeatureSet::ExtendedContinuous) {
            columns.extend(EXTENDED_COLUMNS);
        }
        if matches!(self, FeatureSet::ExtendedContinuous) {
            columns.extend(CONTINUOUS_COLUMNS);
        }
        columns
    }

    pub fn n_features(&self) -> usize {
        self.columns().len()
    }

    /// Feature vector of one annotated CNV, in [`FeatureSet::columns`]
    /// order.
    pub fn extract(
        &self,
        cnv: &Cnv,
    ) -> Vec<ScoreType> {
        let mut row = Vec::with_capacity(self.n_features());
        row.extend(cnv.get_features().map(as_score));

        if matches!(self, FeatureSet::Extended | FeatureSet::ExtendedContinuous) {
            row.push(as_score(cnv.boundary_spanning()));
            row.push(cnv.tads().len() as ScoreType);
            row.push(cnv.get_genes().count() as ScoreType);
            row.push(cnv.get_enhancers().count() as ScoreType);
            row.push(count_positive(cnv.gene_overlaps()));
            row.push(count_positive(cnv.enhancer_overlaps()));
        }
        if matches!(self, FeatureSet::ExtendedContinuous) {
            row.push(cnv.length() as ScoreType);
            row.push(
                cnv.tads()
                    .iter()
                    .filter_map(|tad| tad.max_constraint())
                    .reduce(ScoreType::max)
                    .unwrap_or(0.0),
            );
            row.push(
                cnv.tads()
                    .iter()
                    .filter_map(|tad| tad.max_conservation())
                    .reduce(ScoreType::max)
                    .unwrap_or(0.0),
            );
        }
        row
    }
}

fn as_score(flag: bool) -> ScoreType {
    if flag {
        1.0
    }
    else {
        0.0
    }
}

fn count_positive<T: Copy + Into<u64>>(values: &[T]) -> ScoreType {
    values.iter().filter(|v| (**v).into() > 0).count() as ScoreType
}

impl FromStr for FeatureSet {
    type Err = AnnotError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        FeatureSet::ALL
            .into_iter()
            .find(|set| set.name() == s.to_lowercase())
            .ok_or_else(|| AnnotError::UnknownFeatureSet(s.to_string()))
    }
}

impl Display for FeatureSet {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One row per CNV, in collection order, with the CNV coordinates kept
/// aside from the numeric features.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    feature_set: FeatureSet,
    coords:      Vec<(String, PosType, PosType)>,
    rows:        Vec<Vec<ScoreType>>,
}

impl FeatureTable {
    pub fn from_cnvs<'a, I>(
        cnvs: I,
        feature_set: FeatureSet,
    ) -> Self
    where
        I: IntoIterator<Item = &'a Cnv>, {
        let (coords, rows) = cnvs
            .into_iter()
            .map(|cnv| {
                (
                    (cnv.chrom().to_string(), cnv.start(), cnv.end()),
                    feature_set.extract(cnv),
                )
            })
            .unzip();
        Self {
            feature_set,
            coords,
            rows,
        }
    }

    pub fn feature_set(&self) -> FeatureSet {
        self.feature_set
    }

    pub fn columns(&self) -> Vec<&'static str> {
        self.feature_set.columns()
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<ScoreType>] {
        &self.rows
    }

    /// Row labels formatted as `chr:start-end`.
    pub fn labels(&self) -> Vec<String> {
        self.coords
            .iter()
            .map(|(chr, start, end)| format!("{}:{}-{}", chr, start, end))
            .collect()
    }

    pub fn column(
        &self,
        name: &str,
    ) -> Option<Vec<ScoreType>> {
        let idx = self.columns().iter().position(|c| *c == name)?;
        Some(self.rows.iter().map(|row| row[idx]).collect())
    }

    /// Feature matrix, `n_rows x n_features`, without coordinates.
    pub fn to_matrix(&self) -> anyhow::Result<Array2<ScoreType>> {
        let shape = (self.n_rows(), self.feature_set.n_features());
        Array2::from_shape_vec(shape, self.rows.concat())
            .context("Feature rows have inconsistent lengths")
    }

    /// Converts the table to a [`DataFrame`]. With `include_coords` the
    /// frame starts with `chr`, `start` and `end` columns.
    pub fn to_dataframe(
        &self,
        include_coords: bool,
    ) -> PolarsResult<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(self.columns().len() + 3);
        if include_coords {
            columns.push(Column::new(
                "chr".into(),
                self.coords
                    .iter()
                    .map(|(chr, ..)| chr.as_str())
                    .collect_vec(),
            ));
            columns.push(Column::new(
                "start".into(),
                self.coords
                    .iter()
                    .map(|(_, start, _)| *start)
                    .collect_vec(),
            ));
            columns.push(Column::new(
                "end".into(),
                self.coords
                    .iter()
                    .map(|(.., end)| *end)
                    .collect_vec(),
            ));
        }
        for (idx, name) in self.columns().into_iter().enumerate() {
            let values = self.rows.iter().map(|row| row[idx]).collect_vec();
            columns.push(Column::new(name.into(), values));
        }
        DataFrame::new(columns)
    }

    /// Writes the table with coordinates as tab-separated text with a
    /// header line.
    pub fn write_tsv<W: Write>(
        &self,
        sink: W,
    ) -> anyhow::Result<()> {
        let mut df = self.to_dataframe(true)?;
        CsvWriter::new(sink)
            .include_header(true)
            .with_separator(b'\t')
            .finish(&mut df)
            .context("Failed to write feature table")?;
        Ok(())
    }
}

/// Builds the feature table of `feature_set` (by name) from all CNVs of
/// `cnvs`.
pub fn create_feature_df(
    cnvs: &IntervalCollection<Cnv>,
    feature_set: &str,
) -> std::result::Result<FeatureTable, AnnotError> {
    let feature_set = FeatureSet::from_str(feature_set)?;
    Ok(FeatureTable::from_cnvs(cnvs.values(), feature_set))
}
