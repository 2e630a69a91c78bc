use std::fmt::{
    self,
    Display,
};
use std::sync::Arc;

use serde::{
    Deserialize,
    Serialize,
};

use super::{
    Enhancer,
    FromInterval,
    Gene,
    Tad,
};
use crate::config::{
    AnnotationConfig,
    DistanceMetric,
};
use crate::data_structs::interval::{
    GenomicInterval,
    Span,
};
use crate::data_structs::typedef::{
    IndicatorType,
    PosType,
};
use crate::error::Result;
use crate::impl_genomic_region;
use crate::utils::{
    gap_len,
    overlap_len,
};

/// Number of entries in the vector returned by [`Cnv::get_features`].
pub const N_CNV_FEATURES: usize = 4;

/// Copy-number variant with the TADs it touches and per-element
/// overlap/distance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cnv {
    interval:           GenomicInterval,
    tads:               Vec<Arc<Tad>>,
    boundary_spanning:  bool,
    gene_overlaps:      Vec<IndicatorType>,
    gene_distances:     Vec<IndicatorType>,
    enhancer_overlaps:  Vec<IndicatorType>,
    enhancer_distances: Vec<IndicatorType>,
}

impl_genomic_region!(Cnv);

impl Cnv {
    pub fn new(interval: GenomicInterval) -> Self {
        Self {
            interval,
            tads: Vec::new(),
            boundary_spanning: false,
            gene_overlaps: Vec::new(),
            gene_distances: Vec::new(),
            enhancer_overlaps: Vec::new(),
            enhancer_distances: Vec::new(),
        }
    }

    /// Records membership in `tad`. A CNV linked to more than one TAD
    /// crosses a TAD boundary.
    pub(crate) fn link_tad(
        &mut self,
        tad: Arc<Tad>,
    ) {
        self.tads.push(tad);
        self.boundary_spanning = self.tads.len() > 1;
    }

    pub(crate) fn clear_tads(&mut self) {
        self.tads.clear();
        self.boundary_spanning = false;
    }

    pub fn tads(&self) -> &[Arc<Tad>] {
        &self.tads
    }

    pub fn boundary_spanning(&self) -> bool {
        self.boundary_spanning
    }

    /// Genes of all linked TADs. A gene shared by two linked TADs appears
    /// twice.
    pub fn get_genes(&self) -> impl Iterator<Item = &Arc<Gene>> {
        self.tads.iter().flat_map(|tad| tad.genes().iter())
    }

    /// Enhancers of all linked TADs, with the same duplication rule as
    /// [`Cnv::get_genes`].
    pub fn get_enhancers(&self) -> impl Iterator<Item = &Arc<Enhancer>> {
        self.tads.iter().flat_map(|tad| tad.enhancers().iter())
    }

    /// Fills the overlap and distance indicator sequences from the
    /// elements of every linked TAD. All sequences are sorted ascending and
    /// empty when the CNV has no TADs.
    pub fn calculate_overlap_and_distances(
        &mut self,
        metric: DistanceMetric,
    ) {
        let span = self.span();
        let (gene_overlaps, gene_distances) =
            indicators(span, self.get_genes().map(|g| g.span()), metric);
        let (enhancer_overlaps, enhancer_distances) =
            indicators(span, self.get_enhancers().map(|e| e.span()), metric);

        self.gene_overlaps = gene_overlaps;
        self.gene_distances = gene_distances;
        self.enhancer_overlaps = enhancer_overlaps;
        self.enhancer_distances = enhancer_distances;
    }

    /// Boolean feature vector: any gene overlapped, any enhancer overlapped,
    /// any linked TAD highly constrained, any linked TAD conserved.
    ///
    /// Only meaningful after [`Cnv::calculate_overlap_and_distances`].
    pub fn get_features(&self) -> [bool; N_CNV_FEATURES] {
        [
            self.gene_overlaps.iter().any(|o| *o > 0),
            self.enhancer_overlaps.iter().any(|o| *o > 0),
            self.tads.iter().any(|tad| tad.high_constraint()),
            self.tads.iter().any(|tad| tad.high_conservation()),
        ]
    }

    pub fn gene_overlaps(&self) -> &[IndicatorType] {
        &self.gene_overlaps
    }

    pub fn gene_distances(&self) -> &[IndicatorType] {
        &self.gene_distances
    }

    pub fn enhancer_overlaps(&self) -> &[IndicatorType] {
        &self.enhancer_overlaps
    }

    pub fn enhancer_distances(&self) -> &[IndicatorType] {
        &self.enhancer_distances
    }
}

fn indicators<I>(
    cnv: (PosType, PosType),
    elements: I,
    metric: DistanceMetric,
) -> (Vec<IndicatorType>, Vec<IndicatorType>)
where
    I: Iterator<Item = (PosType, PosType)>, {
    let (mut overlaps, mut distances): (Vec<_>, Vec<_>) = elements
        .map(|element| {
            let overlap = IndicatorType::from(overlap_len(cnv, element) > 0);
            let distance = match metric {
                DistanceMetric::Binary => overlap,
                DistanceMetric::Genomic => gap_len(cnv, element),
            };
            (overlap, distance)
        })
        .unzip();
    overlaps.sort_unstable();
    distances.sort_unstable();
    (overlaps, distances)
}

impl FromInterval for Cnv {
    fn from_interval(
        interval: GenomicInterval,
        _config: &AnnotationConfig,
    ) -> Result<Self> {
        Ok(Self::new(interval))
    }
}

impl Display for Cnv {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{}", self.interval)?;
        write!(f, "TADS")?;
        for tad in self.tads.iter() {
            write!(f, "\n{}", tad)?;
        }
        Ok(())
    }
}
