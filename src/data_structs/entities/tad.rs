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
};
use crate::config::AnnotationConfig;
use crate::data_structs::interval::GenomicInterval;
use crate::data_structs::typedef::ScoreType;
use crate::error::Result;
use crate::impl_genomic_region;

/// Topologically associating domain with the genes and enhancers assigned
/// to it.
///
/// Elements are shared: an element spanning a TAD boundary is referenced
/// by every TAD it touches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tad {
    interval:          GenomicInterval,
    genes:             Vec<Arc<Gene>>,
    enhancers:         Vec<Arc<Enhancer>>,
    high_constraint:   bool,
    high_conservation: bool,
}

impl_genomic_region!(Tad);

impl Tad {
    pub fn new(interval: GenomicInterval) -> Self {
        Self {
            interval,
            genes: Vec::new(),
            enhancers: Vec::new(),
            high_constraint: false,
            high_conservation: false,
        }
    }

    /// Removes all assigned elements and resets the flags.
    pub(crate) fn clear_elements(&mut self) {
        self.genes.clear();
        self.enhancers.clear();
        self.high_constraint = false;
        self.high_conservation = false;
    }

    pub(crate) fn push_gene(
        &mut self,
        gene: Arc<Gene>,
    ) {
        self.genes.push(gene);
    }

    pub(crate) fn push_enhancer(
        &mut self,
        enhancer: Arc<Enhancer>,
    ) {
        self.enhancers.push(enhancer);
    }

    /// Computes the derived flags from the final gene/enhancer lists.
    pub fn finalize(
        &mut self,
        config: &AnnotationConfig,
    ) {
        self.high_constraint = self
            .genes
            .iter()
            .any(|g| g.constraint().unwrap_or(0.0) >= config.constraint_threshold);
        self.high_conservation = self.enhancers.iter().any(|e| {
            e.conservation().unwrap_or(0.0) >= config.conservation_threshold
        });
    }

    pub fn genes(&self) -> &[Arc<Gene>] {
        &self.genes
    }

    pub fn enhancers(&self) -> &[Arc<Enhancer>] {
        &self.enhancers
    }

    pub fn count_genes(&self) -> usize {
        self.genes.len()
    }

    pub fn count_enhancers(&self) -> usize {
        self.enhancers.len()
    }

    /// Contains at least one gene with a high constraint score.
    pub fn high_constraint(&self) -> bool {
        self.high_constraint
    }

    /// Contains at least one enhancer with a high conservation score.
    pub fn high_conservation(&self) -> bool {
        self.high_conservation
    }

    pub fn has_functional_elements(&self) -> bool {
        !self.genes.is_empty() || !self.enhancers.is_empty()
    }

    /// Highest gene constraint score, missing scores count as 0.
    pub fn max_constraint(&self) -> Option<ScoreType> {
        self.genes
            .iter()
            .map(|g| g.constraint().unwrap_or(0.0))
            .reduce(ScoreType::max)
    }

    /// Highest enhancer conservation score, missing scores count as 0.
    pub fn max_conservation(&self) -> Option<ScoreType> {
        self.enhancers
            .iter()
            .map(|e| e.conservation().unwrap_or(0.0))
            .reduce(ScoreType::max)
    }
}

impl FromInterval for Tad {
    fn from_interval(
        interval: GenomicInterval,
        _config: &AnnotationConfig,
    ) -> Result<Self> {
        Ok(Self::new(interval))
    }
}

impl Display for Tad {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{} (genes: {}, enhancers: {})",
            self.interval,
            self.genes.len(),
            self.enhancers.len()
        )
    }
}
