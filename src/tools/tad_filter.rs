//! Grouping of annotated TADs by the scores of their elements.

use std::fmt::{
    self,
    Display,
};
use std::path::{
    Path,
    PathBuf,
};

use log::info;

use crate::data_structs::collection::IntervalCollection;
use crate::data_structs::entities::Tad;
use crate::data_structs::typedef::ScoreType;
use crate::io::bed::write_bed_file;

pub const SCORE_THRESHOLDS: [ScoreType; 5] = [1.0, 0.9, 0.5, 0.1, 0.0];

/// TADs with at least one element scoring `>= threshold`.
#[derive(Debug, Clone)]
pub struct ThresholdBin<'a> {
    pub threshold: ScoreType,
    pub tads:      Vec<&'a Tad>,
}

#[derive(Debug, Clone)]
pub struct TadFilterReport<'a> {
    /// One bin per threshold, by gene constraint score.
    pub constrained:      Vec<ThresholdBin<'a>>,
    /// One bin per threshold, by enhancer conservation score.
    pub conserved:        Vec<ThresholdBin<'a>>,
    /// TADs without any gene or enhancer.
    pub without_elements: Vec<&'a Tad>,
}

/// Bins the TADs of `tads` for each of `thresholds`. Missing scores count
/// as 0. A TAD without genes is never in a constraint bin, one without
/// enhancers never in a conservation bin.
pub fn filter_tads<'a>(
    tads: &'a IntervalCollection<Tad>,
    thresholds: &[ScoreType],
) -> TadFilterReport<'a> {
    let mut constrained = thresholds
        .iter()
        .map(|t| ThresholdBin::new(*t))
        .collect::<Vec<_>>();
    let mut conserved = constrained.clone();
    let mut without_elements = Vec::new();

    for tad in tads.values() {
        if !tad.has_functional_elements() {
            without_elements.push(tad);
            continue;
        }
        if let Some(max) = tad.max_constraint() {
            constrained
                .iter_mut()
                .filter(|bin| max >= bin.threshold)
                .for_each(|bin| bin.tads.push(tad));
        }
        if let Some(max) = tad.max_conservation() {
            conserved
                .iter_mut()
                .filter(|bin| max >= bin.threshold)
                .for_each(|bin| bin.tads.push(tad));
        }
    }

    TadFilterReport {
        constrained,
        conserved,
        without_elements,
    }
}

impl<'a> ThresholdBin<'a> {
    fn new(threshold: ScoreType) -> Self {
        Self {
            threshold,
            tads: Vec::new(),
        }
    }
}

impl TadFilterReport<'_> {
    /// Writes every group as a BED file into `dir` and returns the written
    /// paths.
    pub fn write_beds(
        &self,
        dir: &Path,
    ) -> anyhow::Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for bin in self.constrained.iter() {
            let path = dir.join(format!("tads_with_pli_{}_genes.bed", bin.threshold));
            let label = format!("TADs_with_pLI_{}_genes", bin.threshold);
            write_bed_file(&path, bin.tads.iter().copied(), &label)?;
            written.push(path);
        }
        for bin in self.conserved.iter() {
            let path = dir.join(format!("tads_with_phastcon_{}_enhancer.bed", bin.threshold));
            let label = format!("TADs_with_phastcon_{}_enhancer", bin.threshold);
            write_bed_file(&path, bin.tads.iter().copied(), &label)?;
            written.push(path);
        }
        let path = dir.join("tads_without_functional_elements.bed");
        write_bed_file(
            &path,
            self.without_elements.iter().copied(),
            "tads_without_functional_elements",
        )?;
        written.push(path);

        info!("Wrote {} BED files to {}", written.len(), dir.display());
        Ok(written)
    }
}

impl Display for TadFilterReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "TADs with constrained genes")?;
        for bin in self.constrained.iter() {
            writeln!(f, "  pLI >= {}: {}", bin.threshold, bin.tads.len())?;
        }
        writeln!(f, "TADs with conserved enhancers")?;
        for bin in self.conserved.iter() {
            writeln!(f, "  Phastcon >= {}: {}", bin.threshold, bin.tads.len())?;
        }
        write!(
            f,
            "TADs without functional elements: {}",
            self.without_elements.len()
        )
    }
}
