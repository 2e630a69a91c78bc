//! Linking CNVs to annotated TADs.
//!
//! The CNVs of a chromosome are swept over its TADs with the same rules
//! used for genes and enhancers, so a CNV is linked to every TAD it
//! touches and one linked to more than one TAD is boundary spanning.

use std::sync::Arc;

use itertools::Itertools;
use log::{
    debug,
    info,
    warn,
};
use rayon::prelude::*;

use super::sweep::{
    SweepLane,
    SweepStats,
};
use crate::config::AnnotationConfig;
use crate::data_structs::collection::IntervalCollection;
use crate::data_structs::entities::{
    Cnv,
    Tad,
};
use crate::data_structs::interval::{
    GenomicRegion,
    Span,
};
use crate::data_structs::typedef::PosType;
use crate::utils::THREAD_POOL;

/// Position of a CNV in its chromosome bucket, swept instead of the CNV
/// itself so the bucket keeps its order.
#[derive(Debug, Clone, Copy)]
struct CnvSlot {
    index: usize,
    start: PosType,
    end:   PosType,
}

impl Span for CnvSlot {
    fn start(&self) -> PosType {
        self.start
    }

    fn end(&self) -> PosType {
        self.end
    }
}

/// Links CNVs to annotated TADs and computes their indicators.
#[derive(Debug, Clone)]
pub struct CnvAnnotator {
    tads:   IntervalCollection<Arc<Tad>>,
    config: AnnotationConfig,
}

impl CnvAnnotator {
    pub fn new(
        tads: IntervalCollection<Arc<Tad>>,
        config: AnnotationConfig,
    ) -> Self {
        Self { tads, config }
    }

    pub fn tads(&self) -> &IntervalCollection<Arc<Tad>> {
        &self.tads
    }

    pub fn config(&self) -> &AnnotationConfig {
        &self.config
    }

    /// Links every CNV to the TADs it touches, then fills its overlap and
    /// distance indicators.
    ///
    /// All CNVs are kept, in their input order. CNVs on chromosomes
    /// without TADs get no TADs and empty indicators. Links from a previous
    /// annotation are discarded.
    pub fn annotate(
        &self,
        cnvs: IntervalCollection<Cnv>,
    ) -> (IntervalCollection<Cnv>, SweepStats) {
        let missing = cnvs
            .iter()
            .filter(|(chr, _)| !self.tads.contains_chr(chr))
            .map(|(chr, bucket)| (chr.to_string(), bucket.len()))
            .collect_vec();
        for (chr, count) in missing.iter() {
            warn!("No TADs on {}, {} CNVs stay unannotated", chr, count);
        }

        let results = THREAD_POOL.install(|| {
            cnvs.into_buckets()
                .into_iter()
                .collect_vec()
                .into_par_iter()
                .map(|(chr, cnvs)| {
                    let tads = self.tads.get(&chr).unwrap_or_default();
                    let (cnvs, stats) = annotate_chromosome(tads, cnvs, &self.config);
                    debug!("{}: {} CNVs, {} TAD links", chr, cnvs.len(), stats.links);
                    (chr, cnvs, stats)
                })
                .collect::<Vec<_>>()
        });

        let mut stats = SweepStats::default();
        let buckets = results
            .into_iter()
            .map(|(chr, cnvs, chr_stats)| {
                stats += chr_stats;
                (chr, cnvs)
            })
            .collect_vec();
        stats.dropped = missing.iter().map(|(_, count)| count).sum();

        let annotated = IntervalCollection::from_sorted_buckets(buckets);
        info!(
            "Annotated {} CNVs, {} spanning a TAD boundary",
            annotated.len(),
            annotated
                .values()
                .filter(|cnv| cnv.boundary_spanning())
                .count()
        );
        (annotated, stats)
    }

    /// Annotates a single CNV against the stored TADs.
    pub fn annotate_one(
        &self,
        cnv: Cnv,
    ) -> Cnv {
        let tads = self
            .tads
            .get(cnv.interval().chrom())
            .unwrap_or_default();
        let (mut cnvs, _) = annotate_chromosome(tads, vec![cnv], &self.config);
        cnvs.remove(0)
    }
}

/// Shorthand for [`CnvAnnotator::annotate`] that drops the counters.
pub fn annotate_cnvs(
    tads: IntervalCollection<Arc<Tad>>,
    cnvs: IntervalCollection<Cnv>,
    config: &AnnotationConfig,
) -> IntervalCollection<Cnv> {
    CnvAnnotator::new(tads, config.clone())
        .annotate(cnvs)
        .0
}

fn annotate_chromosome(
    tads: &[Arc<Tad>],
    mut cnvs: Vec<Cnv>,
    config: &AnnotationConfig,
) -> (Vec<Cnv>, SweepStats) {
    let mut slots = cnvs
        .iter_mut()
        .enumerate()
        .map(|(index, cnv)| {
            cnv.clear_tads();
            CnvSlot {
                index,
                start: cnv.start(),
                end: cnv.end(),
            }
        })
        .collect_vec();
    slots.sort_by_key(|slot| slot.span());

    let mut lane = SweepLane::new(slots);
    for tad in tads {
        while let Some(slot) = lane.step(tad.end()) {
            if !config.strict_overlap || slot.overlaps(tad) {
                lane.record_link();
                cnvs[slot.index].link_tad(Arc::clone(tad));
            }
        }
        lane.rewind();
    }

    for cnv in cnvs.iter_mut() {
        cnv.calculate_overlap_and_distances(config.distance_metric);
    }
    (cnvs, lane.finish())
}
