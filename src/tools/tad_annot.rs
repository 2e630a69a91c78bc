//! Assignment of genes and enhancers to TADs.
//!
//! Chromosomes are independent and annotated in parallel on
//! [`THREAD_POOL`]. Within a chromosome the genes and the enhancers are two
//! independent [`SweepLane`]s advanced in lockstep over the sorted TADs.

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
    Enhancer,
    Gene,
    Tad,
};
use crate::data_structs::interval::{
    GenomicRegion,
    Span,
};
use crate::data_structs::typedef::ChrSmallStr;
use crate::utils::{
    n_threads,
    THREAD_POOL,
};

/// Counters of a TAD annotation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TadAnnotationStats {
    pub genes:     SweepStats,
    pub enhancers: SweepStats,
}

/// Annotates TADs with genes and enhancers.
#[derive(Debug, Clone, Default)]
pub struct TadAnnotator {
    config: AnnotationConfig,
}

impl TadAnnotator {
    pub fn new(config: AnnotationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnnotationConfig {
        &self.config
    }

    /// Assigns every gene and enhancer to the TADs it touches and computes
    /// the TAD flags.
    ///
    /// The output has exactly the chromosomes of `tads`, in their order.
    /// Elements on chromosomes without TADs are dropped. TADs that already
    /// carry elements are reset first.
    pub fn annotate(
        &self,
        tads: IntervalCollection<Tad>,
        genes: IntervalCollection<Gene>,
        enhancers: IntervalCollection<Enhancer>,
    ) -> (IntervalCollection<Tad>, TadAnnotationStats) {
        let chromosomes = tads
            .chromosomes()
            .map(ChrSmallStr::from)
            .collect_vec();

        if !genes.is_empty() && genes.values().all(|g| g.constraint().is_none()) {
            warn!(
                "No gene has a '{}' score, no TAD will be highly constrained",
                self.config.constraint_field
            );
        }
        if !enhancers.is_empty() && enhancers.values().all(|e| e.conservation().is_none()) {
            warn!(
                "No enhancer has a '{}' score, no TAD will be conserved",
                self.config.conservation_field
            );
        }

        let dropped_genes = count_dropped(&genes, &tads);
        let dropped_enhancers = count_dropped(&enhancers, &tads);
        if dropped_genes + dropped_enhancers > 0 {
            warn!(
                "{} genes and {} enhancers are on chromosomes without TADs and were dropped",
                dropped_genes, dropped_enhancers
            );
        }

        let mut genes = genes
            .reduce_to(chromosomes.iter().map(ChrSmallStr::as_str))
            .into_shared()
            .into_buckets();
        let mut enhancers = enhancers
            .reduce_to(chromosomes.iter().map(ChrSmallStr::as_str))
            .into_shared()
            .into_buckets();

        let jobs = tads
            .into_buckets()
            .into_iter()
            .map(|(chr, tads)| {
                let chr_genes = genes.swap_remove(&chr).unwrap_or_default();
                let chr_enhancers = enhancers.swap_remove(&chr).unwrap_or_default();
                (chr, tads, chr_genes, chr_enhancers)
            })
            .collect_vec();

        debug!("Annotating {} chromosomes on {} threads", jobs.len(), n_threads());
        let results = THREAD_POOL.install(|| {
            jobs.into_par_iter()
                .map(|(chr, tads, genes, enhancers)| {
                    let (tads, stats) =
                        annotate_chromosome(&chr, tads, genes, enhancers, &self.config);
                    (chr, tads, stats)
                })
                .collect::<Vec<_>>()
        });

        let mut stats = TadAnnotationStats::default();
        stats.genes.dropped = dropped_genes;
        stats.enhancers.dropped = dropped_enhancers;

        let buckets = results
            .into_iter()
            .map(|(chr, tads, chr_stats)| {
                stats.genes += chr_stats.genes;
                stats.enhancers += chr_stats.enhancers;
                (chr, tads)
            })
            .collect_vec();

        info!(
            "Annotated {} chromosomes: {} gene links, {} enhancer links",
            buckets.len(),
            stats.genes.links,
            stats.enhancers.links
        );
        if stats.genes.leftover + stats.enhancers.leftover > 0 {
            debug!(
                "{} genes and {} enhancers left past the last TAD of their chromosome",
                stats.genes.leftover, stats.enhancers.leftover
            );
        }

        (IntervalCollection::from_sorted_buckets(buckets), stats)
    }
}

/// Shorthand for [`TadAnnotator::annotate`] that drops the counters.
pub fn create_annotated_tad_dict(
    tads: IntervalCollection<Tad>,
    genes: IntervalCollection<Gene>,
    enhancers: IntervalCollection<Enhancer>,
    config: &AnnotationConfig,
) -> IntervalCollection<Tad> {
    TadAnnotator::new(config.clone())
        .annotate(tads, genes, enhancers)
        .0
}

fn count_dropped<T, U>(
    elements: &IntervalCollection<T>,
    tads: &IntervalCollection<U>,
) -> usize {
    elements
        .iter()
        .filter(|(chr, _)| !tads.contains_chr(chr))
        .map(|(_, bucket)| bucket.len())
        .sum()
}

fn annotate_chromosome(
    chr: &str,
    mut tads: Vec<Tad>,
    genes: Vec<Arc<Gene>>,
    enhancers: Vec<Arc<Enhancer>>,
    config: &AnnotationConfig,
) -> (Vec<Tad>, TadAnnotationStats) {
    if tads
        .iter()
        .tuple_windows()
        .any(|(prev, next)| next.start() < prev.end())
    {
        warn!("TADs on {} overlap, annotation follows sorted order", chr);
    }

    let mut gene_lane = SweepLane::new(genes);
    let mut enhancer_lane = SweepLane::new(enhancers);

    for tad in tads.iter_mut() {
        tad.clear_elements();
        let end = tad.end();
        loop {
            let gene = gene_lane.step(end);
            let enhancer = enhancer_lane.step(end);
            if gene.is_none() && enhancer.is_none() {
                break;
            }
            if let Some(gene) = gene {
                if links(config, tad, gene.as_ref()) {
                    gene_lane.record_link();
                    tad.push_gene(gene);
                }
            }
            if let Some(enhancer) = enhancer {
                if links(config, tad, enhancer.as_ref()) {
                    enhancer_lane.record_link();
                    tad.push_enhancer(enhancer);
                }
            }
        }
        gene_lane.rewind();
        enhancer_lane.rewind();
        tad.finalize(config);
    }

    let stats = TadAnnotationStats {
        genes:     gene_lane.finish(),
        enhancers: enhancer_lane.finish(),
    };
    debug!(
        "{}: {} TADs, {} gene links, {} enhancer links",
        chr,
        tads.len(),
        stats.genes.links,
        stats.enhancers.links
    );
    (tads, stats)
}

fn links<S: Span>(
    config: &AnnotationConfig,
    tad: &Tad,
    element: &S,
) -> bool {
    !config.strict_overlap || element.overlaps(tad)
}

/// Looks up the TAD of `tads` with exactly the coordinates of `region`.
pub fn find_tad<'a, R: GenomicRegion>(
    tads: &'a IntervalCollection<Tad>,
    region: &R,
) -> Option<&'a Tad> {
    let bucket = tads.get(region.chrom())?;
    let key = region.span();
    let idx = bucket.partition_point(|tad| tad.span() < key);
    bucket.get(idx).filter(|tad| tad.span() == key)
}
