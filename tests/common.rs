#![allow(dead_code)]
use std::path::PathBuf;

use cnvtad::prelude::*;

pub const GENE_COLUMNS: [&str; 2] = ["name", "pLI"];
pub const ENHANCER_COLUMNS: [&str; 2] = ["ID", "Phastcon"];
pub const NO_COLUMNS: [&str; 0] = [];

pub fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Loads the test TADs, genes and enhancers and annotates the TADs.
pub fn annotated_tads(config: &AnnotationConfig) -> anyhow::Result<(IntervalCollection<Tad>, TadAnnotationStats)> {
    let tads: IntervalCollection<Tad> =
        load_collection(data_path("test_tads.bed"), &NO_COLUMNS, InputFormat::Bed, config)?;
    let genes: IntervalCollection<Gene> =
        load_collection(data_path("test_genes.bed"), &GENE_COLUMNS, InputFormat::Bed, config)?;
    let enhancers: IntervalCollection<Enhancer> = load_collection(
        data_path("test_enhancer.bed"),
        &ENHANCER_COLUMNS,
        InputFormat::Bed,
        config,
    )?;
    Ok(TadAnnotator::new(config.clone()).annotate(tads, genes, enhancers))
}

pub fn annotated_cnvs(config: &AnnotationConfig) -> anyhow::Result<IntervalCollection<Cnv>> {
    let (tads, _) = annotated_tads(config)?;
    let cnvs: IntervalCollection<Cnv> =
        load_collection(data_path("test_cnv.bed"), &NO_COLUMNS, InputFormat::Bed, config)?;
    Ok(annotate_cnvs(tads.into_shared(), cnvs, config))
}
