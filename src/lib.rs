//! # cnvtad
//!
//! `cnvtad` annotates copy-number variants (CNVs) with the topologically
//! associating domains (TADs) they touch and with the genes and enhancers
//! inside those TADs, and turns the result into numeric feature vectors for
//! pathogenicity classification.
//!
//! ## Key Features
//!
//! * **TAD annotation**: genes and enhancers are assigned to TADs with a
//!   single ascending sweep per chromosome. Elements crossing a TAD
//!   boundary are carried over, so they end up in every TAD they touch.
//! * **CNV annotation**: CNVs are linked to annotated TADs with the same
//!   sweep; a CNV in more than one TAD is boundary spanning. Per-element
//!   overlap and distance indicators are computed for every CNV.
//! * **Feature extraction**: three nested feature sets (`binary`,
//!   `extended`, `extended_continuous`) exported as `polars` DataFrames,
//!   TSV or `ndarray` matrices.
//! * **Downstream tools**: TAD filtering by gene constraint (pLI) and
//!   enhancer conservation (Phastcon) with BED export, and a logistic
//!   regression classifier with stratified cross-validation.
//! * **Parallel processing**: chromosomes are independent and processed on
//!   a Rayon pool.
//!
//! Number of threads to be used can be configured with setting
//! `CNVTAD_NUM_THREADS` environment variable.
//!
//! ## Structure
//!
//! * [`data_structs`]: intervals, entities ([`Tad`], [`Gene`], [`Enhancer`],
//!   [`Cnv`]), the entity registry and [`IntervalCollection`].
//! * [`io`]: interval file loading, BED export and persistence.
//! * [`tools`]: annotation, feature extraction, TAD filtering and
//!   classification.
//! * [`config`]: [`AnnotationConfig`].
//! * [`error`]: [`AnnotError`].
//!
//! ## Usage
//!
//! ```no_run
//! use cnvtad::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = AnnotationConfig::default();
//!     let tads: IntervalCollection<Tad> =
//!         load_collection("tads.bed", &[] as &[&str], InputFormat::Bed, &config)?;
//!     let genes: IntervalCollection<Gene> =
//!         load_collection("genes.bed", &["name", "pLI"], InputFormat::Bed, &config)?;
//!     let enhancers: IntervalCollection<Enhancer> =
//!         load_collection("enhancers.bed", &["ID", "Phastcon"], InputFormat::Bed, &config)?;
//!
//!     let (tads, stats) = TadAnnotator::new(config.clone()).annotate(tads, genes, enhancers);
//!     println!("{} genes linked", stats.genes.links);
//!
//!     let cnvs: IntervalCollection<Cnv> =
//!         load_collection("cnvs.bed", &[] as &[&str], InputFormat::Bed, &config)?;
//!     let cnvs = annotate_cnvs(tads.into_shared(), cnvs, &config);
//!
//!     let table = FeatureTable::from_cnvs(cnvs.values(), FeatureSet::ExtendedContinuous);
//!     table.write_tsv(std::fs::File::create("features.csv")?)?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod data_structs;
pub mod error;
pub mod exports;
pub mod io;
pub mod prelude;
pub mod tools;
pub mod utils;

#[allow(unused_imports)]
use prelude::*;
