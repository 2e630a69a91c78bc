//! Genomic entities built on top of [`GenomicInterval`]: genes, enhancers,
//! TADs and CNVs.
//!
//! Each kind is its own struct holding the interval plus kind-specific
//! attributes. They share the [`GenomicRegion`] contract instead of a
//! common base type.
//!
//! [`GenomicRegion`]: crate::data_structs::interval::GenomicRegion

mod cnv;
mod element;
mod tad;

pub use cnv::{
    Cnv,
    N_CNV_FEATURES,
};
pub use element::{
    Enhancer,
    Gene,
};
pub use tad::Tad;

use crate::config::AnnotationConfig;
use crate::data_structs::interval::GenomicInterval;
use crate::error::Result;

/// Construction of an entity from a parsed interval. Kind-specific fields
/// (scores) are read from the interval's auxiliary columns.
pub trait FromInterval: Sized {
    fn from_interval(
        interval: GenomicInterval,
        config: &AnnotationConfig,
    ) -> Result<Self>;
}
