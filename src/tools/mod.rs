//! Annotation, feature extraction and downstream analysis.
//!
//! - [`tad_annot`]: assigns genes and enhancers to TADs with an ascending
//!   sweep and a per-chromosome carry-over queue ([`sweep`]).
//! - [`cnv_annot`]: links CNVs to annotated TADs and computes per-element
//!   overlap and distance indicators.
//! - [`features`]: turns annotated CNVs into named numeric feature tables.
//! - [`tad_filter`]: groups annotated TADs by gene constraint and enhancer
//!   conservation thresholds.
//! - [`classifier`]: logistic regression with stratified cross-validation,
//!   ROC curves and classification reports.
pub mod classifier;
pub mod cnv_annot;
pub mod features;
pub mod sweep;
pub mod tad_annot;
pub mod tad_filter;


pub use cnv_annot::{
    annotate_cnvs,
    CnvAnnotator,
};
pub use features::{
    create_feature_df,
    FeatureSet,
    FeatureTable,
};
pub use sweep::SweepStats;
pub use tad_annot::{
    create_annotated_tad_dict,
    TadAnnotationStats,
    TadAnnotator,
};
pub use tad_filter::{
    filter_tads,
    TadFilterReport,
    SCORE_THRESHOLDS,
};
