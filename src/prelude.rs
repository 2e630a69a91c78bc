pub use crate::config::{
    AnnotationConfig,
    DistanceMetric,
};
pub use crate::data_structs::typedef::{
    ChrSmallStr,
    PosType,
    ScoreType,
};
pub use crate::data_structs::{
    create_chr_dictionary_from_beds,
    Cnv,
    Enhancer,
    Entity,
    EntityKind,
    EntityRegistry,
    FromInterval,
    Gene,
    GenomicInterval,
    GenomicRegion,
    IntervalCollection,
    Span,
    Tad,
};
pub use crate::error::AnnotError;
pub use crate::io::{
    load_collection,
    load_entities,
    load_from_path,
    objects_from_file,
    save_to_path,
    validate_file,
    write_bed,
    InputFormat,
};
pub use crate::tools::classifier::{
    build_training_set,
    label_correlations,
    roc_auc_score,
    roc_curve,
    stratified_k_fold,
    train_test_split,
    BinaryClassifier,
    ClassificationReport,
    Classifier,
    LogisticRegression,
    RocCurve,
};
pub use crate::tools::{
    annotate_cnvs,
    create_annotated_tad_dict,
    create_feature_df,
    filter_tads,
    CnvAnnotator,
    FeatureSet,
    FeatureTable,
    SweepStats,
    TadAnnotationStats,
    TadAnnotator,
    TadFilterReport,
    SCORE_THRESHOLDS,
};
