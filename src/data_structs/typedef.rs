use smallstr::SmallString;

pub const SMALLSTR_SIZE: usize = 20;
/// Chromosome names are short ("chr1", "chrX", "NC_000001.11"), so they are
/// kept inline.
pub type ChrSmallStr = SmallString<[u8; SMALLSTR_SIZE]>;
pub type PosType = u32;
/// Per-element overlap/contact indicator. Binary for the default metric,
/// a distance in bp for [`DistanceMetric::Genomic`].
///
/// [`DistanceMetric::Genomic`]: crate::config::DistanceMetric::Genomic
pub type IndicatorType = u32;
pub type ScoreType = f64;
