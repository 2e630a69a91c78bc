//! Small helpers shared across the crate.
//!
//! - The rayon thread pool used for per-chromosome annotation. Its size can
//!   be set with the `CNVTAD_NUM_THREADS` environment variable.
//! - Interval arithmetic on half-open coordinates (overlap length, gap).
//! - The builder-style `with_*` macro.

use once_cell::sync::Lazy;
use rayon::{
    ThreadPool,
    ThreadPoolBuilder,
};

use crate::data_structs::typedef::PosType;

pub static THREAD_POOL: Lazy<ThreadPool> = Lazy::new(|| {
    let num_threads: Option<usize> = std::env::var("CNVTAD_NUM_THREADS")
        .ok()
        .and_then(|str| str.parse::<usize>().ok());
    ThreadPoolBuilder::new()
        .num_threads(num_threads.unwrap_or(0))
        .build()
        .expect("Failed to create thread pool")
});

pub fn n_threads() -> usize {
    THREAD_POOL.current_num_threads()
}

/// Length of the intersection of two half-open intervals, `0` if they are
/// disjoint or only touch.
pub fn overlap_len(
    a: (PosType, PosType),
    b: (PosType, PosType),
) -> PosType {
    let start = a.0.max(b.0);
    let end = a.1.min(b.1);
    end.saturating_sub(start)
}

/// Number of bases between two half-open intervals, `0` if they overlap or
/// are adjacent.
pub fn gap_len(
    a: (PosType, PosType),
    b: (PosType, PosType),
) -> PosType {
    if a.1 <= b.0 {
        b.0 - a.1
    }
    else if b.1 <= a.0 {
        a.0 - b.1
    }
    else {
        0
    }
}

#[macro_export]
macro_rules! with_field_fn {
    ($field_name: ident, $field_type: ty) => {
        paste::paste! {
            pub fn [<with_$field_name>](mut self, value: $field_type) -> Self {
                self.$field_name = value;
                self
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::inside((5, 60), (10, 20), 10)]
    #[case::partial((5, 60), (50, 150), 10)]
    #[case::adjacent((0, 100), (100, 200), 0)]
    #[case::disjoint((0, 10), (20, 30), 0)]
    fn test_overlap_len(
        #[case] a: (PosType, PosType),
        #[case] b: (PosType, PosType),
        #[case] expected: PosType,
    ) {
        assert_eq!(overlap_len(a, b), expected);
        assert_eq!(overlap_len(b, a), expected);
    }

    #[rstest]
    #[case::before((0, 10), (20, 30), 10)]
    #[case::after((40, 50), (20, 30), 10)]
    #[case::adjacent((0, 100), (100, 200), 0)]
    #[case::overlapping((5, 60), (50, 150), 0)]
    fn test_gap_len(
        #[case] a: (PosType, PosType),
        #[case] b: (PosType, PosType),
        #[case] expected: PosType,
    ) {
        assert_eq!(gap_len(a, b), expected);
    }
}
