use std::sync::Arc;

use indexmap::IndexMap;
use itertools::Itertools;
use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::interval::GenomicRegion;
use crate::data_structs::typedef::ChrSmallStr;

/// Intervals grouped by chromosome. Every bucket is sorted ascending by
/// `(start, end)`; chromosomes keep the order in which they were first
/// seen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de>"
))]
pub struct IntervalCollection<T> {
    inner: IndexMap<ChrSmallStr, Vec<T>>,
}

impl<T> Default for IntervalCollection<T> {
    fn default() -> Self {
        Self {
            inner: IndexMap::new(),
        }
    }
}

impl<T: GenomicRegion> FromIterator<T> for IntervalCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_intervals(iter)
    }
}

impl<T: GenomicRegion> IntervalCollection<T> {
    /// Groups `items` by chromosome and sorts each bucket by
    /// `(start, end)`. The sort is stable, ties keep their input order.
    pub fn from_intervals<I: IntoIterator<Item = T>>(items: I) -> Self {
        let mut inner: IndexMap<ChrSmallStr, Vec<T>> = IndexMap::new();
        for item in items {
            inner
                .entry(ChrSmallStr::from(item.chrom()))
                .or_default()
                .push(item);
        }
        for bucket in inner.values_mut() {
            bucket.sort_by_key(|item| item.span());
        }
        Self { inner }
    }

    /// Inserts one interval at its sorted position (after equal keys).
    pub fn insert(
        &mut self,
        item: T,
    ) {
        let bucket = self
            .inner
            .entry(ChrSmallStr::from(item.chrom()))
            .or_default();
        let key = item.span();
        let idx = bucket.partition_point(|other| other.span() <= key);
        bucket.insert(idx, item);
    }

    /// True if every bucket is sorted by `(start, end)`.
    pub fn is_sorted(&self) -> bool {
        self.inner.values().all(|bucket| {
            bucket
                .iter()
                .tuple_windows()
                .all(|(a, b)| a.span() <= b.span())
        })
    }
}

impl<T> IntervalCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps already grouped and sorted buckets.
    pub(crate) fn from_sorted_buckets<I>(buckets: I) -> Self
    where
        I: IntoIterator<Item = (ChrSmallStr, Vec<T>)>, {
        Self {
            inner: buckets.into_iter().collect(),
        }
    }

    pub fn get(
        &self,
        chrom: &str,
    ) -> Option<&[T]> {
        self.inner.get(chrom).map(Vec::as_slice)
    }

    pub fn chromosomes(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(|k| k.as_str())
    }

    pub fn contains_chr(
        &self,
        chrom: &str,
    ) -> bool {
        self.inner.contains_key(chrom)
    }

    pub fn n_chr(&self) -> usize {
        self.inner.len()
    }

    /// Total number of intervals over all chromosomes.
    pub fn len(&self) -> usize {
        self.inner.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.inner
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// All intervals, chromosome by chromosome.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.inner.values().flatten()
    }

    pub fn into_buckets(self) -> IndexMap<ChrSmallStr, Vec<T>> {
        self.inner
    }

    /// Keeps only the chromosomes in `keys`, in that order. Chromosomes in
    /// `keys` without intervals get an empty bucket.
    pub fn reduce_to<'a, K>(
        mut self,
        keys: K,
    ) -> Self
    where
        K: IntoIterator<Item = &'a str>, {
        let inner = keys
            .into_iter()
            .map(|key| {
                let bucket = self.inner.swap_remove(key).unwrap_or_default();
                (ChrSmallStr::from(key), bucket)
            })
            .collect();
        Self { inner }
    }

    /// Wraps every interval in an [`Arc`] so it can be shared.
    pub fn into_shared(self) -> IntervalCollection<Arc<T>> {
        IntervalCollection {
            inner: self
                .inner
                .into_iter()
                .map(|(k, v)| (k, v.into_iter().map(Arc::new).collect()))
                .collect(),
        }
    }
}

/// Groups an arbitrary sequence of intervals by chromosome and sorts every
/// bucket by `(start, end)`.
pub fn create_chr_dictionary_from_beds<T, I>(beds: I) -> IntervalCollection<T>
where
    T: GenomicRegion,
    I: IntoIterator<Item = T>, {
    IntervalCollection::from_intervals(beds)
}
