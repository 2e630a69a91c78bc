use std::fmt::{
    self,
    Display,
};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::typedef::{
    ChrSmallStr,
    PosType,
};
use crate::error::{
    AnnotError,
    Result,
};
use crate::utils::overlap_len;

/// Minimal positional contract needed by the sweep: a half-open
/// `[start, end)` span. Ordering of spans is `(start, end)`.
pub trait Span {
    fn start(&self) -> PosType;

    fn end(&self) -> PosType;

    fn span(&self) -> (PosType, PosType) {
        (self.start(), self.end())
    }

    fn length(&self) -> PosType {
        self.end() - self.start()
    }

    /// True if the two spans share at least one base.
    fn overlaps<S: Span>(
        &self,
        other: &S,
    ) -> bool {
        overlap_len(self.span(), other.span()) > 0
    }
}

/// Common contract of every genomic entity: it is backed by a
/// [`GenomicInterval`].
pub trait GenomicRegion: Span {
    fn interval(&self) -> &GenomicInterval;

    fn chrom(&self) -> &str {
        self.interval().chrom()
    }

    fn field(
        &self,
        name: &str,
    ) -> Option<&str> {
        self.interval().field(name)
    }
}

impl<T: Span> Span for Arc<T> {
    fn start(&self) -> PosType {
        self.as_ref().start()
    }

    fn end(&self) -> PosType {
        self.as_ref().end()
    }
}

impl<T: GenomicRegion> GenomicRegion for Arc<T> {
    fn interval(&self) -> &GenomicInterval {
        self.as_ref().interval()
    }
}

/// Half-open interval on a named chromosome with auxiliary columns.
///
/// The auxiliary columns keep the order of the schema they were parsed
/// with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenomicInterval {
    chrom:  ChrSmallStr,
    start:  PosType,
    end:    PosType,
    fields: IndexMap<String, String>,
}

impl GenomicInterval {
    /// Creates a new interval. Panics if `start >= end`, use
    /// [`GenomicInterval::try_new`] for untrusted input.
    pub fn new(
        chrom: &str,
        start: PosType,
        end: PosType,
    ) -> Self {
        Self::try_new(chrom, start, end).expect("start must be less than end")
    }

    pub fn try_new(
        chrom: &str,
        start: PosType,
        end: PosType,
    ) -> Result<Self> {
        if start >= end {
            return Err(AnnotError::malformed(format!(
                "start ({}) must be less than end ({})",
                start, end
            )));
        }
        Ok(Self {
            chrom: ChrSmallStr::from(chrom),
            start,
            end,
            fields: IndexMap::new(),
        })
    }

    pub fn with_field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Parses one BED-like line: `chrom start end [extra...]`, split on
    /// tabs or spaces. Extra columns are bound, in order, to the names of
    /// `schema`; columns past the schema are ignored.
    pub fn parse_line<S: AsRef<str>>(
        line: &str,
        schema: &[S],
    ) -> Result<Self> {
        let mut columns = line.split_whitespace();
        let (chrom, start, end) = match (columns.next(), columns.next(), columns.next()) {
            (Some(chrom), Some(start), Some(end)) => (chrom, start, end),
            _ => {
                return Err(AnnotError::malformed(format!(
                    "expected at least 3 columns (chromosome, start, end), got '{}'",
                    line.trim_end()
                )))
            },
        };
        let start = parse_position(start, "start")?;
        let end = parse_position(end, "end")?;

        let mut interval = Self::try_new(chrom, start, end)?;
        interval.bind_fields(columns, schema);
        Ok(interval)
    }

    /// Parses one VCF-style line. Column 2 is the 1-based position; the end
    /// is taken from `END=` in the INFO column, then from `SVLEN=`, and
    /// falls back to a single base. Schema names are bound to the columns
    /// following the position (ID, REF, ALT, ...).
    pub fn parse_vcf_line<S: AsRef<str>>(
        line: &str,
        schema: &[S],
    ) -> Result<Self> {
        let columns = line.split_whitespace().collect::<Vec<_>>();
        if columns.len() < 2 {
            return Err(AnnotError::malformed(format!(
                "expected at least 2 columns (chromosome, position), got '{}'",
                line.trim_end()
            )));
        }
        let pos = parse_position(columns[1], "position")?;
        if pos == 0 {
            return Err(AnnotError::malformed("VCF positions are 1-based, got 0"));
        }
        let start = pos - 1;

        let info = columns.get(7).copied().unwrap_or_default();
        let end = match info_value(info, "END") {
            Some(end) => parse_position(end, "INFO/END")?,
            None => {
                match info_value(info, "SVLEN") {
                    Some(svlen) => {
                        let svlen = svlen
                            .trim_start_matches('-')
                            .parse::<PosType>()
                            .map_err(|e| {
                                AnnotError::malformed(format!(
                                    "INFO/SVLEN '{}' is not an integer: {}",
                                    svlen, e
                                ))
                            })?;
                        start.saturating_add(svlen)
                    },
                    None => pos,
                }
            },
        };

        let mut interval = Self::try_new(columns[0], start, end)?;
        interval.bind_fields(columns.into_iter().skip(2), schema);
        Ok(interval)
    }

    fn bind_fields<'a, I, S>(
        &mut self,
        values: I,
        schema: &[S],
    ) where
        I: Iterator<Item = &'a str>,
        S: AsRef<str>, {
        for (name, value) in schema.iter().zip(values) {
            self.fields
                .insert(name.as_ref().to_string(), value.to_string());
        }
    }

    pub fn chrom(&self) -> &str {
        self.chrom.as_str()
    }

    pub fn field(
        &self,
        name: &str,
    ) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn fields(&self) -> &IndexMap<String, String> {
        &self.fields
    }
}

impl Span for GenomicInterval {
    fn start(&self) -> PosType {
        self.start
    }

    fn end(&self) -> PosType {
        self.end
    }
}

impl GenomicRegion for GenomicInterval {
    fn interval(&self) -> &GenomicInterval {
        self
    }
}

impl Display for GenomicInterval {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}

impl From<&GenomicInterval> for bio::io::bed::Record {
    fn from(value: &GenomicInterval) -> Self {
        let mut record = bio::io::bed::Record::new();
        record.set_chrom(value.chrom());
        record.set_start(value.start as u64);
        record.set_end(value.end as u64);
        record
    }
}

fn parse_position(
    value: &str,
    what: &str,
) -> Result<PosType> {
    value.parse::<PosType>().map_err(|e| {
        AnnotError::malformed(format!(
            "{} '{}' is not a valid position: {}",
            what, value, e
        ))
    })
}

fn info_value<'a>(
    info: &'a str,
    key: &str,
) -> Option<&'a str> {
    info.split(';').find_map(|pair| {
        let mut parts = pair.splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some(k), Some(v)) if k == key => Some(v),
            _ => None,
        }
    })
}

/// Implements [`Span`] and [`GenomicRegion`] for a struct holding its
/// interval in an `interval` field.
#[macro_export]
macro_rules! impl_genomic_region {
    ($type: ty) => {
        impl $crate::data_structs::interval::Span for $type {
            fn start(&self) -> $crate::data_structs::typedef::PosType {
                $crate::data_structs::interval::Span::start(&self.interval)
            }

            fn end(&self) -> $crate::data_structs::typedef::PosType {
                $crate::data_structs::interval::Span::end(&self.interval)
            }
        }

        impl $crate::data_structs::interval::GenomicRegion for $type {
            fn interval(&self) -> &$crate::data_structs::interval::GenomicInterval {
                &self.interval
            }
        }
    };
}
