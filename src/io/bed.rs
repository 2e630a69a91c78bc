use std::fs::File;
use std::io::{
    BufRead,
    BufReader,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};

use anyhow::Context;
use bio::io::bed;
use log::{
    debug,
    info,
};

use crate::config::AnnotationConfig;
use crate::data_structs::collection::IntervalCollection;
use crate::data_structs::entities::FromInterval;
use crate::data_structs::interval::{
    GenomicInterval,
    GenomicRegion,
};
use crate::data_structs::registry::{
    Entity,
    EntityRegistry,
};
use crate::error::{
    AnnotError,
    Result,
};

/// Layout of an interval file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// `chrom start end [extra...]`, 0-based half-open.
    #[default]
    Bed,
    /// `chrom pos [extra...]` with a 1-based position; the end comes from
    /// `END=` or `SVLEN=` in the INFO column.
    Vcf,
}

impl InputFormat {
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            InputFormat::Bed => &["bed", "txt"],
            InputFormat::Vcf => &["bed", "txt", "vcf"],
        }
    }

    fn parse_line<S: AsRef<str>>(
        &self,
        line: &str,
        schema: &[S],
    ) -> Result<GenomicInterval> {
        match self {
            InputFormat::Bed => GenomicInterval::parse_line(line, schema),
            InputFormat::Vcf => GenomicInterval::parse_vcf_line(line, schema),
        }
    }
}

/// Checks that `path` is an existing file with one of the extensions of
/// `format`.
pub fn validate_file<P: AsRef<Path>>(
    path: P,
    format: InputFormat,
) -> Result<PathBuf> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(AnnotError::invalid_path(path, "file does not exist"));
    }
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if !format.extensions().contains(&extension.as_str()) {
        return Err(AnnotError::invalid_path(
            path,
            format!("expected one of {:?}", format.extensions()),
        ));
    }
    Ok(path.to_path_buf())
}

fn is_skipped(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("track")
        || trimmed.starts_with("browser")
}

/// Parses every data line of `reader`. Errors carry `source` and the
/// 1-based line number.
pub fn read_intervals<R, S>(
    reader: R,
    schema: &[S],
    format: InputFormat,
    source: &Path,
) -> Result<Vec<GenomicInterval>>
where
    R: BufRead,
    S: AsRef<str>, {
    read_records(reader, schema, format, source, Ok)
}

/// Parses every data line of `reader` and turns it into a record with
/// `build`. Parse and build errors carry `source` and the 1-based line
/// number.
fn read_records<R, S, T, F>(
    reader: R,
    schema: &[S],
    format: InputFormat,
    source: &Path,
    mut build: F,
) -> Result<Vec<T>>
where
    R: BufRead,
    S: AsRef<str>,
    F: FnMut(GenomicInterval) -> Result<T>, {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if is_skipped(&line) {
            continue;
        }
        let record = format
            .parse_line(&line, schema)
            .and_then(&mut build)
            .map_err(|e| e.at_line(source, idx + 1))?;
        records.push(record);
    }
    Ok(records)
}

/// Loads all records of a file as entities of type `T`.
pub fn load_entities<T, P, S>(
    path: P,
    schema: &[S],
    format: InputFormat,
    config: &AnnotationConfig,
) -> Result<Vec<T>>
where
    T: FromInterval,
    P: AsRef<Path>,
    S: AsRef<str>, {
    let path = validate_file(path, format)?;
    let reader = BufReader::new(File::open(&path)?);
    let entities = read_records(reader, schema, format, &path, |interval| {
        T::from_interval(interval, config)
    })?;
    debug!("Read {} records from {}", entities.len(), path.display());
    Ok(entities)
}

/// Loads a file and groups its records by chromosome.
pub fn load_collection<T, P, S>(
    path: P,
    schema: &[S],
    format: InputFormat,
    config: &AnnotationConfig,
) -> Result<IntervalCollection<T>>
where
    T: FromInterval + GenomicRegion,
    P: AsRef<Path>,
    S: AsRef<str>, {
    let path = path.as_ref();
    let items = load_entities::<T, _, _>(path, schema, format, config)?;
    let collection = IntervalCollection::from_intervals(items);
    info!(
        "Loaded {} records on {} chromosomes from {}",
        collection.len(),
        collection.n_chr(),
        path.display()
    );
    Ok(collection)
}

/// Loads a file as entities of the kind registered under `kind_name`.
pub fn objects_from_file<P, S>(
    path: P,
    kind_name: &str,
    registry: &EntityRegistry,
    schema: &[S],
    format: InputFormat,
    config: &AnnotationConfig,
) -> Result<Vec<Entity>>
where
    P: AsRef<Path>,
    S: AsRef<str>, {
    let kind = registry.resolve(kind_name)?;
    let path = validate_file(path, format)?;
    let reader = BufReader::new(File::open(&path)?);
    read_records(reader, schema, format, &path, |interval| {
        kind.build(interval, config)
    })
}

/// Writes regions as BED records with `label` in the name column.
pub fn write_bed<'a, W, T, I>(
    sink: W,
    regions: I,
    label: &str,
) -> anyhow::Result<()>
where
    W: Write,
    T: GenomicRegion + 'a,
    I: IntoIterator<Item = &'a T>, {
    let mut writer = bed::Writer::new(sink);
    for region in regions {
        let mut record = bed::Record::from(region.interval());
        record.set_name(label);
        writer
            .write(&record)
            .with_context(|| format!("Failed to write BED record {}", region.interval()))?;
    }
    Ok(())
}

pub fn write_bed_file<'a, T, I>(
    path: &Path,
    regions: I,
    label: &str,
) -> anyhow::Result<()>
where
    T: GenomicRegion + 'a,
    I: IntoIterator<Item = &'a T>, {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_bed(file, regions, label)
}
