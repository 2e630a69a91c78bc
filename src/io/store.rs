//! Persistence of annotated structures.
//!
//! Collections are written with `bincode`. Restoring yields values equal
//! to the ones saved, including elements shared between TADs (each share
//! is restored as its own copy).
//!
//! Sharing is not preserved on disk. A saved CNV collection holds a full
//! copy of every linked TAD, with its genes and enhancers, once per CNV
//! linked to it, so the file grows with CNVs x TAD contents. Tools that
//! only need the CNV-TAD membership can match the restored TADs against
//! the annotated TAD file with [`find_tad`].
//!
//! [`find_tad`]: crate::tools::tad_annot::find_tad

use std::fs::File;
use std::io::{
    BufReader,
    BufWriter,
    Read,
    Write,
};
use std::path::Path;

use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{
    AnnotError,
    Result,
};

pub fn save<T, W>(
    value: &T,
    sink: W,
) -> Result<()>
where
    T: Serialize,
    W: Write, {
    let mut writer = BufWriter::new(sink);
    bincode::serialize_into(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

pub fn load<T, R>(source: R) -> Result<T>
where
    T: DeserializeOwned,
    R: Read, {
    Ok(bincode::deserialize_from(BufReader::new(source))?)
}

pub fn save_to_path<T: Serialize, P: AsRef<Path>>(
    value: &T,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    save(value, File::create(path)?)?;
    info!("Saved to {}", path.display());
    Ok(())
}

pub fn load_from_path<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(AnnotError::invalid_path(path, "file does not exist"));
    }
    load(File::open(path)?)
}
