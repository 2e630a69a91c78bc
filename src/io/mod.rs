//! Reading interval files and persisting annotated collections.
//!
//! - [`bed`]: BED/VCF-like line readers, path validation and BED export.
//! - [`store`]: `bincode` save/restore of annotated TADs and CNVs.
pub mod bed;
pub mod store;

#[cfg(test)]
mod tests;

pub use bed::{
    load_collection,
    load_entities,
    objects_from_file,
    validate_file,
    write_bed,
    InputFormat,
};
pub use store::{
    load_from_path,
    save_to_path,
};
