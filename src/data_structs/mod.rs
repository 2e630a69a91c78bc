//! Core data structures of `cnvtad`.
//!
//! - [`interval`]: [`GenomicInterval`], the half-open interval every entity
//!   is built on, and the [`Span`]/[`GenomicRegion`] traits.
//! - [`entities`]: [`Gene`], [`Enhancer`], [`Tad`] and [`Cnv`].
//! - [`registry`]: run-time lookup of entity kinds by name
//!   ([`EntityRegistry`]) and the [`Entity`] variant.
//! - [`collection`]: [`IntervalCollection`], intervals grouped by chromosome
//!   and kept sorted.
//! - [`typedef`]: type aliases for positions, scores and chromosome names.

pub mod collection;
pub mod entities;
pub mod interval;
pub mod registry;
pub mod typedef;

#[cfg(test)]
mod tests;

pub use collection::{
    create_chr_dictionary_from_beds,
    IntervalCollection,
};
pub use entities::{
    Cnv,
    Enhancer,
    FromInterval,
    Gene,
    Tad,
};
pub use interval::{
    GenomicInterval,
    GenomicRegion,
    Span,
};
pub use registry::{
    Entity,
    EntityKind,
    EntityRegistry,
};
