//! The six-stage Visa interchange pipeline (spec.md §4): Transform, Extract,
//! Clean, Calculate, Interchange, Store. Each stage is a pure function over
//! `(artifact_in, metadata_snapshot) -> artifact_out`.

pub mod ardef_resolver;
pub mod calculator;
pub mod cleaner;
pub mod criteria;
pub mod dates;
pub mod extractor;
pub mod framer;
pub mod jurisdiction;
pub mod joiner;
pub mod overpunch;
pub mod rule_engine;

pub use framer::RecordFamily;
