//! # Core library for e2g
//!
//! Shared models for element-to-gene (E2G) pair annotation: the pair table
//! (a header-preserving delimited file with a fixed set of required columns),
//! per-chromosome gene and element loci, and file reading utilities.

pub mod errors;
pub mod models;
pub mod utils;

// re-export for cleaner imports
pub use errors::PairTableError;
pub use models::{ChromosomeGroup, ElementLocus, GeneLocus, PairTable};
