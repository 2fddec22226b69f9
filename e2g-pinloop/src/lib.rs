//! Chromatin-loop contact probabilities for element-to-gene pairs.
//!
//! Given a catalog of chromatin-loop anchor pairs (ChIA-PET style) and an E2G
//! pair table, computes for every (gene, element) pair the fraction of that
//! gene's loop-anchored contacts that fall on the element. The result is
//! appended to the pair table as a `Pinloop` column.
//!
//! Chromosomes are processed independently: each chromosome's pairs yield
//! sorted gene-TSS and element-center arrays, loop anchors are binned into
//! rank ranges against those arrays, contact counts are accumulated into a
//! dense gene × element matrix, and rows are normalized by per-gene totals.
//!
//! # Example
//!
//! ```no_run
//! use e2g_core::models::PairTable;
//! use e2g_pinloop::{score_pair_table, LoopCatalog};
//!
//! let pairs = PairTable::try_from("pairs.tsv.gz").unwrap();
//! let catalog = LoopCatalog::try_from("chiapet.tsv").unwrap();
//!
//! let pinloop = score_pair_table(&pairs, &catalog).unwrap();
//! ```

pub mod errors;
pub mod index;
pub mod loops;
pub mod matrix;
pub mod scoring;

// re-exports
pub use errors::PinloopError;
pub use loops::{LoopCatalog, LoopRecord, CIS_DISTANCE_CUTOFF};
pub use matrix::ContactMatrix;
pub use scoring::{score_pair_table, PINLOOP_COLUMN};
