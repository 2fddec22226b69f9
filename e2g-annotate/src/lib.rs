//! Gene-level score annotation for e2g pair tables.
//!
//! Joins a per-gene score table (gnomAD pLI, GeneBayes s_het, and the like)
//! onto an E2G pair table by gene symbol or Ensembl ID. Genes absent from
//! the score table are imputed with the mean score across the score table,
//! and the result is appended as one new column.

pub mod scores;

// Re-exports
pub use scores::*;
