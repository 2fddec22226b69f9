//! # Input/Output utilities for e2g tables.
//!
//! Write-side counterpart to the readers in `e2g-core`: serializes annotated
//! pair tables back to disk as tab-delimited files, plain or gzip-compressed.

pub mod table;

// re-expose core functions
pub use table::*;
