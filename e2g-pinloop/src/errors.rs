use thiserror::Error;

use e2g_core::errors::PairTableError;

#[derive(Error, Debug)]
pub enum PinloopError {
    #[error("Can't read file: {0}")]
    FileReadError(String),

    #[error("Required column '{column}' not found in loop catalog header of {path}")]
    CatalogColumn { column: String, path: String },

    #[error("Loop catalog line {line}: can't parse '{value}' in column '{column}'")]
    CatalogParse {
        line: usize,
        column: String,
        value: String,
    },

    #[error("Loop catalog line {line}: expected at least {expected} fields, found {found}")]
    CatalogRowWidth {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Chromosome {chr}: {kind} '{id}' is missing from the derived locus index")]
    MissingLocus {
        chr: String,
        kind: &'static str,
        id: String,
    },

    #[error(transparent)]
    PairTable(#[from] PairTableError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
