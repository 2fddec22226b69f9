pub mod loci;
pub mod pair_table;

// re-export for cleaner imports
pub use self::loci::{ChromosomeGroup, ElementLocus, GeneLocus};
pub use self::pair_table::PairTable;
