pub mod combiner;
pub mod domain;
pub mod error;

// --- public re-exports ---
pub use combiner::{combine, combine_into};
pub use error::CombineError;
