#![deny(unsafe_code)]

//! Round files in and matcher input out.

pub mod discovery;
pub mod error;
pub mod prepare;
pub mod rounds;

pub use discovery::{RoundFile, discover_rounds, round_file_name};
pub use error::{IngestError, Result};
pub use prepare::{prepare_association_pairs, prepare_class_terms, split_optional_marker};
pub use rounds::{
    RawPair, read_association_round, read_class_round, write_association_round,
    write_class_round,
};
