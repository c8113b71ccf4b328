pub mod assembler;
pub mod error;
pub mod label;
pub mod parser;

pub use assembler::{assemble, assemble_with, assemble_words, collect_labels, dump};
pub use error::{Error, SourceError};
pub use label::Labels;
