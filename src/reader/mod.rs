pub mod fastq;

pub use fastq::{FastqReader, Record};

use thiserror::Error;

/// Errors raised while reading or validating FASTQ records. Record numbers are 1-indexed.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("record {record} is truncated: expected line {line} of 4, found end of input")]
    Truncated { record: usize, line: usize },

    #[error("record {record}: header line should start with '@', found {found:?}")]
    MissingHeader { record: usize, found: String },

    #[error("record {record}: found a blank line where a header was expected, but more records follow it")]
    BlankLine { record: usize },

    #[error("record {record}: separator line should start with '+', found {found:?}")]
    MissingSeparator { record: usize, found: String },

    #[error("record {record}: sequence has {seq_len} bases but quality has {qual_len} characters")]
    LengthMismatch {
        record: usize,
        seq_len: usize,
        qual_len: usize,
    },

    #[error("record {record}: sequence contains characters outside of ACGTN")]
    InvalidBase { record: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
