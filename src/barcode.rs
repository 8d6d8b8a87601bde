use crate::io::write_record;
use crate::reader::{FastqReader, Record};
use anyhow::Result;
use bio::alphabets::dna;
use std::io::{BufRead, Write};

/// The sample barcode added in front of every read by default.
pub const DEFAULT_BARCODE: &str = "CGTGAT";
/// The M13 forward primer, which sits between the barcode and the original read.
pub const M13_ADAPTER: &str = "GTAAAACGACGGCCAGT";
/// The quality character given to every added base by default.
pub const DEFAULT_QUALITY_CHAR: char = 'F';

/// Returns true if every byte is one of `ACGTN` (in either case).
pub fn is_dna(seq: &[u8]) -> bool {
    dna::n_alphabet().is_word(seq)
}

/// The bases and matching quality characters added to the front of each read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefix {
    pub seq: String,
    pub qual: String,
}

impl Prefix {
    /// Builds the prefix `barcode + adapter`, with one `quality_char` per base.
    pub fn new(barcode: &str, adapter: &str, quality_char: char) -> Self {
        let seq = format!("{barcode}{adapter}");
        let qual = quality_char.to_string().repeat(seq.len());
        Self { seq, qual }
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Prepends the prefix to the sequence and quality lines of a record. The header and
    /// separator lines are left as they are.
    pub fn apply(&self, record: Record) -> Record {
        Record {
            seq: [self.seq.as_bytes(), record.seq.as_slice()].concat(),
            qual: [self.qual.as_bytes(), record.qual.as_slice()].concat(),
            ..record
        }
    }
}

impl Default for Prefix {
    fn default() -> Self {
        Self::new(DEFAULT_BARCODE, M13_ADAPTER, DEFAULT_QUALITY_CHAR)
    }
}

/// Totals gathered over a single `add_barcode` run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Records written to the output
    pub records: usize,
    /// Bases added across all records
    pub bases_added: usize,
    /// Records whose input sequence and quality lengths differed
    pub mismatched: usize,
}

/// Prepends `prefix` to every record read from `reader`, writing the results to `writer`.
///
/// When `strict` is set, a record whose sequence and quality lengths differ, or whose sequence
/// contains characters outside of `ACGTN`, is an error. Otherwise length mismatches are passed
/// through with a warning.
///
/// # Errors
///
/// Returns an error if a record is truncated or malformed (see `ReadError`), if a record fails
/// the strict checks, or if writing fails. Records before the failing one have already been
/// written when this happens.
pub fn add_barcode<R: BufRead>(
    reader: R,
    writer: &mut impl Write,
    prefix: &Prefix,
    strict: bool,
) -> Result<Summary> {
    let mut summary = Summary::default();
    let mut records = FastqReader::new(reader);

    while let Some(record) = records.next() {
        let record = record?;
        let index = records.records_read();

        if strict {
            record.validate(index)?;
        } else if !record.is_consistent() {
            warn!(
                "Record {index} ({}) has {} bases but {} quality characters",
                record.name(),
                record.seq.len(),
                record.qual.len()
            );
            summary.mismatched += 1;
        }

        let record = prefix.apply(record);
        debug!("{}", String::from_utf8_lossy(&record.qual));
        write_record(writer, &record)?;

        summary.records += 1;
        summary.bases_added += prefix.len();
    }

    writer.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::ReadError;
    use indoc::indoc;
    use std::io::Cursor;

    fn run_bytes(input: &[u8], prefix: &Prefix, strict: bool) -> Result<(Vec<u8>, Summary)> {
        let mut out = Vec::new();
        let summary = add_barcode(Cursor::new(input.to_vec()), &mut out, prefix, strict)?;
        Ok((out, summary))
    }

    fn run(input: &str, prefix: &Prefix, strict: bool) -> Result<(String, Summary)> {
        let (out, summary) = run_bytes(input.as_bytes(), prefix, strict)?;
        Ok((String::from_utf8(out)?, summary))
    }

    #[test]
    fn default_prefix() {
        let prefix = Prefix::default();
        assert_eq!(prefix.seq, "CGTGATGTAAAACGACGGCCAGT");
        assert_eq!(prefix.qual, "F".repeat(23));
        assert_eq!(prefix.len(), 23);
        assert!(!prefix.is_empty());
        assert!(Prefix::new("", "", 'F').is_empty());
    }

    #[test]
    fn prepends_to_record() {
        let (out, summary) = run("@r1\nACGT\n+\nFFFF\n", &Prefix::default(), false).unwrap();

        assert_eq!(
            out,
            indoc! {"
                @r1
                CGTGATGTAAAACGACGGCCAGTACGT
                +
                FFFFFFFFFFFFFFFFFFFFFFFFFFF
            "}
        );
        assert_eq!(
            summary,
            Summary {
                records: 1,
                bases_added: 23,
                mismatched: 0
            }
        );
    }

    #[test]
    fn quality_matches_sequence_length() {
        let input = indoc! {"
            @read_1 1:N:0
            ACGTNACGTA
            +read_1 1:N:0
            #########I
            @read_2
            T
            +
            ?
        "};
        let prefix = Prefix::new("AAAAAA", M13_ADAPTER, '5');
        let (out, _) = run(input, &prefix, true).unwrap();

        let records: Vec<Record> = FastqReader::new(Cursor::new(out.into_bytes()))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(records.len(), 2);
        for record in records.iter() {
            assert!(record.seq.starts_with(prefix.seq.as_bytes()));
            assert!(record.qual.starts_with(b"55555"));
            assert_eq!(record.seq.len(), record.qual.len());
        }
        assert_eq!(records[0].header, b"@read_1 1:N:0");
        assert_eq!(records[0].separator, b"+read_1 1:N:0");
        assert_eq!(records[1].qual, format!("{}?", "5".repeat(23)).into_bytes());
    }

    #[test]
    fn applying_twice_prefixes_twice() {
        let prefix = Prefix::default();
        let (once, _) = run("@r1\nACGT\n+\nFFFF\n", &prefix, false).unwrap();
        let (twice, _) = run(&once, &prefix, false).unwrap();

        let seq = twice.lines().nth(1).unwrap();
        assert_eq!(seq, format!("{0}{0}ACGT", prefix.seq));
    }

    #[test]
    fn empty_input() {
        let (out, summary) = run("", &Prefix::default(), true).unwrap();
        assert!(out.is_empty());
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn permissive_length_mismatch() {
        let (out, summary) = run("@r1\nACGT\n+\nFF\n", &Prefix::default(), false).unwrap();
        assert_eq!(summary.mismatched, 1);
        assert_eq!(out.lines().nth(3).unwrap().len(), 25);
    }

    #[test]
    fn strict_length_mismatch() {
        let err = run("@r1\nACGT\n+\nFFFF\n@r2\nACGT\n+\nFF\n", &Prefix::default(), true)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReadError>(),
            Some(ReadError::LengthMismatch { record: 2, .. })
        ));
    }

    #[test]
    fn strict_invalid_base() {
        let err = run("@r1\nACGU\n+\nFFFF\n", &Prefix::default(), true).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReadError>(),
            Some(ReadError::InvalidBase { record: 1 })
        ));
    }

    #[test]
    fn non_utf8_header_passes_through() {
        let input = b"@r1\nACGT\n+\nFFFF\n@r2 caf\xe9\nGG\n+r2 caf\xe9\nFF\n";
        let (out, summary) = run_bytes(input, &Prefix::default(), true).unwrap();

        assert_eq!(summary.records, 2);
        let expected = [
            b"@r2 caf\xe9\n".to_vec(),
            format!("{}GG\n", Prefix::default().seq).into_bytes(),
            b"+r2 caf\xe9\n".to_vec(),
        ]
        .concat();
        assert!(out.windows(expected.len()).any(|w| w == expected.as_slice()));
    }

    #[test]
    fn blank_line_between_records_fails() {
        let err = run("@r1\nACGT\n+\nFFFF\n\n@r2\nGG\n+\nFF\n", &Prefix::default(), true)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReadError>(),
            Some(ReadError::BlankLine { record: 2 })
        ));
    }

    #[test]
    fn trailing_blank_lines_are_ignored() {
        let (_, summary) = run("@r1\nACGT\n+\nFFFF\n\n\n", &Prefix::default(), true).unwrap();
        assert_eq!(summary.records, 1);
    }

    #[test]
    fn truncated_record_fails() {
        let err = run("@r1\nACGT\n+\n", &Prefix::default(), false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReadError>(),
            Some(ReadError::Truncated { record: 1, line: 4 })
        ));
    }

    #[test]
    fn dna_alphabet() {
        assert!(is_dna(b"ACGTN"));
        assert!(is_dna(b"acgtn"));
        assert!(is_dna(b""));
        assert!(!is_dna(b"ACGU"));
        assert!(!is_dna(b"AC GT"));
    }
}
