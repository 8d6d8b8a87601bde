use super::ReadError;
use std::io::BufRead;

/// A single four-line FASTQ record, stored line-for-line as raw bytes without terminators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub header: Vec<u8>,
    pub seq: Vec<u8>,
    pub separator: Vec<u8>,
    pub qual: Vec<u8>,
}

impl Record {
    /// True when there is exactly one quality character per base.
    pub fn is_consistent(&self) -> bool {
        self.seq.len() == self.qual.len()
    }

    /// The header line for log messages. Bytes which are not UTF-8 are replaced.
    pub fn name(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.header)
    }

    /// Checks the record against the stricter rules used by `add-barcode --strict`:
    /// matching sequence and quality lengths, and a sequence drawn from ACGTN.
    pub fn validate(&self, record: usize) -> Result<(), ReadError> {
        if !self.is_consistent() {
            return Err(ReadError::LengthMismatch {
                record,
                seq_len: self.seq.len(),
                qual_len: self.qual.len(),
            });
        }
        if !crate::barcode::is_dna(&self.seq) {
            return Err(ReadError::InvalidBase { record });
        }
        Ok(())
    }
}

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(u8::is_ascii_whitespace)
}

/// Reads a FASTQ file four lines at a time. Lines are kept as bytes, so that header and
/// separator lines can be written back out unmodified whatever their encoding.
///
/// Iteration stops at end of input. Blank lines are allowed at the end of the file, but a blank
/// line followed by more records is an error. A record that is cut short, or whose
/// header/separator lines are malformed, yields an error and ends the iteration.
pub struct FastqReader<R: BufRead> {
    reader: R,
    records: usize,
    eof: bool,
}

impl<R: BufRead> FastqReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            records: 0,
            eof: false,
        }
    }

    /// The number of complete records read so far.
    pub fn records_read(&self) -> usize {
        self.records
    }

    // Returns None at end of input. Strips a trailing "\n" or "\r\n".
    fn read_line_trim_newline(&mut self) -> Result<Option<Vec<u8>>, ReadError> {
        let mut line = Vec::new();
        if self.reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }

        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    fn expect_line(&mut self, record: usize, line: usize) -> Result<Vec<u8>, ReadError> {
        self.read_line_trim_newline()?
            .ok_or(ReadError::Truncated { record, line })
    }

    // Called after a blank line in header position: only blank lines may follow it.
    fn skip_trailing_blank_lines(&mut self, record: usize) -> Result<(), ReadError> {
        while let Some(line) = self.read_line_trim_newline()? {
            if !is_blank(&line) {
                return Err(ReadError::BlankLine { record });
            }
        }
        Ok(())
    }

    fn read_record(&mut self) -> Result<Option<Record>, ReadError> {
        let record = self.records + 1;

        // line 1: header, or the end of the file
        let header = match self.read_line_trim_newline()? {
            None => return Ok(None),
            Some(h) if is_blank(&h) => {
                self.skip_trailing_blank_lines(record)?;
                return Ok(None);
            }
            Some(h) => h,
        };
        if !header.starts_with(b"@") {
            return Err(ReadError::MissingHeader {
                record,
                found: String::from_utf8_lossy(&header).into_owned(),
            });
        }

        // line 2: sequence
        let seq = self.expect_line(record, 2)?;

        // line 3: '+', possibly followed by the read name again
        let separator = self.expect_line(record, 3)?;
        if !separator.starts_with(b"+") {
            return Err(ReadError::MissingSeparator {
                record,
                found: String::from_utf8_lossy(&separator).into_owned(),
            });
        }

        // line 4: quality scores
        let qual = self.expect_line(record, 4)?;

        self.records += 1;
        Ok(Some(Record {
            header,
            seq,
            separator,
            qual,
        }))
    }
}

impl<R: BufRead> Iterator for FastqReader<R> {
    type Item = Result<Record, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.eof {
            return None;
        }

        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.eof = true;
                None
            }
            Err(e) => {
                self.eof = true;
                Some(Err(e))
            }
        }
    }
}
