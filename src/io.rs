use crate::reader::Record;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{stdin, stdout, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// The conventional path used to mean standard input or standard output.
pub const STDIO_PATH: &str = "-";

/// Creates a buffered reader for the given input path. The path `-` reads from standard input.
///
/// # Errors
///
/// Returns an error, naming the path, if the file cannot be opened.
pub fn get_reader(input: &str) -> Result<Box<dyn BufRead>> {
    if input == STDIO_PATH {
        return Ok(Box::new(BufReader::new(stdin())));
    }

    let file = File::open(Path::new(input))
        .with_context(|| format!("Unable to open file {input}"))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Creates a `BufWriter` for the given output option. This allows for an output file to be passed
/// or otherwise will default to using standard output.
///
/// If `output` is `Some` (and not `-`), it creates a file at the specified path and returns a
/// `BufWriter` for it. Otherwise, it returns a `BufWriter` for the standard output.
///
/// # Errors
///
/// Returns an error, naming the path, if the file cannot be created.
pub fn get_writer(output: Option<&str>) -> Result<BufWriter<Box<dyn Write>>> {
    let writer = BufWriter::new(match output {
        Some(x) if x != STDIO_PATH => {
            let file = File::create(Path::new(x))
                .with_context(|| format!("Unable to create file {x}"))?;
            Box::new(file) as Box<dyn Write>
        }
        _ => Box::new(stdout()) as Box<dyn Write>,
    });
    Ok(writer)
}

/// Writes a record back out as four newline-terminated FASTQ lines, byte for byte.
///
/// Since this is `std::io::Write` and *not* `std::fmt::Write`, this does not accept Strings. It
/// is acceptable to use a `Vec<u8>` or `std::io::Cursor` instead.
pub fn write_record(writer: &mut impl Write, record: &Record) -> std::io::Result<()> {
    for line in [&record.header, &record.seq, &record.separator, &record.qual] {
        writer.write_all(line)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// A human-readable name for an output path, for log messages.
pub fn output_name(output: &str) -> &str {
    if output == STDIO_PATH {
        "standard output"
    } else {
        output
    }
}
