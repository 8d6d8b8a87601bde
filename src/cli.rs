use clap::builder::styling::AnsiColor;
use clap::builder::Styles;
use clap::{Parser, Subcommand};

use crate::barcode::{DEFAULT_BARCODE, DEFAULT_QUALITY_CHAR, M13_ADAPTER};

const fn extra_build_info() -> &'static str {
    match option_env!("CARGO_BUILD_DESC") {
        Some(e) => e,
        None => env!("CARGO_PKG_VERSION"),
    }
}
pub const VERSION: &str = extra_build_info();
const INFO_STRING: &str = "
freqseq version ";
const AFTER_STRING: &str = "
   ──────────────────────────────────
   helpers for preparing FREQ-Seq barcoded reads and option files";

// colouring of the help
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().bold())
    .usage(AnsiColor::BrightMagenta.on_default().bold())
    .literal(AnsiColor::BrightMagenta.on_default())
    .placeholder(AnsiColor::White.on_default());

#[derive(Parser)]
#[command(
    version = VERSION,
    about = format!("{}{}{}", INFO_STRING, VERSION, AFTER_STRING),
    arg_required_else_help = true,
    flatten_help = true,
    styles = STYLES
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Prepend a barcode and adapter sequence to every read of a .fastq
    #[command(arg_required_else_help = true)]
    AddBarcode {
        /// the input .fastq file, or `-` for standard input
        input: String,

        /// the output .fastq file, or `-` for standard output
        output: String,

        /// the barcode placed at the very start of each read
        #[arg(long, value_parser = parse_dna, default_value = DEFAULT_BARCODE)]
        barcode: String,

        /// the adapter placed between the barcode and the original read
        #[arg(long, value_parser = parse_dna, default_value = M13_ADAPTER)]
        adapter: String,

        /// the quality character given to each added base
        #[arg(long, value_parser = parse_quality_char, default_value_t = DEFAULT_QUALITY_CHAR)]
        quality_char: char,

        /// fail, instead of warn, on reads whose sequence and quality lengths differ.
        /// also rejects sequences with characters outside of ACGTN
        #[arg(long, verbatim_doc_comment)]
        strict: bool,
    },

    /// Generate the XML for an <Options> node from C# field declarations
    OptionsXml {
        /// a file of declarations to scan. if not given, the built-in option
        /// declarations are used
        #[arg(short, long, verbatim_doc_comment)]
        input: Option<String>,

        /// the output file
        #[arg(short)]
        output: Option<String>,

        /// enclose the generated elements in an <Options> node
        #[arg(long)]
        wrap: bool,
    },
}

/// Accepts a non-empty sequence over `ACGTN`, returned in upper case.
pub fn parse_dna(arg: &str) -> Result<String, String> {
    if arg.is_empty() {
        return Err(String::from("sequence cannot be empty"));
    }
    if !crate::barcode::is_dna(arg.as_bytes()) {
        return Err(indoc::formatdoc! {"
            '{arg}' is not a DNA sequence. Only the characters A, C, G, T and N \
            are allowed, as in:
              --barcode CGTGAT
              --adapter GTAAAACGACGGCCAGT
            "});
    }
    Ok(arg.to_ascii_uppercase())
}

/// Accepts a single printable ASCII character, i.e. a Phred+33 quality from `!` to `~`.
pub fn parse_quality_char(arg: &str) -> Result<char, String> {
    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if ('!'..='~').contains(&c) => Ok(c),
        (Some(_), None) => Err(format!(
            "'{arg}' is not a quality character (should be between '!' and '~')"
        )),
        _ => Err(format!(
            "Expected a single quality character, got '{arg}'"
        )),
    }
}
