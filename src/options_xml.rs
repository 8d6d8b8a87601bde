use anyhow::{Context, Result};
use regex::bytes::Regex;
use std::io::Write;

// encode the default option declarations at compile time as a string literal
const DEFAULT_OPTIONS_TEXT: &str = include_str!("default_options.txt");

/// The node the allele finder reads its option settings from.
pub const OPTIONS_NODE_NAME: &str = "Options";

// a type keyword, whitespace, then the identifier. keywords are not anchored to a word boundary,
// and only ASCII whitespace separates tokens
const FIELD_PATTERN: &str = r"(bool|float|double|string|int)(?-u:\s)+((?-u:\S)*)";

/// The field types that can be declared in an options block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Bool,
    Float,
    Double,
    String,
    Int,
}

impl FieldType {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "bool" => Some(Self::Bool),
            "float" => Some(Self::Float),
            "double" => Some(Self::Double),
            "string" => Some(Self::String),
            "int" => Some(Self::Int),
            _ => None,
        }
    }

    /// The .NET type name written into the `Type` attribute.
    pub fn xml_type(&self) -> &'static str {
        match self {
            Self::Bool => "System.Boolean",
            Self::Float => "System.Single",
            Self::Double => "System.Double",
            Self::String => "System.String",
            Self::Int => "System.Int32",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub field_type: FieldType,
    pub name: String,
}

/// Scans `text` left to right for `<type> <identifier>` declarations, returning them in source
/// order. Matches with nothing after the whitespace are skipped.
pub fn extract_fields(text: &str) -> Result<Vec<FieldDescriptor>> {
    let re = Regex::new(FIELD_PATTERN).context("Invalid field pattern")?;

    let mut fields = Vec::new();
    for caps in re.captures_iter(text.as_bytes()) {
        let keyword = String::from_utf8_lossy(&caps[1]);
        let name = String::from_utf8_lossy(&caps[2]);

        if name.is_empty() {
            warn!("Found type '{keyword}' with no identifier after it, skipping");
            continue;
        }

        // the pattern only admits known keywords
        let field_type =
            FieldType::from_keyword(&keyword).context("Unrecognised field type keyword")?;

        fields.push(FieldDescriptor {
            field_type,
            name: name.into_owned(),
        });
    }

    Ok(fields)
}

/// Writes one `<name Type="..."> </name>` element per field. With `wrap`, the elements are
/// indented and enclosed in an `<Options>` node.
pub fn write_fields(
    writer: &mut impl Write,
    fields: &[FieldDescriptor],
    wrap: bool,
) -> std::io::Result<()> {
    let indent = if wrap { "  " } else { "" };

    if wrap {
        writeln!(writer, "<{OPTIONS_NODE_NAME}>")?;
    }
    for field in fields {
        writeln!(
            writer,
            "{indent}<{0} Type=\"{1}\"> </{0}>",
            field.name,
            field.field_type.xml_type()
        )?;
    }
    if wrap {
        writeln!(writer, "</{OPTIONS_NODE_NAME}>")?;
    }
    Ok(())
}

/// Emits the XML for the declarations in `input`, or for the built-in option declarations if no
/// input file is given. Returns the number of elements written.
pub fn emit(input: Option<&str>, writer: &mut impl Write, wrap: bool) -> Result<usize> {
    let text = match input {
        Some(path) => {
            info!("Reading declarations from {path}");
            std::fs::read_to_string(path).with_context(|| format!("Unable to read file {path}"))?
        }
        None => {
            info!("Using built-in option declarations");
            DEFAULT_OPTIONS_TEXT.to_string()
        }
    };

    let fields = extract_fields(&text)?;
    write_fields(writer, &fields, wrap)?;
    writer.flush()?;

    Ok(fields.len())
}
