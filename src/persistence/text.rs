//! Save-text adapter for the node tree.
//!
//! Parses and writes the brace-delimited text form the host save file
//! embeds:
//!
//! ```text
//! VESSEL_BOOKMARKS
//! {
//!     BOOKMARK
//!     {
//!         id = 555
//!         kind = Vessel
//!     }
//! }
//! ```
//!
//! Node names and value keys are identifier-shaped; values run to the end
//! of the line, so multi-line values are not representable here (the
//! in-memory [`SaveNode`] tree has no such restriction).

use nom::{
    branch::alt,
    bytes::complete::{is_not, take_while1},
    character::complete::{char, multispace0, space0},
    combinator::{map, opt},
    multi::many0,
    IResult,
};

use crate::persistence::save_node::SaveNode;
use crate::types::errors::TextError;

enum Entry {
    Value(String, String),
    Child(SaveNode),
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '-')(input)
}

/// One `key = value` line. The value may be empty and is trimmed of
/// trailing whitespace.
fn value_line(input: &str) -> IResult<&str, (String, String)> {
    let (input, _) = multispace0(input)?;
    let (input, key) = identifier(input)?;
    let (input, _) = space0(input)?;
    let (input, _) = char('=')(input)?;
    let (input, _) = space0(input)?;
    let (input, value) = opt(is_not("\r\n"))(input)?;
    Ok((
        input,
        (key.to_string(), value.unwrap_or("").trim_end().to_string()),
    ))
}

fn entry(input: &str) -> IResult<&str, Entry> {
    alt((
        map(value_line, |(k, v)| Entry::Value(k, v)),
        map(node, Entry::Child),
    ))(input)
}

fn node(input: &str) -> IResult<&str, SaveNode> {
    let (input, _) = multispace0(input)?;
    let (input, name) = identifier(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char('{')(input)?;
    let (input, entries) = many0(entry)(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char('}')(input)?;

    let mut result = SaveNode::new(name);
    for e in entries {
        match e {
            Entry::Value(k, v) => result.push_value(k, v),
            Entry::Child(c) => {
                result.add_child(c);
            }
        }
    }
    Ok((input, result))
}

/// Parses one node document, requiring the whole input to be consumed
/// apart from trailing whitespace.
pub fn from_str(input: &str) -> Result<SaveNode, TextError> {
    match node(input) {
        Ok((rest, parsed)) => {
            let rest = rest.trim();
            if rest.is_empty() {
                Ok(parsed)
            } else {
                Err(TextError::TrailingInput(rest.to_string()))
            }
        }
        Err(err) => Err(TextError::Syntax(format!("{:?}", err))),
    }
}

/// Renders a node tree in the save-text form, tab-indented.
pub fn to_string(root: &SaveNode) -> String {
    let mut out = String::new();
    write_node(&mut out, root, 0);
    out
}

fn write_node(out: &mut String, node: &SaveNode, depth: usize) {
    let indent = "\t".repeat(depth);
    out.push_str(&indent);
    out.push_str(node.name());
    out.push('\n');
    out.push_str(&indent);
    out.push_str("{\n");

    let inner = "\t".repeat(depth + 1);
    for (key, value) in node.values() {
        out.push_str(&inner);
        out.push_str(key);
        out.push_str(" = ");
        out.push_str(value);
        out.push('\n');
    }
    for child in node.children() {
        write_node(out, child, depth + 1);
    }

    out.push_str(&indent);
    out.push_str("}\n");
}
