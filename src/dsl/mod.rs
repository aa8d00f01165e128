//! Parser and writer for the tagged-block netlist format.
//!
//! A netlist is a sequence of blocks. Each block opens with a `<Tag>` line,
//! holds one `key: value` field per line and closes with a matching
//! `</Tag>` line. Blank lines and surrounding whitespace are insignificant.
//!
//! # Grammar Overview
//!
//! ```text
//! netlist    = { block | blank }
//! block      = '<' tag '>' { field | blank } '</' tag '>'
//! field      = key ':' value
//!
//! tag        = "Node" | "Wire" | "Resistor" | "Capacitor" | "Inductor" | "Voltage Source"
//! string     = "'" { char } "'" | '"' { char } '"'
//! position   = number ',' number
//! bool       = "True" | "False"
//! value      = number [unit_suffix]
//! unit_suffix = 'p' | 'n' | 'u' | 'm' | 'k' | 'M' | 'G'
//! ```
//!
//! Tags match case-insensitively and runs of whitespace inside a tag count
//! as one space. Keys are case-sensitive.
//!
//! # Block Types
//!
//! | Tag | Required keys | Optional keys |
//! |-----|---------------|---------------|
//! | Node | `name`, `position`, `draw` | |
//! | Wire | `name`, `node1`, `node2` | |
//! | Resistor | `name`, `node1`, `node2` | `value` (Ω) |
//! | Capacitor | `name`, `node1`, `node2` | `value` (F) |
//! | Inductor | `name`, `node1`, `node2` | `value` (H) |
//! | Voltage Source | `name`, `node1`, `node2` | `amplitude` (V), `frequency` (rad/s), `phase` (rad) |
//!
//! # Example
//!
//! ```text
//! <Node>
//!     name: 'NodeTM'
//!     position: 2,2
//!     draw: True
//! </Node>
//!
//! <Resistor>
//!     name: 'R'
//!     node1: 'NodeTM'
//!     node2: 'NodeBM'
//!     value: 10
//! </Resistor>
//! ```

mod ast;
mod lexer;
mod parser;
mod writer;

pub use ast::*;
pub use lexer::{parse_value, Lexer, Token, TokenKind};
pub use parser::Parser;
pub use writer::write_circuit;

use crate::error::Result;

/// Lazily iterate over the blocks of a netlist string.
///
/// Calling this again on the same text yields an identical sequence.
pub fn records(input: &str) -> Parser<'_> {
    Parser::new(Lexer::new(input))
}

/// Parse a netlist string into an AST.
pub fn parse(input: &str) -> Result<NetlistAst> {
    records(input).parse()
}

/// Parse a netlist file.
pub fn parse_file(path: &std::path::Path) -> Result<NetlistAst> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::NetlistError::FileRead {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
