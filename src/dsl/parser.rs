//! Parser for the netlist format.

use std::iter::FusedIterator;

use log::trace;

use super::ast::*;
use super::lexer::{parse_bool, parse_position, parse_quoted, parse_value, Lexer, Token, TokenKind};
use crate::error::{NetlistError, Result};

/// Parser for netlist text.
///
/// The parser is an iterator over [`Block`]s: records are produced lazily,
/// one block per call, in declaration order. The first error is yielded once
/// and ends the sequence. Cloning a parser (or building a new one over the
/// same text) replays the same sequence.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    finished: bool,
}

/// What an opening tag introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Node,
    Element(ElementKind),
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self {
            lexer,
            finished: false,
        }
    }

    /// Parse the entire netlist.
    pub fn parse(&mut self) -> Result<NetlistAst> {
        self.by_ref().collect()
    }

    /// Parse the next block, or `None` at end of input.
    pub fn next_block(&mut self) -> Result<Option<Block>> {
        let tok = self.lexer.next_token()?;
        match tok.kind {
            TokenKind::Eof => Ok(None),
            TokenKind::OpenTag => self.parse_block(tok).map(Some),
            TokenKind::CloseTag => Err(NetlistError::parse(
                tok.line,
                tok.column,
                format!("closing tag </{}> has no open block", tok.text),
            )),
            TokenKind::Field => Err(NetlistError::parse(
                tok.line,
                tok.column,
                format!("field '{}' appears outside of any block", tok.text),
            )),
        }
    }

    fn parse_block(&mut self, open: Token) -> Result<Block> {
        let kind = if open.text.eq_ignore_ascii_case(NODE_TAG) {
            BlockKind::Node
        } else {
            let element_kind = ElementKind::from_tag(&open.text).ok_or_else(|| {
                NetlistError::parse(
                    open.line,
                    open.column,
                    format!("unrecognized tag <{}>", open.text),
                )
            })?;
            BlockKind::Element(element_kind)
        };

        let fields = self.read_fields(&open)?;
        let block = match kind {
            BlockKind::Node => Block::Node(build_node(&open, &fields)?),
            BlockKind::Element(kind) => Block::Element(build_element(kind, &open, &fields)?),
        };

        trace!("parsed <{}> '{}' at line {}", block.tag(), block.name(), block.line());
        Ok(block)
    }

    /// Read `key: value` fields up to the closing tag matching `open`.
    fn read_fields(&mut self, open: &Token) -> Result<Vec<Token>> {
        let mut fields: Vec<Token> = Vec::new();

        loop {
            let tok = self.lexer.next_token()?;
            match tok.kind {
                TokenKind::Field => {
                    if fields.iter().any(|f| f.text == tok.text) {
                        return Err(NetlistError::parse(
                            tok.line,
                            tok.column,
                            format!("duplicate key '{}' in <{}> block", tok.text, open.text),
                        ));
                    }
                    fields.push(tok);
                }
                TokenKind::CloseTag if tok.text.eq_ignore_ascii_case(&open.text) => {
                    return Ok(fields);
                }
                TokenKind::CloseTag => {
                    return Err(NetlistError::parse(
                        tok.line,
                        tok.column,
                        format!(
                            "closing tag </{}> does not match <{}> opened at line {}",
                            tok.text, open.text, open.line
                        ),
                    ));
                }
                TokenKind::OpenTag => {
                    return Err(NetlistError::parse(
                        tok.line,
                        tok.column,
                        format!(
                            "unterminated <{}> block opened at line {}: found <{}> before </{}>",
                            open.text, open.line, tok.text, open.text
                        ),
                    ));
                }
                TokenKind::Eof => {
                    return Err(NetlistError::parse(
                        open.line,
                        open.column,
                        format!(
                            "unterminated <{}> block: end of input before </{}>",
                            open.text, open.text
                        ),
                    ));
                }
            }
        }
    }
}

impl Iterator for Parser<'_> {
    type Item = Result<Block>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_block() {
            Ok(Some(block)) => Some(Ok(block)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for Parser<'_> {}

fn build_node(open: &Token, fields: &[Token]) -> Result<NodeDef> {
    let mut name = None;
    let mut position = None;
    let mut draw = None;

    for field in fields {
        match field.text.as_str() {
            "name" => name = Some(quoted(field)?),
            "position" => {
                position = Some(parse_position(&field.value).ok_or_else(|| {
                    invalid_value(field, "a finite 'x,y' number pair")
                })?);
            }
            "draw" => {
                draw = Some(parse_bool(&field.value).ok_or_else(|| invalid_value(field, "True or False"))?);
            }
            _ => return Err(unknown_key(field, open)),
        }
    }

    Ok(NodeDef {
        name: required(name, "name", open)?,
        position: required(position, "position", open)?,
        draw: required(draw, "draw", open)?,
        line: open.line,
    })
}

fn build_element(kind: ElementKind, open: &Token, fields: &[Token]) -> Result<ElementDef> {
    let mut name = None;
    let mut node1 = None;
    let mut node2 = None;
    let mut params = ElementParams::default();

    for field in fields {
        match field.text.as_str() {
            "name" => name = Some(quoted(field)?),
            "node1" => node1 = Some(quoted(field)?),
            "node2" => node2 = Some(quoted(field)?),
            key if kind.param_keys().contains(&key) => {
                let value = parse_value(&field.value).ok_or_else(|| invalid_value(field, "a number"))?;
                if let Some(slot) = params.slot_mut(key) {
                    *slot = Some(value);
                }
            }
            _ => return Err(unknown_key(field, open)),
        }
    }

    Ok(ElementDef {
        kind,
        name: required(name, "name", open)?,
        node1: required(node1, "node1", open)?,
        node2: required(node2, "node2", open)?,
        params,
        line: open.line,
    })
}

fn quoted(field: &Token) -> Result<String> {
    match parse_quoted(&field.value) {
        Some("") => Err(NetlistError::parse(
            field.line,
            field.value_column,
            format!("'{}' must not be empty", field.text),
        )),
        Some(inner) => Ok(inner.to_string()),
        None => Err(invalid_value(field, "a quoted string")),
    }
}

fn required<T>(value: Option<T>, key: &str, open: &Token) -> Result<T> {
    value.ok_or_else(|| {
        NetlistError::parse(
            open.line,
            open.column,
            format!("<{}> block is missing required key '{}'", open.text, key),
        )
    })
}

fn invalid_value(field: &Token, expected: &str) -> NetlistError {
    NetlistError::parse(
        field.line,
        field.value_column,
        format!(
            "invalid value for '{}': expected {}, found '{}'",
            field.text, expected, field.value
        ),
    )
}

fn unknown_key(field: &Token, open: &Token) -> NetlistError {
    NetlistError::parse(
        field.line,
        field.column,
        format!("unknown key '{}' in <{}> block", field.text, open.text),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn parse(input: &str) -> Result<NetlistAst> {
        super::super::parse(input)
    }

    fn parse_err(input: &str) -> (usize, usize, String) {
        match parse(input) {
            Err(NetlistError::Parse {
                line,
                column,
                message,
            }) => (line, column, message),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_node() {
        let ast = parse("<Node>\n    name: 'NodeTL'\n    position: 0,2\n    draw: False\n</Node>\n").unwrap();
        assert_eq!(
            ast.blocks,
            vec![Block::Node(NodeDef {
                name: "NodeTL".to_string(),
                position: (0.0, 2.0),
                draw: false,
                line: 1,
            })]
        );
    }

    #[test]
    fn test_parse_voltage_source_with_params() {
        let input = "<Voltage Source>\n  name: 'V(t)'\n  node1: 'a'\n  node2: 'b'\n  amplitude: 20\n  frequency: 20\n  phase: 0\n</Voltage Source>";
        let ast = parse(input).unwrap();
        let element = ast.elements().next().unwrap();
        assert_eq!(element.kind, ElementKind::VoltageSource);
        assert_eq!(element.name, "V(t)");
        assert_eq!(element.params.amplitude, Some(20.0));
        assert_eq!(element.params.frequency, Some(20.0));
        assert_eq!(element.params.phase, Some(0.0));
        assert_eq!(element.params.value, None);
    }

    #[test]
    fn test_parse_component_value_suffix() {
        let input = "<Capacitor>\n  name: 'C'\n  node1: 'a'\n  node2: 'b'\n  value: 50m\n</Capacitor>";
        let ast = parse(input).unwrap();
        let element = ast.elements().next().unwrap();
        assert_relative_eq!(element.params.value.unwrap(), 0.05, max_relative = 1e-12);
    }

    #[test]
    fn test_tags_are_case_insensitive() {
        let input = "<node>\n name: 'A'\n position: 1,1\n draw: true\n</NODE>\n<voltage source>\n name: 'V'\n node1: 'A'\n node2: 'B'\n</Voltage Source>";
        let ast = parse(input).unwrap();
        assert_eq!(ast.blocks.len(), 2);
        assert_eq!(ast.blocks[1].tag(), "Voltage Source");
    }

    #[test]
    fn test_unterminated_block() {
        let (line, _, message) = parse_err("<Node>\n  name: 'A'\n  position: 0,0\n  draw: True\n");
        assert_eq!(line, 1);
        assert!(message.contains("unterminated <Node>"), "{}", message);
    }

    #[test]
    fn test_open_tag_inside_block() {
        let (line, _, message) = parse_err("<Node>\n  name: 'A'\n<Wire>\n</Wire>\n");
        assert_eq!(line, 3);
        assert!(message.contains("unterminated <Node>"), "{}", message);
    }

    #[test]
    fn test_mismatched_close_tag() {
        let (line, _, message) = parse_err("<Wire>\n  name: 'w'\n  node1: 'a'\n  node2: 'b'\n</Resistor>\n");
        assert_eq!(line, 5);
        assert!(message.contains("does not match"), "{}", message);
    }

    #[test]
    fn test_unrecognized_tag_rejected() {
        let (line, column, message) = parse_err("\n  <Diode>\n  name: 'D1'\n</Diode>\n");
        assert_eq!((line, column), (2, 3));
        assert!(message.contains("unrecognized tag <Diode>"), "{}", message);
    }

    #[test]
    fn test_bad_values() {
        let (_, column, message) = parse_err("<Node>\n    name: 'A'\n    position: 1;2\n    draw: True\n</Node>");
        assert_eq!(column, 15);
        assert!(message.contains("'position'"), "{}", message);

        let (_, _, message) = parse_err("<Node>\n name: 'A'\n position: 1,2\n draw: maybe\n</Node>");
        assert!(message.contains("True or False"), "{}", message);

        let (_, _, message) = parse_err("<Wire>\n name: w\n node1: 'a'\n node2: 'b'\n</Wire>");
        assert!(message.contains("quoted string"), "{}", message);

        let (_, _, message) = parse_err("<Resistor>\n name: 'R'\n node1: 'a'\n node2: 'b'\n value: lots\n</Resistor>");
        assert!(message.contains("'value'"), "{}", message);
    }

    #[test]
    fn test_key_rules() {
        let (_, _, message) = parse_err("<Wire>\n name: 'w'\n node1: 'a'\n node2: 'b'\n value: 1\n</Wire>");
        assert!(message.contains("unknown key 'value' in <Wire>"), "{}", message);

        let (_, _, message) = parse_err("<Wire>\n name: 'w'\n name: 'x'\n</Wire>");
        assert!(message.contains("duplicate key 'name'"), "{}", message);

        let (line, _, message) = parse_err("\n<Wire>\n name: 'w'\n node1: 'a'\n</Wire>");
        assert_eq!(line, 2);
        assert!(message.contains("missing required key 'node2'"), "{}", message);

        let (_, _, message) = parse_err("<Node>\n name: ''\n position: 0,0\n draw: True\n</Node>");
        assert!(message.contains("must not be empty"), "{}", message);
    }

    #[test]
    fn test_stray_lines_outside_blocks() {
        let (line, _, _) = parse_err("name: 'A'\n");
        assert_eq!(line, 1);
        let (line, _, message) = parse_err("</Node>\n");
        assert_eq!(line, 1);
        assert!(message.contains("no open block"), "{}", message);
    }

    #[test]
    fn test_lazy_and_fused_after_error() {
        let input = "<Node>\n name: 'A'\n position: 0,0\n draw: True\n</Node>\n<Bogus>\n</Bogus>\n<Node>\n name: 'B'\n position: 1,0\n draw: True\n</Node>\n";
        let mut parser = Parser::new(Lexer::new(input));
        assert!(matches!(parser.next(), Some(Ok(Block::Node(_)))));
        assert!(matches!(parser.next(), Some(Err(NetlistError::Parse { line: 6, .. }))));
        assert!(parser.next().is_none());
        assert!(parser.next().is_none());
    }

    #[test]
    fn test_restartable() {
        let input = "<Node>\n name: 'A'\n position: 0,0\n draw: True\n</Node>\n<Wire>\n name: 'w'\n node1: 'A'\n node2: 'B'\n</Wire>\n";
        let mut parser = Parser::new(Lexer::new(input));
        parser.next();
        let replay = parser.clone();
        let rest: Vec<_> = parser.collect::<Result<_>>().unwrap();
        let replayed: Vec<_> = replay.collect::<Result<_>>().unwrap();
        assert_eq!(rest, replayed);
        assert_eq!(parse(input).unwrap(), parse(input).unwrap());
    }
}
