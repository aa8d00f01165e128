//! Lexer (tokenizer) for the netlist format.
//!
//! The format is line-oriented: every non-blank line is either an opening
//! tag, a closing tag or a `key: value` field, so the lexer produces exactly
//! one token per non-blank line.

use crate::error::{NetlistError, Result};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// Normalized tag name for tags, key for fields
    pub text: String,
    /// Trimmed field value (empty for tags)
    pub value: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column of the token's first character (1-indexed)
    pub column: usize,
    /// Column of the value's first character (fields only)
    pub value_column: usize,
}

/// Token types in the netlist format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `<Tag>`
    OpenTag,
    /// `</Tag>`
    CloseTag,
    /// `key: value`
    Field,
    /// End of input
    Eof,
}

/// Lexer for tokenizing netlist input.
///
/// Cloning a lexer snapshots its position, so a clone replays the remaining
/// tokens identically.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    lines: std::str::Lines<'a>,
    line: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        Self {
            lines: input.lines(),
            line: 0,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        for raw in self.lines.by_ref() {
            self.line += 1;
            let content = raw.trim();
            if content.is_empty() {
                continue;
            }
            let column = leading_columns(raw) + 1;
            return lex_line(content, self.line, column);
        }

        Ok(Token {
            kind: TokenKind::Eof,
            text: String::new(),
            value: String::new(),
            line: self.line + 1,
            column: 1,
            value_column: 1,
        })
    }
}

fn leading_columns(raw: &str) -> usize {
    raw.chars().take_while(|c| c.is_whitespace()).count()
}

fn lex_line(content: &str, line: usize, column: usize) -> Result<Token> {
    if let Some(rest) = content.strip_prefix('<') {
        let (kind, inner) = match rest.strip_prefix('/') {
            Some(inner) => (TokenKind::CloseTag, inner),
            None => (TokenKind::OpenTag, rest),
        };
        let inner = inner.strip_suffix('>').ok_or_else(|| {
            NetlistError::parse(line, column, format!("tag '{}' is missing its closing '>'", content))
        })?;
        let text = normalize_tag(inner);
        if text.is_empty() || text.contains(['<', '>', '/']) {
            return Err(NetlistError::parse(
                line,
                column,
                format!("malformed tag '{}'", content),
            ));
        }
        return Ok(Token {
            kind,
            text,
            value: String::new(),
            line,
            column,
            value_column: column,
        });
    }

    let Some(colon) = content.find(':') else {
        return Err(NetlistError::parse(
            line,
            column,
            format!("expected a block tag or 'key: value', found '{}'", content),
        ));
    };

    let key = content[..colon].trim();
    if key.is_empty() || !key.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(NetlistError::parse(
            line,
            column,
            format!("invalid field key '{}'", key),
        ));
    }

    let after_colon = &content[colon + 1..];
    let value_column = column + content[..=colon].chars().count() + leading_columns(after_colon);

    Ok(Token {
        kind: TokenKind::Field,
        text: key.to_string(),
        value: after_colon.trim().to_string(),
        line,
        column,
        value_column,
    })
}

/// Collapse internal whitespace runs so `<Voltage   Source>` matches `<Voltage Source>`.
fn normalize_tag(inner: &str) -> String {
    inner.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a number string with optional unit suffix.
///
/// Non-finite results (`inf`, `NaN`) are rejected.
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let (num_str, multiplier) = if let Some(last) = text.chars().last() {
        let mult = match last {
            'p' => 1e-12,
            'n' => 1e-9,
            'u' | 'µ' => 1e-6,
            'm' => 1e-3,
            'k' | 'K' => 1e3,
            'M' => 1e6,
            'G' => 1e9,
            _ => 1.0,
        };
        if mult != 1.0 {
            (&text[..text.len() - last.len_utf8()], mult)
        } else {
            (text, 1.0)
        }
    } else {
        (text, 1.0)
    };

    num_str
        .parse::<f64>()
        .ok()
        .map(|v| v * multiplier)
        .filter(|v| v.is_finite())
}

/// Parse a plain `x,y` coordinate pair.
pub fn parse_position(text: &str) -> Option<(f64, f64)> {
    let (x, y) = text.split_once(',')?;
    let coord = |s: &str| s.trim().parse::<f64>().ok().filter(|v| v.is_finite());
    Some((coord(x)?, coord(y)?))
}

/// Parse a `True`/`False` literal (case-insensitive).
pub fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Strip matching single or double quotes from a string literal.
pub fn parse_quoted(text: &str) -> Option<&str> {
    ['\'', '"'].into_iter().find_map(|quote| {
        text.strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
            .filter(|inner| !inner.contains(quote))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tokens(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token().unwrap();
            if tok.kind == TokenKind::Eof {
                break;
            }
            out.push(tok);
        }
        out
    }

    #[test]
    fn test_parse_value() {
        assert_relative_eq!(parse_value("10k").unwrap(), 10_000.0, max_relative = 1e-12);
        assert_relative_eq!(parse_value("100n").unwrap(), 100e-9, max_relative = 1e-12);
        assert_relative_eq!(parse_value("4.7u").unwrap(), 4.7e-6, max_relative = 1e-12);
        assert_relative_eq!(parse_value("50m").unwrap(), 0.05, max_relative = 1e-12);
        assert_relative_eq!(parse_value("1M").unwrap(), 1_000_000.0, max_relative = 1e-12);
        assert_relative_eq!(parse_value("-2.2").unwrap(), -2.2, max_relative = 1e-12);
        assert_relative_eq!(parse_value("1e-9").unwrap(), 1e-9, max_relative = 1e-12);
        assert_eq!(parse_value("ten"), None);
        assert_eq!(parse_value("inf"), None);
        assert_eq!(parse_value(""), None);
    }

    #[test]
    fn test_parse_literals() {
        assert_eq!(parse_position("0, -2.5"), Some((0.0, -2.5)));
        assert_eq!(parse_position("1 2"), None);
        assert_eq!(parse_position("1,NaN"), None);
        assert_eq!(parse_bool("True"), Some(true));
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("yes"), None);
        assert_eq!(parse_quoted("'V(t)'"), Some("V(t)"));
        assert_eq!(parse_quoted("\"A\""), Some("A"));
        assert_eq!(parse_quoted("'A\""), None);
        assert_eq!(parse_quoted("A"), None);
    }

    #[test]
    fn test_lexer_block() {
        let input = "<Voltage  Source>\n    name: 'V(t)'\n\n</Voltage Source>\n";
        let toks = tokens(input);
        assert_eq!(toks.len(), 3);

        assert_eq!(toks[0].kind, TokenKind::OpenTag);
        assert_eq!(toks[0].text, "Voltage Source");

        assert_eq!(toks[1].kind, TokenKind::Field);
        assert_eq!(toks[1].text, "name");
        assert_eq!(toks[1].value, "'V(t)'");
        assert_eq!(toks[1].line, 2);
        assert_eq!(toks[1].column, 5);
        assert_eq!(toks[1].value_column, 11);

        assert_eq!(toks[2].kind, TokenKind::CloseTag);
        assert_eq!(toks[2].line, 4);
    }

    #[test]
    fn test_lexer_rejects_garbage_line() {
        let mut lexer = Lexer::new("<Node>\n  just some words\n");
        lexer.next_token().unwrap();
        let err = lexer.next_token().unwrap_err();
        assert!(matches!(err, NetlistError::Parse { line: 2, column: 3, .. }));
    }

    #[test]
    fn test_lexer_rejects_unclosed_tag() {
        let mut lexer = Lexer::new("<Node\n");
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn test_lexer_strips_bom_and_crlf() {
        let toks = tokens("\u{feff}<Node>\r\n</Node>\r\n");
        assert_eq!(toks[0].text, "Node");
        assert_eq!(toks[1].kind, TokenKind::CloseTag);
    }
}
