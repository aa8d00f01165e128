//! Error types for netlist loading.
//!
//! This module provides a unified error type [`NetlistError`] covering every
//! way a load can fail: malformed syntax in the netlist text, structural or
//! referential integrity violations found while building the circuit graph,
//! and failure to read the netlist file itself.
//!
//! Loading is all-or-nothing: the first error aborts the load and no partial
//! [`Circuit`](crate::Circuit) is returned.

use thiserror::Error;

use crate::dsl::ElementKind;

/// Result type alias using [`NetlistError`].
pub type Result<T> = std::result::Result<T, NetlistError>;

/// Unified error type for all netlist operations.
#[derive(Error, Debug)]
pub enum NetlistError {
    // ============ Syntax Errors ============
    /// Malformed netlist text
    #[error("Parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    // ============ Integrity Errors ============
    /// Two `<Node>` blocks share a name
    #[error("Duplicate node '{name}' at line {line} (first declared at line {first_line})")]
    DuplicateNode {
        name: String,
        line: usize,
        first_line: usize,
    },

    /// Two element blocks share a name
    #[error("Duplicate element name '{name}' on {kind} at line {line} (first declared at line {first_line})")]
    DuplicateElement {
        name: String,
        kind: ElementKind,
        line: usize,
        first_line: usize,
    },

    /// An element endpoint names a node that was never declared
    #[error("{kind} '{element}' at line {line} references unknown node '{node}'")]
    UnknownNodeReference {
        element: String,
        kind: ElementKind,
        node: String,
        line: usize,
    },

    /// Both endpoints of an element are the same node
    #[error("{kind} '{element}' at line {line} connects node '{node}' to itself")]
    SelfLoop {
        element: String,
        kind: ElementKind,
        node: String,
        line: usize,
    },

    // ============ I/O Errors ============
    /// Error reading the netlist file
    #[error("Failed to read netlist file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl NetlistError {
    /// Create a parse error
    pub fn parse(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create an unknown node reference error
    pub fn unknown_node(
        element: impl Into<String>,
        kind: ElementKind,
        node: impl Into<String>,
        line: usize,
    ) -> Self {
        Self::UnknownNodeReference {
            element: element.into(),
            kind,
            node: node.into(),
            line,
        }
    }

    /// Source line the error points at, if it came from netlist text.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Parse { line, .. }
            | Self::DuplicateNode { line, .. }
            | Self::DuplicateElement { line, .. }
            | Self::UnknownNodeReference { line, .. }
            | Self::SelfLoop { line, .. } => Some(*line),
            Self::FileRead { .. } => None,
        }
    }

    /// Whether this is a syntax error rather than an integrity violation.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_location() {
        let err = NetlistError::unknown_node("R1", ElementKind::Resistor, "DoesNotExist", 14);
        assert_eq!(
            err.to_string(),
            "Resistor 'R1' at line 14 references unknown node 'DoesNotExist'"
        );
        assert_eq!(err.line(), Some(14));
        assert!(!err.is_parse_error());
    }

    #[test]
    fn test_voltage_source_kind_uses_tag_spelling() {
        let err = NetlistError::SelfLoop {
            element: "V1".to_string(),
            kind: ElementKind::VoltageSource,
            node: "A".to_string(),
            line: 3,
        };
        assert_eq!(
            err.to_string(),
            "Voltage Source 'V1' at line 3 connects node 'A' to itself"
        );
    }

    #[test]
    fn test_file_read_has_no_line() {
        let err = NetlistError::FileRead {
            path: "missing.txt".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.line(), None);
        assert!(std::error::Error::source(&err).is_some());
    }
}
