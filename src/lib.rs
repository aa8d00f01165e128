//! # Netlist Core
//!
//! Parsing and circuit-graph construction for tagged-block circuit netlists.
//!
//! This library provides:
//! - A parser for the `<Tag>` … `</Tag>` netlist format (nodes with schematic
//!   positions, two-terminal wires, resistors, capacitors, inductors and
//!   voltage sources)
//! - Referential integrity validation (duplicate names, unknown node
//!   references, self-loops)
//! - A validated, immutable circuit graph with a per-node adjacency index
//! - A writer that serializes a circuit back into the same format
//!
//! ## Architecture
//!
//! - [`dsl`] - Lexer, parser and writer for the netlist text format
//! - [`circuit`] - Circuit graph representation and validation
//! - [`error`] - The [`NetlistError`] taxonomy
//!
//! Data flows one way: text → [`dsl::Block`] records → [`Circuit`]. Loading is
//! all-or-nothing: the first syntax or integrity error aborts the load.
//!
//! ## Usage
//!
//! ```
//! let text = "\
//! <Node>
//!     name: 'A'
//!     position: 0,0
//!     draw: True
//! </Node>
//! <Node>
//!     name: 'B'
//!     position: 2,0
//!     draw: True
//! </Node>
//! <Resistor>
//!     name: 'R1'
//!     node1: 'A'
//!     node2: 'B'
//! </Resistor>
//! ";
//!
//! let circuit = netlist_core::load(text)?;
//! let touching: Vec<_> = circuit.adjacent("A").unwrap().map(|e| e.name.as_str()).collect();
//! assert_eq!(touching, ["R1"]);
//! # Ok::<(), netlist_core::NetlistError>(())
//! ```
//!
//! Rendering and simulation are left to consumers of the [`Circuit`]; this
//! crate guarantees structural validity only (every element endpoint resolves
//! to a declared node), not electrical well-posedness.

pub mod circuit;
pub mod dsl;
pub mod error;

// Re-export main types for convenience
pub use circuit::{BuildConfig, Circuit, NamePolicy};
pub use error::{NetlistError, Result};

/// Parse and build a circuit using the default configuration.
pub fn load(input: &str) -> Result<Circuit> {
    load_with_config(input, &BuildConfig::default())
}

/// Parse and build a circuit.
pub fn load_with_config(input: &str, config: &BuildConfig) -> Result<Circuit> {
    let ast = dsl::parse(input)?;
    Circuit::from_ast_with_config(ast, config)
}

/// Read, parse and build a circuit from a netlist file.
pub fn load_file(path: &std::path::Path, config: &BuildConfig) -> Result<Circuit> {
    let ast = dsl::parse_file(path)?;
    Circuit::from_ast_with_config(ast, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_file_reports_path() {
        let path = std::path::Path::new("circuits/does_not_exist.txt");
        let err = load_file(path, &BuildConfig::default()).unwrap_err();
        assert!(matches!(err, NetlistError::FileRead { ref path, .. } if path.ends_with("does_not_exist.txt")));
    }

    #[test]
    fn test_load_example_file() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("circuits/example_circuit.txt");
        let circuit = load_file(&path, &BuildConfig::default()).unwrap();
        assert_eq!(circuit.num_nodes(), 6);
        assert_eq!(circuit.num_elements(), 7);
    }

    #[test]
    fn test_load_with_shared_namespace() {
        let text = "<Node>\n name: 'X'\n position: 0,0\n draw: True\n</Node>\n\
                    <Node>\n name: 'Y'\n position: 0,1\n draw: True\n</Node>\n\
                    <Wire>\n name: 'Y'\n node1: 'X'\n node2: 'Y'\n</Wire>\n";
        assert!(load(text).is_ok());
        let shared = BuildConfig::new().with_namespace(NamePolicy::Shared);
        assert!(matches!(
            load_with_config(text, &shared),
            Err(NetlistError::DuplicateElement { .. })
        ));
    }
}
