//! Serialization of a circuit back into netlist text.

use std::fmt::{self, Write};

use crate::circuit::{Circuit, Element, Node};

use super::ast::NODE_TAG;

const INDENT: &str = "    ";

/// Serialize a circuit in the canonical netlist layout.
///
/// Node blocks come first, then element blocks, each in declaration order
/// and separated by a blank line. Parsing the result yields an equal circuit.
pub fn write_circuit(circuit: &Circuit) -> String {
    circuit.to_string()
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for node in self.nodes() {
            if !std::mem::take(&mut first) {
                f.write_char('\n')?;
            }
            write_node(f, node)?;
        }
        for element in self.elements() {
            if !std::mem::take(&mut first) {
                f.write_char('\n')?;
            }
            write_element(f, self, element)?;
        }
        Ok(())
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node) -> fmt::Result {
    writeln!(f, "<{}>", NODE_TAG)?;
    writeln!(f, "{INDENT}name: {}", quote(&node.name))?;
    writeln!(f, "{INDENT}position: {}", node.position)?;
    writeln!(f, "{INDENT}draw: {}", if node.draw { "True" } else { "False" })?;
    writeln!(f, "</{}>", NODE_TAG)
}

fn write_element(f: &mut fmt::Formatter<'_>, circuit: &Circuit, element: &Element) -> fmt::Result {
    let (node1, node2) = circuit.endpoints(element).ok_or(fmt::Error)?;
    let tag = element.kind.tag();

    writeln!(f, "<{}>", tag)?;
    writeln!(f, "{INDENT}name: {}", quote(&element.name))?;
    writeln!(f, "{INDENT}node1: {}", quote(&node1.name))?;
    writeln!(f, "{INDENT}node2: {}", quote(&node2.name))?;
    for (key, value) in element.params.iter() {
        writeln!(f, "{INDENT}{}: {}", key, value)?;
    }
    writeln!(f, "</{}>", tag)
}

/// Single-quote a name, falling back to double quotes when it contains `'`.
fn quote(name: &str) -> String {
    if name.contains('\'') {
        format!("\"{}\"", name)
    } else {
        format!("'{}'", name)
    }
}
