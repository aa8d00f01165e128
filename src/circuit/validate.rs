//! Referential integrity checks applied while building a circuit.
//!
//! Each check looks at one incoming record against what has been accepted so
//! far and reports the first violation it finds.

use indexmap::IndexMap;

use super::config::NamePolicy;
use super::graph::{Element, Node};
use super::types::NodeId;
use crate::dsl::{ElementDef, NodeDef};
use crate::error::{NetlistError, Result};

/// Reject a node whose name is already declared.
pub(crate) fn check_node_name(def: &NodeDef, nodes: &IndexMap<String, Node>) -> Result<()> {
    match nodes.get(&def.name) {
        Some(first) => Err(NetlistError::DuplicateNode {
            name: def.name.clone(),
            line: def.line,
            first_line: first.line,
        }),
        None => Ok(()),
    }
}

/// Reject an element whose name is already taken.
///
/// Element names form one namespace across all kinds. Under
/// [`NamePolicy::Shared`] node names are part of that namespace too.
pub(crate) fn check_element_name(
    def: &ElementDef,
    nodes: &IndexMap<String, Node>,
    elements: &IndexMap<String, Element>,
    policy: NamePolicy,
) -> Result<()> {
    let first_line = match (elements.get(&def.name), policy) {
        (Some(first), _) => Some(first.line),
        (None, NamePolicy::Shared) => nodes.get(&def.name).map(|node| node.line),
        (None, NamePolicy::Separate) => None,
    };

    match first_line {
        Some(first_line) => Err(NetlistError::DuplicateElement {
            name: def.name.clone(),
            kind: def.kind,
            line: def.line,
            first_line,
        }),
        None => Ok(()),
    }
}

/// Resolve both endpoint names to node ids.
///
/// `node1` is checked before `node2`; a self-loop is only reported once both
/// endpoints are known to exist.
pub(crate) fn resolve_endpoints(def: &ElementDef, nodes: &IndexMap<String, Node>) -> Result<[NodeId; 2]> {
    let resolve = |name: &str| {
        nodes
            .get_index_of(name)
            .map(NodeId)
            .ok_or_else(|| NetlistError::unknown_node(&def.name, def.kind, name, def.line))
    };

    let node1 = resolve(&def.node1)?;
    let node2 = resolve(&def.node2)?;

    if node1 == node2 {
        return Err(NetlistError::SelfLoop {
            element: def.name.clone(),
            kind: def.kind,
            node: def.node1.clone(),
            line: def.line,
        });
    }

    Ok([node1, node2])
}
