//! Circuit graph structure.

use indexmap::IndexMap;
use log::{debug, warn};

use super::config::BuildConfig;
use super::types::{ElementId, NodeId, Position};
use super::validate::{check_element_name, check_node_name, resolve_endpoints};
use crate::dsl::{Block, ElementKind, ElementParams, NetlistAst};
use crate::error::Result;

/// A circuit junction.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Arena index
    pub id: NodeId,
    /// Unique node name
    pub name: String,
    /// Schematic position
    pub position: Position,
    /// Whether a renderer should draw a junction dot here
    pub draw: bool,
    /// Source line of the declaring block
    pub line: usize,
}

/// A two-terminal circuit element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Arena index
    pub id: ElementId,
    /// Unique element name
    pub name: String,
    /// Element kind
    pub kind: ElementKind,
    /// Resolved endpoints `[node1, node2]`; never equal
    pub nodes: [NodeId; 2],
    /// Kind-specific parameters
    pub params: ElementParams,
    /// Source line of the declaring block
    pub line: usize,
}

impl Element {
    /// The endpoint opposite `node`, or `None` if `node` is not an endpoint.
    pub fn other_end(&self, node: NodeId) -> Option<NodeId> {
        match self.nodes {
            [a, b] if a == node => Some(b),
            [a, b] if b == node => Some(a),
            _ => None,
        }
    }

    /// Whether `node` is one of this element's endpoints.
    pub fn touches(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }
}

/// A validated circuit graph.
///
/// Nodes and elements live in arenas indexed by [`NodeId`] / [`ElementId`]
/// in declaration order, and are looked up by name through the same
/// insertion-ordered maps. Every element endpoint resolves to a node of this
/// circuit, and the adjacency index lists, for every node, the elements
/// touching it in declaration order.
///
/// A `Circuit` can only be obtained through [`Circuit::from_ast`] (or the
/// crate-level `load` functions), so it is always in a validated state.
#[derive(Debug, Clone)]
pub struct Circuit {
    nodes: IndexMap<String, Node>,
    elements: IndexMap<String, Element>,
    adjacency: Vec<Vec<ElementId>>,
}

impl Circuit {
    /// Build a circuit from a parsed AST using the default configuration.
    pub fn from_ast(ast: NetlistAst) -> Result<Self> {
        Self::from_ast_with_config(ast, &BuildConfig::default())
    }

    /// Build a circuit from a parsed AST.
    ///
    /// All node blocks are collected first, so elements may reference nodes
    /// declared after them. Elements are then checked in declaration order;
    /// the first violation aborts the build.
    pub fn from_ast_with_config(ast: NetlistAst, config: &BuildConfig) -> Result<Self> {
        let (node_defs, element_defs): (Vec<_>, Vec<_>) = ast
            .blocks
            .into_iter()
            .partition(|block| matches!(block, Block::Node(_)));

        // First pass: the complete node set
        let mut nodes = IndexMap::with_capacity(node_defs.len());
        for block in node_defs {
            let Block::Node(def) = block else { continue };
            check_node_name(&def, &nodes)?;
            let node = Node {
                id: NodeId(nodes.len()),
                name: def.name.clone(),
                position: def.position.into(),
                draw: def.draw,
                line: def.line,
            };
            nodes.insert(def.name, node);
        }

        // Second pass: elements against the completed node set
        let mut elements = IndexMap::with_capacity(element_defs.len());
        let mut adjacency = vec![Vec::new(); nodes.len()];
        for block in element_defs {
            let Block::Element(def) = block else { continue };
            check_element_name(&def, &nodes, &elements, config.namespace)?;
            let endpoints = resolve_endpoints(&def, &nodes)?;

            let id = ElementId(elements.len());
            for node in endpoints {
                adjacency[node.0].push(id);
            }
            let element = Element {
                id,
                name: def.name.clone(),
                kind: def.kind,
                nodes: endpoints,
                params: def.params,
                line: def.line,
            };
            elements.insert(def.name, element);
        }

        let circuit = Circuit {
            nodes,
            elements,
            adjacency,
        };

        debug!(
            "built circuit: {} nodes, {} elements",
            circuit.num_nodes(),
            circuit.num_elements()
        );
        if config.warn_isolated_nodes {
            for node in circuit.isolated_nodes() {
                warn!("node '{}' (line {}) is not connected to any element", node.name, node.line);
            }
        }

        Ok(circuit)
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of elements.
    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// Nodes in declaration order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// Elements in declaration order.
    pub fn elements(&self) -> impl ExactSizeIterator<Item = &Element> + '_ {
        self.elements.values()
    }

    /// Find a node by name.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    /// Find an element by name.
    pub fn element(&self, name: &str) -> Option<&Element> {
        self.elements.get(name)
    }

    /// Find a node ID by name.
    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.nodes.get_index_of(name).map(NodeId)
    }

    /// Get a node by ID.
    pub fn node_by_id(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get_index(id.0).map(|(_, node)| node)
    }

    /// Get an element by ID.
    pub fn element_by_id(&self, id: ElementId) -> Option<&Element> {
        self.elements.get_index(id.0).map(|(_, element)| element)
    }

    /// Both endpoint nodes of an element of this circuit.
    pub fn endpoints(&self, element: &Element) -> Option<(&Node, &Node)> {
        let [a, b] = element.nodes;
        Some((self.node_by_id(a)?, self.node_by_id(b)?))
    }

    /// Elements of one kind, in declaration order.
    pub fn elements_of_kind(&self, kind: ElementKind) -> impl Iterator<Item = &Element> + '_ {
        self.elements().filter(move |element| element.kind == kind)
    }

    /// Elements touching the named node, in declaration order.
    ///
    /// Returns `None` if no such node exists.
    pub fn adjacent(&self, node: &str) -> Option<impl Iterator<Item = &Element> + '_> {
        let id = self.find_node(node)?;
        Some(
            self.adjacency[id.0]
                .iter()
                .filter_map(move |&element| self.element_by_id(element)),
        )
    }

    /// Number of elements touching the named node.
    pub fn degree(&self, node: &str) -> Option<usize> {
        self.find_node(node).map(|id| self.adjacency[id.0].len())
    }

    /// Distinct nodes one element away from the named node, in the order
    /// their connecting elements were declared.
    pub fn neighbors(&self, node: &str) -> Option<Vec<&Node>> {
        let id = self.find_node(node)?;
        let mut seen = Vec::new();
        for &element in &self.adjacency[id.0] {
            let Some(other) = self.element_by_id(element).and_then(|e| e.other_end(id)) else {
                continue;
            };
            if !seen.contains(&other) {
                seen.push(other);
            }
        }
        Some(seen.into_iter().filter_map(|n| self.node_by_id(n)).collect())
    }

    /// Nodes no element touches.
    pub fn isolated_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes()
            .filter(move |node| self.adjacency[node.id.0].is_empty())
    }

    /// Node name → names of the elements touching it, both in declaration order.
    pub fn adjacency_index(&self) -> IndexMap<&str, Vec<&str>> {
        self.nodes()
            .map(|node| {
                let touching = self.adjacency[node.id.0]
                    .iter()
                    .filter_map(|&element| self.element_by_id(element))
                    .map(|element| element.name.as_str())
                    .collect();
                (node.name.as_str(), touching)
            })
            .collect()
    }

    /// Smallest axis-aligned box `(min, max)` containing every node position.
    ///
    /// Returns `None` for a circuit without nodes.
    pub fn bounding_box(&self) -> Option<(Position, Position)> {
        let mut positions = self.nodes().map(|node| node.position);
        let first = positions.next()?;
        Some(positions.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }
}

/// Circuits are equal when they declare the same nodes and elements, with the
/// same attributes, in the same order. Source lines are not part of a
/// circuit's identity.
impl PartialEq for Circuit {
    fn eq(&self, other: &Self) -> bool {
        let same_nodes = self.nodes().len() == other.nodes().len()
            && self.nodes().zip(other.nodes()).all(|(a, b)| {
                a.name == b.name && a.position == b.position && a.draw == b.draw
            });
        let same_elements = self.elements().len() == other.elements().len()
            && self.elements().zip(other.elements()).all(|(a, b)| {
                a.name == b.name && a.kind == b.kind && a.nodes == b.nodes && a.params == b.params
            });
        same_nodes && same_elements && self.adjacency == other.adjacency
    }
}
