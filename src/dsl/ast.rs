//! Record types produced by the netlist parser.

use std::fmt;

/// Complete AST representation of a parsed netlist: every block in
/// declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetlistAst {
    /// All blocks, in the order they appear in the source text
    pub blocks: Vec<Block>,
}

impl NetlistAst {
    /// Create a new empty netlist AST.
    pub fn new() -> Self {
        Self::default()
    }

    /// Node definitions in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeDef> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Node(node) => Some(node),
            Block::Element(_) => None,
        })
    }

    /// Element definitions in declaration order.
    pub fn elements(&self) -> impl Iterator<Item = &ElementDef> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Element(element) => Some(element),
            Block::Node(_) => None,
        })
    }
}

impl FromIterator<Block> for NetlistAst {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        Self {
            blocks: iter.into_iter().collect(),
        }
    }
}

/// One tagged block of the netlist.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// `<Node>` ... `</Node>`
    Node(NodeDef),
    /// Any two-terminal element block
    Element(ElementDef),
}

impl Block {
    /// The block's declared name.
    pub fn name(&self) -> &str {
        match self {
            Block::Node(node) => &node.name,
            Block::Element(element) => &element.name,
        }
    }

    /// Line of the opening tag.
    pub fn line(&self) -> usize {
        match self {
            Block::Node(node) => node.line,
            Block::Element(element) => element.line,
        }
    }

    /// Tag text of the block, as written in the canonical grammar.
    pub fn tag(&self) -> &'static str {
        match self {
            Block::Node(_) => NODE_TAG,
            Block::Element(element) => element.kind.tag(),
        }
    }
}

/// Tag used for node blocks.
pub const NODE_TAG: &str = "Node";

/// A `<Node>` block.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDef {
    /// Unique node name
    pub name: String,
    /// Position in arbitrary drawing units
    pub position: (f64, f64),
    /// Whether the node is rendered as a visible junction
    pub draw: bool,
    /// Source line of the opening tag
    pub line: usize,
}

/// A two-terminal element block.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDef {
    /// Element kind, taken from the block tag
    pub kind: ElementKind,
    /// Unique element name
    pub name: String,
    /// First terminal's node name
    pub node1: String,
    /// Second terminal's node name
    pub node2: String,
    /// Kind-specific parameters
    pub params: ElementParams,
    /// Source line of the opening tag
    pub line: usize,
}

/// Element kinds supported by the netlist format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Ideal conductor
    Wire,
    /// Resistor
    Resistor,
    /// Capacitor
    Capacitor,
    /// Inductor
    Inductor,
    /// Independent voltage source
    VoltageSource,
}

impl ElementKind {
    /// Every kind, in canonical order.
    pub const ALL: [ElementKind; 5] = [
        Self::Wire,
        Self::Resistor,
        Self::Capacitor,
        Self::Inductor,
        Self::VoltageSource,
    ];

    /// Canonical tag text for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Wire => "Wire",
            Self::Resistor => "Resistor",
            Self::Capacitor => "Capacitor",
            Self::Inductor => "Inductor",
            Self::VoltageSource => "Voltage Source",
        }
    }

    /// Parse an element kind from single-spaced tag text, ignoring ASCII case.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag().eq_ignore_ascii_case(tag))
    }

    /// Parameter keys accepted inside a block of this kind, besides the
    /// `name`/`node1`/`node2` every element carries.
    pub fn param_keys(&self) -> &'static [&'static str] {
        match self {
            Self::Wire => &[],
            Self::Resistor | Self::Capacitor | Self::Inductor => &["value"],
            Self::VoltageSource => &["amplitude", "frequency", "phase"],
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Optional numeric parameters of an element.
///
/// Which fields may be set depends on the kind (see [`ElementKind::param_keys`]);
/// absent parameters are never defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementParams {
    /// Resistance (Ω), capacitance (F) or inductance (H)
    pub value: Option<f64>,
    /// Source amplitude A in `v(t) = A·sin(ω·t + φ)` (V)
    pub amplitude: Option<f64>,
    /// Source angular frequency ω (rad/s)
    pub frequency: Option<f64>,
    /// Source phase φ (rad)
    pub phase: Option<f64>,
}

impl ElementParams {
    /// Look up a parameter by its key.
    pub fn get(&self, key: &str) -> Option<f64> {
        match key {
            "value" => self.value,
            "amplitude" => self.amplitude,
            "frequency" => self.frequency,
            "phase" => self.phase,
            _ => None,
        }
    }

    /// Mutable slot for a parameter key, if the key is known.
    pub(crate) fn slot_mut(&mut self, key: &str) -> Option<&mut Option<f64>> {
        match key {
            "value" => Some(&mut self.value),
            "amplitude" => Some(&mut self.amplitude),
            "frequency" => Some(&mut self.frequency),
            "phase" => Some(&mut self.phase),
            _ => None,
        }
    }

    /// Present parameters as `(key, value)` pairs, in canonical key order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        ["value", "amplitude", "frequency", "phase"]
            .into_iter()
            .filter_map(|key| self.get(key).map(|v| (key, v)))
    }

    /// Whether no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}
