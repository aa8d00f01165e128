//! Circuit builder configuration.

/// How node names and element names relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamePolicy {
    /// Nodes and elements are independent namespaces: a node and an element
    /// may share a name.
    #[default]
    Separate,
    /// One namespace for everything: an element may not reuse a node name.
    Shared,
}

/// Configuration for building a [`Circuit`](super::Circuit).
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Name uniqueness policy between nodes and elements.
    pub namespace: NamePolicy,
    /// Log a warning for each declared node that no element touches.
    pub warn_isolated_nodes: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            namespace: NamePolicy::Separate,
            warn_isolated_nodes: true,
        }
    }
}

impl BuildConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the node/element name policy.
    pub fn with_namespace(mut self, namespace: NamePolicy) -> Self {
        self.namespace = namespace;
        self
    }

    /// Enable or disable isolated-node warnings.
    ///
    /// Isolated nodes are legal either way; this only controls logging.
    pub fn with_isolated_node_warnings(mut self, enabled: bool) -> Self {
        self.warn_isolated_nodes = enabled;
        self
    }
}
