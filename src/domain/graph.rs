// ============================================================
// Layer 3 — Network Graph Domain Types
// ============================================================
// The visualization-facing reconstruction of a trained model:
// an ordered sequence of layers, each an ordered sequence of
// nodes, each node carrying its incoming links.
//
// Node identity is the string "{layerIndex}-{nodeIndex}" and
// a link is identified by its (source, dest) node id pair.
// Consumers bind display elements to these ids, so a refresh
// of weights/biases must never invent or drop an id —
// that contract is enforced by the builder in Layer 5 and
// checked by its tests.
//
// Input-layer nodes are named after features and carry no
// bias or links; output-layer nodes are named after labels.
//
// Reference: Rust Book §5 (Structs)

use serde::{Deserialize, Serialize};

/// A weighted connection between a node in layer k-1 and a
/// node in layer k.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source_id: String,
    pub dest_id: String,
    pub weight: f32,
}

impl GraphLink {
    pub fn new(source_id: impl Into<String>, dest_id: impl Into<String>, weight: f32) -> Self {
        Self {
            source_id: source_id.into(),
            dest_id: dest_id.into(),
            weight,
        }
    }
}

/// One node of the network view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// "{layerIndex}-{nodeIndex}"
    pub id: String,

    /// Feature name (input layer) or label name (output layer)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Absent for input-layer nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bias: Option<f32>,

    /// All links arriving from the previous layer.
    /// Empty for input-layer nodes.
    #[serde(default)]
    pub input_links: Vec<GraphLink>,
}

impl GraphNode {
    pub fn new(
        id: impl Into<String>,
        name: Option<String>,
        bias: Option<f32>,
        input_links: Vec<GraphLink>,
    ) -> Self {
        Self {
            id: id.into(),
            name,
            bias,
            input_links,
        }
    }
}

/// Canonical node id for (layer, node) coordinates.
pub fn node_id(layer_index: usize, node_index: usize) -> String {
    format!("{layer_index}-{node_index}")
}

/// The full layered node-link view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkGraph {
    pub layers: Vec<Vec<GraphNode>>,
}

impl NetworkGraph {
    pub fn new(layers: Vec<Vec<GraphNode>>) -> Self {
        Self { layers }
    }

    /// Number of nodes per layer, input layer included
    pub fn shape(&self) -> Vec<usize> {
        self.layers.iter().map(|layer| layer.len()).collect()
    }

    /// Size of the widest layer — the UI uses this to scale
    /// the diagram
    pub fn max_layer_size(&self) -> usize {
        self.layers.iter().map(|layer| layer.len()).max().unwrap_or(0)
    }

    /// Visit every node, optionally skipping the input layer
    pub fn for_each_node(&self, ignore_inputs: bool, mut visit: impl FnMut(&GraphNode)) {
        let skip = usize::from(ignore_inputs);
        for layer in self.layers.iter().skip(skip) {
            for node in layer {
                visit(node);
            }
        }
    }

    /// Every node id in the graph, in layer order
    pub fn node_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        self.for_each_node(false, |node| ids.push(node.id.clone()));
        ids
    }

    /// Every (source, dest) link id pair in the graph, in layer order
    pub fn link_ids(&self) -> Vec<(String, String)> {
        let mut ids = Vec::new();
        self.for_each_node(false, |node| {
            for link in &node.input_links {
                ids.push((link.source_id.clone(), link.dest_id.clone()));
            }
        });
        ids
    }
}
