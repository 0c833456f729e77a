// ============================================================
// Layer 5 — Network Graph Builder
// ============================================================
// Reconstructs the node-link view of a trained classifier
// from its weight matrices and bias vectors, and refreshes an
// existing view in place after further training.
//
// Weight flattening convention (fixed, applied everywhere):
//   Burn's nn::Linear stores its weight as a [d_input,
//   d_output] tensor. Row-major flattening puts the weight of
//   link (source j → dest i) at flat index
//
//       j * n_dest + i
//
//   so the incoming weights of destination node i are the
//   elements with `index % n_dest == i`.
//
// Lifecycle of a view (explicit state machine, no nullable
// cache field):
//
//   Unbuilt ──network()──▶ Built ──refresh()──▶ Built
//      ▲                     │
//      └────invalidate()─────┘
//
// refresh() rewrites weight/bias scalars only: the sets of
// node ids and link ids never change, because UI elements are
// keyed by those ids. invalidate() is for topology changes
// (layer added/removed/resized), after which identities are
// meaningless and the next access rebuilds from scratch.

use anyhow::{anyhow, ensure, Result};
use burn::prelude::*;

use crate::domain::graph::{node_id, GraphLink, GraphNode, NetworkGraph};
use crate::ml::model::Classifier;
use crate::ml::tensorize::{float_vec, float_vec_1d};

/// Pull every layer's flattened weight matrix and bias vector
/// off the device. Index k of each Vec belongs to the linear
/// feeding layer k+1 of the graph.
pub fn extract_layer_params<B: Backend>(
    model: &Classifier<B>,
) -> Result<(Vec<Vec<f32>>, Vec<Vec<f32>>)> {
    let mut weights = Vec::with_capacity(model.layers.len());
    let mut biases = Vec::with_capacity(model.layers.len());

    for linear in &model.layers {
        weights.push(float_vec(linear.weight.val())?);
        let bias = linear
            .bias
            .as_ref()
            .ok_or_else(|| anyhow!("classifier layer has no bias vector"))?;
        biases.push(float_vec_1d(bias.val())?);
    }

    Ok((weights, biases))
}

/// Build the layered node-link view.
///
/// Layer 0 nodes are named by the feature schema and carry no
/// bias and no links; the last layer's nodes are named by the
/// label schema; every non-input node i of layer k gets bias
/// `biases[k-1][i]` and one incoming link per node of layer
/// k-1, de-flattened per the module-header convention.
pub fn build_network(
    layer_sizes: &[usize],
    weights: &[Vec<f32>],
    biases: &[Vec<f32>],
    feature_names: &[String],
    label_names: &[String],
) -> NetworkGraph {
    let last = layer_sizes.len().saturating_sub(1);
    let mut layers = Vec::with_capacity(layer_sizes.len());

    for (k, &size) in layer_sizes.iter().enumerate() {
        if k == 0 {
            let input_layer = (0..size)
                .map(|i| GraphNode::new(node_id(0, i), feature_names.get(i).cloned(), None, vec![]))
                .collect();
            layers.push(input_layer);
            continue;
        }

        let n_prev = layer_sizes[k - 1];
        let layer = (0..size)
            .map(|i| {
                let links = (0..n_prev)
                    .map(|j| {
                        GraphLink::new(
                            node_id(k - 1, j),
                            node_id(k, i),
                            weights[k - 1][j * size + i],
                        )
                    })
                    .collect();
                let name = (k == last).then(|| label_names.get(i).cloned()).flatten();
                GraphNode::new(node_id(k, i), name, Some(biases[k - 1][i]), links)
            })
            .collect();
        layers.push(layer);
    }

    NetworkGraph::new(layers)
}

/// Overwrite every link weight and node bias of `network` in
/// place from freshly read parameters. Node and link
/// identities are untouched.
pub fn refresh_network(
    network: &mut NetworkGraph,
    weights: &[Vec<f32>],
    biases: &[Vec<f32>],
) -> Result<()> {
    ensure!(
        network.layers.len() == weights.len() + 1,
        "parameter count does not match network depth: {} layers, {} weight matrices",
        network.layers.len(),
        weights.len(),
    );

    let shape = network.shape();
    for (k, layer) in network.layers.iter_mut().enumerate().skip(1) {
        let layer_weights = &weights[k - 1];
        let layer_biases = &biases[k - 1];
        let n_prev = shape[k - 1];
        let n_dest = layer.len();
        ensure!(
            layer_biases.len() == n_dest,
            "bias vector of layer {k} has {} entries, expected {n_dest}",
            layer_biases.len(),
        );
        ensure!(
            layer_weights.len() == n_prev * n_dest,
            "weight matrix of layer {k} has {} entries, expected {n_prev}x{n_dest}",
            layer_weights.len(),
        );

        for (i, node) in layer.iter_mut().enumerate() {
            node.bias = Some(layer_biases[i]);
            for (j, link) in node.input_links.iter_mut().enumerate() {
                link.weight = layer_weights[j * n_dest + i];
            }
        }
    }

    Ok(())
}

/// Explicit build state of a ModelGraph.
#[derive(Debug)]
pub enum GraphState {
    Unbuilt,
    Built(NetworkGraph),
}

/// Owns the node-link view of one model across training steps.
///
/// The view is built lazily on first access, refreshed in
/// place after each training step, and invalidated when the
/// topology changes.
pub struct ModelGraph {
    feature_names: Vec<String>,
    label_names: Vec<String>,
    state: GraphState,
}

impl ModelGraph {
    pub fn new(feature_names: Vec<String>, label_names: Vec<String>) -> Self {
        Self {
            feature_names,
            label_names,
            state: GraphState::Unbuilt,
        }
    }

    pub fn is_built(&self) -> bool {
        matches!(self.state, GraphState::Built(_))
    }

    /// The current view, building it from `model` first if
    /// necessary.
    pub fn network<B: Backend>(&mut self, model: &Classifier<B>) -> Result<&NetworkGraph> {
        if let GraphState::Unbuilt = self.state {
            let (weights, biases) = extract_layer_params(model)?;
            let network = build_network(
                &model.shape(),
                &weights,
                &biases,
                &self.feature_names,
                &self.label_names,
            );
            self.state = GraphState::Built(network);
            tracing::debug!("Network view built");
        }

        match &self.state {
            GraphState::Built(network) => Ok(network),
            GraphState::Unbuilt => unreachable!("state set to Built above"),
        }
    }

    /// Re-read weights and biases from `model` into the
    /// existing view. Builds the view when none exists yet.
    pub fn refresh<B: Backend>(&mut self, model: &Classifier<B>) -> Result<()> {
        match &mut self.state {
            GraphState::Unbuilt => {
                self.network(model)?;
            }
            GraphState::Built(network) => {
                let (weights, biases) = extract_layer_params(model)?;
                refresh_network(network, &weights, &biases)?;
            }
        }
        Ok(())
    }

    /// Drop the view. Called whenever the topology changes,
    /// since node identities are no longer meaningful.
    pub fn invalidate(&mut self) {
        self.state = GraphState::Unbuilt;
        tracing::debug!("Network view invalidated");
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::model::{Activation, ClassifierConfig};
    use crate::ml::{default_device, EvalBackend};

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_hidden_layer_network() {
        // 4 features straight into 3 classes: layer 0 named by
        // features, layer 1 named by labels, 4 links per output node
        let features = names(&["a", "b", "c", "d"]);
        let labels = names(&["x", "y", "z"]);
        let weights = vec![vec![0.0f32; 12]];
        let biases = vec![vec![0.0f32; 3]];

        let network = build_network(&[4, 3], &weights, &biases, &features, &labels);

        assert_eq!(network.shape(), vec![4, 3]);
        for (i, node) in network.layers[0].iter().enumerate() {
            assert_eq!(node.name.as_deref(), Some(features[i].as_str()));
            assert!(node.bias.is_none());
            assert!(node.input_links.is_empty());
        }
        for (i, node) in network.layers[1].iter().enumerate() {
            assert_eq!(node.name.as_deref(), Some(labels[i].as_str()));
            assert_eq!(node.input_links.len(), 4);
            assert!(node.bias.is_some());
        }
    }

    #[test]
    fn test_hidden_layer_nodes_are_unnamed() {
        let network = build_network(
            &[2, 2, 2],
            &[vec![0.0; 4], vec![0.0; 4]],
            &[vec![0.0; 2], vec![0.0; 2]],
            &names(&["a", "b"]),
            &names(&["x", "y"]),
        );
        assert!(network.layers[1].iter().all(|node| node.name.is_none()));
    }

    #[test]
    fn test_deflattening_follows_modulo_convention() {
        // [d_input=2, d_output=2] row-major: index j*n_dest+i
        //   [ w(0→0), w(0→1), w(1→0), w(1→1) ] = [10, 20, 30, 40]
        let weights = vec![vec![10.0, 20.0, 30.0, 40.0]];
        let biases = vec![vec![1.0, 2.0]];
        let network = build_network(&[2, 2], &weights, &biases, &names(&["a", "b"]), &names(&["x", "y"]));

        let node0 = &network.layers[1][0];
        let node1 = &network.layers[1][1];
        assert_eq!(node0.input_links[0].weight, 10.0);
        assert_eq!(node0.input_links[1].weight, 30.0);
        assert_eq!(node1.input_links[0].weight, 20.0);
        assert_eq!(node1.input_links[1].weight, 40.0);
    }

    #[test]
    fn test_refresh_updates_scalars_but_not_ids() {
        let mut network = build_network(
            &[2, 2],
            &[vec![1.0, 2.0, 3.0, 4.0]],
            &[vec![0.1, 0.2]],
            &names(&["a", "b"]),
            &names(&["x", "y"]),
        );
        let node_ids_before = network.node_ids();
        let link_ids_before = network.link_ids();

        refresh_network(
            &mut network,
            &[vec![5.0, 6.0, 7.0, 8.0]],
            &[vec![0.9, 0.8]],
        )
        .unwrap();

        assert_eq!(network.node_ids(), node_ids_before);
        assert_eq!(network.link_ids(), link_ids_before);
        assert_eq!(network.layers[1][0].bias, Some(0.9));
        assert_eq!(network.layers[1][0].input_links[0].weight, 5.0);
        assert_eq!(network.layers[1][0].input_links[1].weight, 7.0);
        assert_eq!(network.layers[1][1].input_links[0].weight, 6.0);
    }

    #[test]
    fn test_refresh_rejects_mismatched_weight_count() {
        // weights sized for a narrower previous layer must
        // error, not index out of bounds
        let mut network = build_network(
            &[2, 2],
            &[vec![0.0; 4]],
            &[vec![0.0; 2]],
            &names(&["a", "b"]),
            &names(&["x", "y"]),
        );
        assert!(refresh_network(&mut network, &[vec![0.0; 2]], &[vec![0.0; 2]]).is_err());
    }

    #[test]
    fn test_refresh_rejects_mismatched_depth() {
        let mut network = build_network(
            &[2, 2],
            &[vec![0.0; 4]],
            &[vec![0.0; 2]],
            &names(&["a", "b"]),
            &names(&["x", "y"]),
        );
        assert!(refresh_network(&mut network, &[], &[]).is_err());
    }

    #[test]
    fn test_model_graph_state_machine() {
        let device = default_device();
        let model = ClassifierConfig::new(
            vec![2, 3, 2],
            vec![Activation::Tanh, Activation::Softmax],
        )
        .init::<EvalBackend>(&device);

        let mut graph = ModelGraph::new(names(&["a", "b"]), names(&["x", "y"]));
        assert!(!graph.is_built());

        let shape = graph.network(&model).unwrap().shape();
        assert_eq!(shape, vec![2, 3, 2]);
        assert!(graph.is_built());

        // refresh is a self-loop on Built and keeps identities
        let ids_before = graph.network(&model).unwrap().node_ids();
        graph.refresh(&model).unwrap();
        assert_eq!(graph.network(&model).unwrap().node_ids(), ids_before);

        graph.invalidate();
        assert!(!graph.is_built());
    }

    #[test]
    fn test_view_matches_model_parameters() {
        let device = default_device();
        let model = ClassifierConfig::new(
            vec![3, 2],
            vec![Activation::Softmax],
        )
        .init::<EvalBackend>(&device);

        let (weights, biases) = extract_layer_params(&model).unwrap();
        let network = build_network(
            &model.shape(),
            &weights,
            &biases,
            &names(&["a", "b", "c"]),
            &names(&["x", "y"]),
        );

        // weight of link (src 2 → dest 1) sits at 2*2 + 1
        assert_eq!(
            network.layers[1][1].input_links[2].weight,
            weights[0][2 * 2 + 1]
        );
        assert_eq!(network.layers[1][0].bias, Some(biases[0][0]));
    }
}
