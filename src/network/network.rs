use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{Error, Result};
use crate::network::link::{Link, LinkId};
use crate::network::node::{Node, NodeId};
use crate::regularization::regularization::RegularizationFunction;

/// A layered feed-forward network stored as an arena of nodes and links.
///
/// Nodes refer to their links and links to their endpoints through
/// `NodeId` / `LinkId` handles, so the graph can be walked in both directions
/// without shared ownership. Cloning gives an independent deep copy.
///
/// Deserializing checks the layer shape and every handle, so a snapshot that
/// `forward`/`backward` could not walk is rejected with `InvalidShape`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawNetwork")]
pub struct Network {
    nodes: Vec<Node>,
    links: Vec<Link>,
    layers: Vec<Vec<NodeId>>,
}

impl Network {
    /// Builds a fully connected network.
    ///
    /// `shape` lists the width of every layer, input first; e.g. `[2, 4, 1]`
    /// is two inputs, one hidden layer of four and a single output. Input
    /// nodes take their ids from `input_ids`; every other node gets the next
    /// value of a counter starting at 1. Weights are drawn uniformly from
    /// [-0.5, 0.5) with `rng`, unless `init_zero` sets all weights and biases
    /// to 0.
    pub fn build<S: AsRef<str>, R: Rng + ?Sized>(
        shape: &[usize],
        activation: ActivationFunction,
        output_activation: ActivationFunction,
        regularization: RegularizationFunction,
        input_ids: &[S],
        init_zero: bool,
        rng: &mut R,
    ) -> Result<Network> {
        validate_shape(shape, input_ids.len())?;

        let regularization = regularization.for_links();
        let num_layers = shape.len();
        let mut network = Network {
            nodes: Vec::with_capacity(shape.iter().sum()),
            links: Vec::new(),
            layers: Vec::with_capacity(num_layers),
        };
        let mut next_id = 1usize;

        for (layer_idx, &num_nodes) in shape.iter().enumerate() {
            let is_input_layer = layer_idx == 0;
            let is_output_layer = layer_idx == num_layers - 1;
            let mut current_layer = Vec::with_capacity(num_nodes);

            for i in 0..num_nodes {
                let node_id = if is_input_layer {
                    input_ids[i].as_ref().to_owned()
                } else {
                    let id = next_id.to_string();
                    next_id += 1;
                    id
                };
                let node_activation = if is_output_layer { output_activation } else { activation };
                let handle = NodeId(network.nodes.len());
                network.nodes.push(Node::new(node_id, node_activation, init_zero));
                current_layer.push(handle);

                if layer_idx >= 1 {
                    for &prev in &network.layers[layer_idx - 1] {
                        let weight = if init_zero { 0.0 } else { rng.gen::<f64>() - 0.5 };
                        let link_id = format!(
                            "{} - {}",
                            network.nodes[prev.0].id(),
                            network.nodes[handle.0].id()
                        );
                        let link = LinkId(network.links.len());
                        network.links.push(Link::new(link_id, prev, handle, regularization, weight));
                        network.nodes[prev.0].push_output(link);
                        network.nodes[handle.0].push_input_link(link);
                    }
                }
            }
            network.layers.push(current_layer);
        }

        log::debug!(
            "built network {:?} with {} nodes and {} links",
            shape,
            network.nodes.len(),
            network.links.len()
        );
        Ok(network)
    }

    pub fn layers(&self) -> &[Vec<NodeId>] {
        &self.layers
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Width of every layer, input first.
    pub fn shape(&self) -> Vec<usize> {
        self.layers.iter().map(Vec::len).collect()
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.0]
    }

    pub fn link_mut(&mut self, id: LinkId) -> &mut Link {
        &mut self.links[id.0]
    }

    /// Looks a node up by its string id.
    pub fn find_node(&self, id: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.id() == id).map(NodeId)
    }

    pub fn output_node_id(&self) -> NodeId {
        self.layers[self.layers.len() - 1][0]
    }

    pub fn output_node(&self) -> &Node {
        self.node(self.output_node_id())
    }

    /// Output of the last forward pass.
    pub fn output(&self) -> f64 {
        self.output_node().output
    }

    /// Visits every node layer by layer, optionally skipping the input layer.
    pub fn for_each_node<F: FnMut(&Node)>(&self, ignore_inputs: bool, mut f: F) {
        let start = if ignore_inputs { 1 } else { 0 };
        for layer in &self.layers[start..] {
            for &id in layer {
                f(&self.nodes[id.0]);
            }
        }
    }

    pub fn num_dead_links(&self) -> usize {
        self.links.iter().filter(|l| l.is_dead).count()
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut [Node], &mut [Link], &[Vec<NodeId>]) {
        (&mut self.nodes, &mut self.links, &self.layers)
    }
}

/// Unchecked wire form of a `Network`.
#[derive(Deserialize)]
struct RawNetwork {
    nodes: Vec<Node>,
    links: Vec<Link>,
    layers: Vec<Vec<NodeId>>,
}

impl TryFrom<RawNetwork> for Network {
    type Error = Error;

    fn try_from(raw: RawNetwork) -> Result<Network> {
        let shape: Vec<usize> = raw.layers.iter().map(Vec::len).collect();
        validate_shape(&shape, shape.first().copied().unwrap_or(0))?;

        // Layer of every node; each node must sit in exactly one layer.
        let mut layer_of: Vec<Option<usize>> = vec![None; raw.nodes.len()];
        for (layer_idx, layer) in raw.layers.iter().enumerate() {
            for &id in layer {
                match layer_of.get_mut(id.0) {
                    None => {
                        return Err(Error::InvalidShape(format!("layer {layer_idx} refers to missing node {}", id.0)))
                    }
                    Some(slot) if slot.is_some() => {
                        return Err(Error::InvalidShape(format!("node {} appears in more than one layer", id.0)))
                    }
                    Some(slot) => *slot = Some(layer_idx),
                }
            }
        }
        if let Some(idx) = layer_of.iter().position(Option::is_none) {
            return Err(Error::InvalidShape(format!("node {idx} belongs to no layer")));
        }

        for (idx, link) in raw.links.iter().enumerate() {
            let source = layer_of.get(link.source().0).copied().flatten();
            let dest = layer_of.get(link.dest().0).copied().flatten();
            match (source, dest) {
                (Some(s), Some(d)) if s + 1 == d => {}
                _ => {
                    return Err(Error::InvalidShape(format!(
                        "link {idx} does not join two adjacent layers"
                    )))
                }
            }
        }

        for (idx, node) in raw.nodes.iter().enumerate() {
            let incoming_ok = node
                .input_links()
                .iter()
                .all(|l| raw.links.get(l.0).map_or(false, |link| link.dest().0 == idx));
            let outgoing_ok = node
                .outputs()
                .iter()
                .all(|l| raw.links.get(l.0).map_or(false, |link| link.source().0 == idx));
            if !incoming_ok || !outgoing_ok {
                return Err(Error::InvalidShape(format!("node {idx} lists a link that does not touch it")));
            }
        }

        Ok(Network { nodes: raw.nodes, links: raw.links, layers: raw.layers })
    }
}

fn validate_shape(shape: &[usize], num_input_ids: usize) -> Result<()> {
    if shape.len() < 2 {
        return Err(Error::InvalidShape(format!(
            "need at least an input and an output layer, got {} layer(s)",
            shape.len()
        )));
    }
    if let Some(idx) = shape.iter().position(|&n| n == 0) {
        return Err(Error::InvalidShape(format!("layer {idx} has no nodes")));
    }
    if shape[0] != num_input_ids {
        return Err(Error::InvalidShape(format!(
            "input layer has {} nodes but {} input ids were given",
            shape[0], num_input_ids
        )));
    }
    let output_width = shape[shape.len() - 1];
    if output_width != 1 {
        return Err(Error::InvalidShape(format!(
            "output layer must have exactly one node, got {output_width}"
        )));
    }
    Ok(())
}
