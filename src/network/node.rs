use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationFunction;
use crate::network::link::LinkId;

/// Stable handle of a node inside its `Network`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A unit of the network: a bias, an activation, and the per-pass state that
/// forward and backward propagation overwrite.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    id: String,
    activation: ActivationFunction,
    input_links: Vec<LinkId>,
    outputs: Vec<LinkId>,
    pub bias: f64,
    /// Weighted input sum plus bias from the last forward pass.
    pub total_input: f64,
    pub output: f64,
    /// dE/d(output)
    pub output_der: f64,
    /// dE/d(total_input)
    pub input_der: f64,
    /// Sum of `input_der` since the last weight update; equals dE/d(bias).
    pub acc_input_der: f64,
    pub num_accumulated_ders: usize,
}

impl Node {
    pub(crate) fn new(id: String, activation: ActivationFunction, init_zero: bool) -> Node {
        Node {
            id,
            activation,
            input_links: Vec::new(),
            outputs: Vec::new(),
            bias: if init_zero { 0.0 } else { 0.1 },
            total_input: 0.0,
            output: 0.0,
            output_der: 0.0,
            input_der: 0.0,
            acc_input_der: 0.0,
            num_accumulated_ders: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }

    /// Links arriving from the previous layer, in creation order.
    pub fn input_links(&self) -> &[LinkId] {
        &self.input_links
    }

    /// Links leaving towards the next layer, in creation order.
    pub fn outputs(&self) -> &[LinkId] {
        &self.outputs
    }

    pub(crate) fn push_input_link(&mut self, link: LinkId) {
        self.input_links.push(link);
    }

    pub(crate) fn push_output(&mut self, link: LinkId) {
        self.outputs.push(link);
    }
}
