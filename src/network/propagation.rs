//! Forward pass, back-propagation and the batched weight update.
//!
//! All three mutate the network in place: `forward` overwrites every node's
//! `total_input`/`output`, `backward` adds into the accumulators, and
//! `update_weights` consumes them. Calling `backward` for several examples
//! before one `update_weights` averages their gradients, which is how
//! mini-batches are formed.

use crate::error::{Error, Result};
use crate::loss::loss_type::ErrorFunction;
use crate::network::network::Network;
use crate::regularization::regularization::RegularizationFunction;

impl Network {
    /// Propagates `inputs` through the network and returns the output node's
    /// value.
    pub fn forward(&mut self, inputs: &[f64]) -> Result<f64> {
        let (nodes, links, layers) = self.parts_mut();
        let input_layer = &layers[0];
        if inputs.len() != input_layer.len() {
            return Err(Error::DimensionMismatch {
                expected: input_layer.len(),
                actual: inputs.len(),
            });
        }

        for (&id, &value) in input_layer.iter().zip(inputs) {
            nodes[id.0].output = value;
        }

        for layer in &layers[1..] {
            for &id in layer {
                let node = &nodes[id.0];
                let mut total_input = node.bias;
                for &link_id in node.input_links() {
                    let link = &links[link_id.0];
                    total_input += link.weight * nodes[link.source().0].output;
                }
                let node = &mut nodes[id.0];
                node.total_input = total_input;
                node.output = node.activation().function(total_input);
            }
        }

        Ok(self.output())
    }

    /// Back-propagates the error of the last forward pass against `target`,
    /// accumulating dE/d(bias) on every node and dE/d(weight) on every live
    /// link.
    pub fn backward(&mut self, target: f64, error_fn: ErrorFunction) {
        let output_id = self.output_node_id();
        let (nodes, links, layers) = self.parts_mut();

        let output_node = &mut nodes[output_id.0];
        output_node.output_der = error_fn.derivative(output_node.output, target);

        for layer_idx in (1..layers.len()).rev() {
            let current_layer = &layers[layer_idx];

            // dE/d(total input) of each node.
            for &id in current_layer {
                let node = &mut nodes[id.0];
                node.input_der = node.output_der * node.activation().derivative(node.total_input);
                node.acc_input_der += node.input_der;
                node.num_accumulated_ders += 1;
            }

            // dE/d(weight) of each link coming into the layer.
            for &id in current_layer {
                let node = &nodes[id.0];
                for &link_id in node.input_links() {
                    let link = &mut links[link_id.0];
                    if link.is_dead {
                        continue;
                    }
                    link.error_der = node.input_der * nodes[link.source().0].output;
                    link.acc_error_der += link.error_der;
                    link.num_accumulated_ders += 1;
                }
            }

            if layer_idx == 1 {
                continue;
            }

            // dE/d(output) of the previous layer.
            for &id in &layers[layer_idx - 1] {
                let mut output_der = 0.0;
                for &link_id in nodes[id.0].outputs() {
                    let link = &links[link_id.0];
                    output_der += link.weight * nodes[link.dest().0].input_der;
                }
                nodes[id.0].output_der = output_der;
            }
        }
    }

    /// Applies the accumulated gradients, averaged over the number of
    /// examples seen since the previous update, then the regularization
    /// penalty. Under L1 a weight the penalty pushes across zero is set to 0
    /// and its link is marked dead.
    pub fn update_weights(&mut self, learning_rate: f64, regularization_rate: f64) {
        let (nodes, links, layers) = self.parts_mut();

        for layer in &layers[1..] {
            for &id in layer {
                let node = &mut nodes[id.0];
                if node.num_accumulated_ders > 0 {
                    node.bias -= learning_rate * node.acc_input_der / node.num_accumulated_ders as f64;
                    node.acc_input_der = 0.0;
                    node.num_accumulated_ders = 0;
                }

                for &link_id in nodes[id.0].input_links() {
                    let link = &mut links[link_id.0];
                    if link.is_dead || link.num_accumulated_ders == 0 {
                        continue;
                    }

                    link.weight -= (learning_rate / link.num_accumulated_ders as f64) * link.acc_error_der;

                    if let Some(regularization) = link.regularization() {
                        let regul_der = regularization.derivative(link.weight);
                        let new_weight = link.weight - (learning_rate * regularization_rate) * regul_der;
                        if regularization == RegularizationFunction::L1 && link.weight * new_weight < 0.0 {
                            log::debug!("link {} crossed zero under L1, freezing it", link.id());
                            link.weight = 0.0;
                            link.is_dead = true;
                        } else {
                            link.weight = new_weight;
                        }
                    }

                    link.acc_error_der = 0.0;
                    link.num_accumulated_ders = 0;
                }
            }
        }
    }
}
