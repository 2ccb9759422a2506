use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use playground_nn::{ActivationFunction, Error, ErrorFunction, Network, RegularizationFunction};

fn network(shape: &[usize], output: ActivationFunction, reg: RegularizationFunction, init_zero: bool) -> Network {
    let ids: Vec<String> = (0..shape[0]).map(|i| format!("x{i}")).collect();
    Network::build(shape, ActivationFunction::Tanh, output, reg, &ids, init_zero, &mut StdRng::seed_from_u64(21))
        .unwrap()
}

#[test]
fn zero_initialised_net_outputs_zero() {
    let mut net = network(&[2, 2, 1], ActivationFunction::Linear, RegularizationFunction::None, true);
    assert_eq!(net.forward(&[0.0, 0.0]).unwrap(), 0.0);
    assert_eq!(net.forward(&[0.7, -1.3]).unwrap(), 0.0);
}

#[test]
fn wrong_input_width_is_rejected() {
    let mut net = network(&[2, 3, 1], ActivationFunction::Tanh, RegularizationFunction::None, false);
    let err = net.forward(&[1.0, 2.0, 3.0]).unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { expected: 2, actual: 3 }));
}

#[test]
fn link_ids_name_both_ends() {
    let net = network(&[2, 3, 1], ActivationFunction::Tanh, RegularizationFunction::None, false);
    for link in net.links() {
        let expected = format!("{} - {}", net.node(link.source()).id(), net.node(link.dest()).id());
        assert_eq!(link.id(), expected);
    }
    assert_eq!(net.links().len(), 2 * 3 + 3);
}

#[test]
fn single_point_loss_decreases_every_update() {
    let mut net = network(&[2, 1], ActivationFunction::Linear, RegularizationFunction::None, false);
    let (input, target) = ([1.0, 1.0], 1.0);

    let mut last = ErrorFunction::Square.error(net.forward(&input).unwrap(), target);
    for _ in 0..50 {
        net.forward(&input).unwrap();
        net.backward(target, ErrorFunction::Square);
        net.update_weights(0.1, 0.0);
        let loss = ErrorFunction::Square.error(net.forward(&input).unwrap(), target);
        assert!(loss < last, "loss went from {last} to {loss}");
        last = loss;
    }
    assert!(last < 1e-6);
}

#[test]
fn l1_kills_a_link_and_keeps_it_dead() {
    let mut net = network(&[1, 1], ActivationFunction::Linear, RegularizationFunction::L1, true);
    let link_id = net.node(net.output_node_id()).input_links()[0];
    net.link_mut(link_id).weight = 0.01;

    // Zero input: the data gradient is zero, so only the penalty moves the
    // weight, and a rate of 1 pushes it past zero.
    net.forward(&[0.0]).unwrap();
    net.backward(0.0, ErrorFunction::Square);
    net.update_weights(1.0, 1.0);
    assert!(net.link(link_id).is_dead);
    assert_eq!(net.link(link_id).weight, 0.0);
    assert_eq!(net.num_dead_links(), 1);

    for _ in 0..5 {
        net.forward(&[2.0]).unwrap();
        net.backward(5.0, ErrorFunction::Square);
        net.update_weights(0.1, 0.01);
    }
    assert_eq!(net.link(link_id).weight, 0.0);
    assert_eq!(net.link(link_id).num_accumulated_ders, 0);
    assert!(net.output_node().bias > 0.0);
}

#[test]
fn l2_shrinks_weights_without_killing() {
    let mut net = network(&[1, 1], ActivationFunction::Linear, RegularizationFunction::L2, true);
    let link_id = net.node(net.output_node_id()).input_links()[0];
    net.link_mut(link_id).weight = 0.5;

    net.forward(&[0.0]).unwrap();
    net.backward(0.0, ErrorFunction::Square);
    net.update_weights(0.1, 1.0);
    assert_relative_eq!(net.link(link_id).weight, 0.45, epsilon = 1e-12);
    assert!(!net.link(link_id).is_dead);
}

#[test]
fn snapshot_serializes_nodes_and_links() {
    let net = network(&[2, 2, 1], ActivationFunction::Tanh, RegularizationFunction::None, false);
    let json = serde_json::to_value(&net).unwrap();
    assert_eq!(json["nodes"].as_array().unwrap().len(), 5);
    assert_eq!(json["links"].as_array().unwrap().len(), 6);
}
