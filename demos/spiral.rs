use playground_nn::dataset::kind::ClassifyDataset;
use playground_nn::train::features::{Feature, FeatureMask};
use playground_nn::{ActivationFunction, Playground, PlaygroundConfig};

fn main() {
    env_logger::init();

    // The spiral needs the sine features and a deeper net to separate.
    let config = PlaygroundConfig {
        dataset: ClassifyDataset::Spiral,
        noise: 10.0,
        learning_rate: 0.03,
        activation: ActivationFunction::Tanh,
        network_shape: vec![8, 8, 6],
        features: FeatureMask::default()
            .with(Feature::SinX)
            .with(Feature::SinY),
        ..Default::default()
    };

    let mut playground = match Playground::with_weight_seed(config, 42) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            return;
        }
    };

    let epochs = 500;
    for _ in 0..epochs {
        let stats = match playground.step() {
            Ok(stats) => stats,
            Err(e) => {
                eprintln!("training failed: {e}");
                return;
            }
        };
        if stats.iter % 50 == 0 {
            println!("Iter {}: train loss = {:.4}, test loss = {:.4}", stats.iter, stats.train_loss, stats.test_loss);
        }
    }

    let test_data = playground.data().test_data.clone();
    let correct = test_data
        .iter()
        .filter(|p| match playground.predict(p.x, p.y) {
            Ok(out) => out.signum() == p.label,
            Err(_) => false,
        })
        .count();
    println!("Test accuracy: {}/{} ({} dead links)", correct, test_data.len(), playground.network().num_dead_links());
}
