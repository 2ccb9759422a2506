use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::dataset::point::Point;
use crate::error::Result;
use crate::loss::loss_type::ErrorFunction;
use crate::network::network::Network;
use crate::random::SeedRandom;
use crate::train::features::{construct_input, input_ids, FeatureMask};
use crate::train::step_stats::{LossHistory, StepStats};
use crate::train::train_config::{PlaygroundConfig, Problem};

/// Generated points split into a training and a test set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSplit {
    pub train_data: Vec<Point>,
    pub test_data: Vec<Point>,
}

/// A network together with its iteration count and current losses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingState {
    pub iter: usize,
    pub network: Network,
    pub loss_train: f64,
    pub loss_test: f64,
}

impl TrainingState {
    pub fn stats(&self, elapsed_ms: u64) -> StepStats {
        StepStats {
            iter: self.iter,
            train_loss: self.loss_train,
            test_loss: self.loss_test,
            elapsed_ms,
        }
    }
}

/// Generates the dataset selected by `config`, shuffles it with `rng` and
/// splits it at `perc_train_data` percent.
pub fn generate_data(config: &PlaygroundConfig, rng: &mut SeedRandom) -> DataSplit {
    let num_samples = config.problem.num_samples();
    let noise = config.noise / 100.0;
    let mut data = match config.problem {
        Problem::Classification => config.dataset.generate(rng, num_samples, noise),
        Problem::Regression => config.reg_dataset.generate(rng, num_samples, noise),
    };
    rng.shuffle(&mut data);

    let split_index = ((data.len() as f64 * config.perc_train_data / 100.0).floor() as usize).min(data.len());
    let test_data = data.split_off(split_index);
    log::info!(
        "generated {} dataset: {} train / {} test points (noise {})",
        config.dataset_name(),
        data.len(),
        test_data.len(),
        config.noise
    );
    DataSplit { train_data: data, test_data }
}

/// Mean half squared error of `network` over `points`; 0 for no points.
///
/// Runs a forward pass per point, so the network's per-node state is
/// overwritten.
pub fn get_loss(mask: &FeatureMask, network: &mut Network, points: &[Point]) -> Result<f64> {
    if points.is_empty() {
        return Ok(0.0);
    }
    let mut loss = 0.0;
    for point in points {
        let input = construct_input(mask, point.x, point.y);
        let output = network.forward(&input)?;
        loss += ErrorFunction::Square.error(output, point.label);
    }
    Ok(loss / points.len() as f64)
}

/// Builds a fresh network for `config` and evaluates its initial losses.
///
/// The input layer has one node per enabled feature and the output
/// activation follows the problem type, whatever the hidden activation is.
pub fn reset<R: Rng + ?Sized>(config: &PlaygroundConfig, data: &DataSplit, rng: &mut R) -> Result<TrainingState> {
    let shape = config.layer_shape();
    let mut network = Network::build(
        &shape,
        config.activation,
        config.problem.output_activation(),
        config.regularization,
        &input_ids(&config.features),
        config.init_zero,
        rng,
    )?;
    let loss_train = get_loss(&config.features, &mut network, &data.train_data)?;
    let loss_test = get_loss(&config.features, &mut network, &data.test_data)?;
    log::info!("reset network {shape:?}: train loss {loss_train:.6}, test loss {loss_test:.6}");
    Ok(TrainingState { iter: 0, network, loss_train, loss_test })
}

/// Runs one pass over the training data, updating the weights after every
/// `batch_size` points, then recomputes both losses.
///
/// Points after the last full batch keep their gradients accumulated; they
/// are applied together with the first batch of the next step.
pub fn one_step(state: &mut TrainingState, config: &PlaygroundConfig, data: &DataSplit) -> Result<StepStats> {
    let t_start = Instant::now();
    let batch_size = config.batch_size.max(1);
    state.iter += 1;

    for (i, point) in data.train_data.iter().enumerate() {
        let input = construct_input(&config.features, point.x, point.y);
        state.network.forward(&input)?;
        state.network.backward(point.label, ErrorFunction::Square);
        if (i + 1) % batch_size == 0 {
            state.network.update_weights(config.learning_rate, config.regularization_rate);
        }
    }

    state.loss_train = get_loss(&config.features, &mut state.network, &data.train_data)?;
    state.loss_test = get_loss(&config.features, &mut state.network, &data.test_data)?;

    let elapsed_ms = t_start.elapsed().as_millis() as u64;
    log::debug!(
        "step {}: train loss {:.6}, test loss {:.6} ({} ms)",
        state.iter,
        state.loss_train,
        state.loss_test,
        elapsed_ms
    );
    Ok(state.stats(elapsed_ms))
}

/// One playground session: configuration, its own random sources, the
/// generated data and the network being trained.
///
/// Dataset draws come from a `SeedRandom` keyed by `config.seed`, so two
/// sessions with the same seed see the same points. Weight initialisation
/// uses a separate generator.
pub struct Playground {
    config: PlaygroundConfig,
    data_rng: SeedRandom,
    weight_rng: StdRng,
    data: DataSplit,
    state: TrainingState,
    history: LossHistory,
}

impl Playground {
    /// Validates `config`, generates its dataset and builds the network with
    /// entropy-seeded weights.
    pub fn new(config: PlaygroundConfig) -> Result<Playground> {
        Playground::with_weight_rng(config, StdRng::from_entropy())
    }

    /// Like `new`, with reproducible weight initialisation.
    pub fn with_weight_seed(config: PlaygroundConfig, seed: u64) -> Result<Playground> {
        Playground::with_weight_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_weight_rng(config: PlaygroundConfig, mut weight_rng: StdRng) -> Result<Playground> {
        config.validate()?;
        let mut data_rng = SeedRandom::new(&config.seed);
        let data = generate_data(&config, &mut data_rng);
        let state = reset(&config, &data, &mut weight_rng)?;
        let mut history = LossHistory::new();
        history.record(state.stats(0));
        Ok(Playground { config, data_rng, weight_rng, data, state, history })
    }

    pub fn config(&self) -> &PlaygroundConfig {
        &self.config
    }

    pub fn data(&self) -> &DataSplit {
        &self.data
    }

    pub fn state(&self) -> &TrainingState {
        &self.state
    }

    pub fn network(&self) -> &Network {
        &self.state.network
    }

    pub fn history(&self) -> &LossHistory {
        &self.history
    }

    pub fn iter(&self) -> usize {
        self.state.iter
    }

    /// Deep copy of the current network, safe to hand to another thread.
    pub fn snapshot(&self) -> Network {
        self.state.network.clone()
    }

    /// Applies a new configuration. The dataset is regenerated when a field
    /// that shapes it changed (re-seeding when the seed changed); the network
    /// is always rebuilt.
    pub fn set_config(&mut self, config: PlaygroundConfig) -> Result<()> {
        config.validate()?;
        let old = std::mem::replace(&mut self.config, config);
        if old.seed != self.config.seed {
            self.data_rng = SeedRandom::new(&self.config.seed);
        }
        if data_changed(&old, &self.config) {
            self.data = generate_data(&self.config, &mut self.data_rng);
        }
        self.reset()
    }

    /// Draws a new dataset from the session's generator and rebuilds the
    /// network.
    pub fn regenerate(&mut self) -> Result<()> {
        self.data = generate_data(&self.config, &mut self.data_rng);
        self.reset()
    }

    /// Rebuilds the network on the current data.
    pub fn reset(&mut self) -> Result<()> {
        self.state = reset(&self.config, &self.data, &mut self.weight_rng)?;
        self.history.record(self.state.stats(0));
        Ok(())
    }

    /// Trains for one iteration.
    pub fn step(&mut self) -> Result<StepStats> {
        let stats = one_step(&mut self.state, &self.config, &self.data)?;
        self.history.record(stats.clone());
        Ok(stats)
    }

    /// Output of the current network for the point `(x, y)`.
    pub fn predict(&mut self, x: f64, y: f64) -> Result<f64> {
        let input = construct_input(&self.config.features, x, y);
        self.state.network.forward(&input)
    }
}

fn data_changed(old: &PlaygroundConfig, new: &PlaygroundConfig) -> bool {
    old.problem != new.problem
        || old.dataset != new.dataset
        || old.reg_dataset != new.reg_dataset
        || old.noise != new.noise
        || old.perc_train_data != new.perc_train_data
        || old.seed != new.seed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use crate::dataset::kind::{ClassifyDataset, RegressDataset};

    #[test]
    fn split_follows_percentage() {
        let config = PlaygroundConfig { perc_train_data: 30.0, ..Default::default() };
        let split = generate_data(&config, &mut SeedRandom::new("split"));
        assert_eq!(split.train_data.len(), 150);
        assert_eq!(split.test_data.len(), 350);

        let config = PlaygroundConfig { problem: Problem::Regression, ..Default::default() };
        let split = generate_data(&config, &mut SeedRandom::new("split"));
        assert_eq!(split.train_data.len() + split.test_data.len(), 1200);
    }

    #[test]
    fn reset_builds_shape_from_config() {
        let config = PlaygroundConfig {
            problem: Problem::Regression,
            reg_dataset: RegressDataset::Gauss,
            activation: ActivationFunction::ReLU,
            network_shape: vec![3],
            ..Default::default()
        };
        let data = generate_data(&config, &mut SeedRandom::new("reset"));
        let state = reset(&config, &data, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(state.iter, 0);
        assert_eq!(state.network.shape(), vec![2, 3, 1]);
        assert_eq!(state.network.output_node().activation(), ActivationFunction::Linear);
        assert!(state.loss_train.is_finite() && state.loss_test.is_finite());
    }

    #[test]
    fn empty_point_set_has_zero_loss() {
        let config = PlaygroundConfig::default();
        let mut state = reset(&config, &DataSplit::default(), &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(get_loss(&config.features, &mut state.network, &[]).unwrap(), 0.0);
    }

    #[test]
    fn steps_count_iterations() {
        let mut playground = Playground::with_weight_seed(PlaygroundConfig::default(), 11).unwrap();
        for expected in 1..=3 {
            let stats = playground.step().unwrap();
            assert_eq!(stats.iter, expected);
        }
        assert_eq!(playground.history().len(), 4);
        playground.reset().unwrap();
        assert_eq!(playground.iter(), 0);
        assert_eq!(playground.history().len(), 1);
    }

    #[test]
    fn same_seed_gives_same_data() {
        let a = Playground::new(PlaygroundConfig::default()).unwrap();
        let b = Playground::new(PlaygroundConfig::default()).unwrap();
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn training_only_changes_keep_the_data() {
        let mut playground = Playground::with_weight_seed(PlaygroundConfig::default(), 5).unwrap();
        let before = playground.data().clone();

        let config = PlaygroundConfig { learning_rate: 0.1, network_shape: vec![2], ..Default::default() };
        playground.set_config(config).unwrap();
        assert_eq!(playground.data(), &before);
        assert_eq!(playground.network().shape(), vec![2, 2, 1]);

        let config = PlaygroundConfig { dataset: ClassifyDataset::Xor, ..Default::default() };
        playground.set_config(config).unwrap();
        assert_ne!(playground.data(), &before);
    }

    #[test]
    fn invalid_config_leaves_session_untouched() {
        let mut playground = Playground::with_weight_seed(PlaygroundConfig::default(), 5).unwrap();
        let bad = PlaygroundConfig { batch_size: 99, ..Default::default() };
        assert!(playground.set_config(bad).is_err());
        assert_eq!(playground.config().batch_size, 10);
    }
}
