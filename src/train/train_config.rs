use std::sync::mpsc;
use std::sync::{atomic::AtomicBool, Arc};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationFunction;
use crate::dataset::kind::{ClassifyDataset, RegressDataset};
use crate::error::{Error, Result};
use crate::regularization::regularization::RegularizationFunction;
use crate::train::features::FeatureMask;
use crate::train::step_stats::StepStats;

/// Learning rates offered by the playground controls.
pub const LEARNING_RATES: [f64; 11] = [0.00001, 0.0001, 0.001, 0.003, 0.01, 0.03, 0.1, 0.3, 1.0, 3.0, 10.0];
/// Regularization rates offered by the playground controls.
pub const REGULARIZATION_RATES: [f64; 10] = [0.0, 0.001, 0.003, 0.01, 0.03, 0.1, 0.3, 1.0, 3.0, 10.0];

pub const MAX_HIDDEN_LAYERS: usize = 6;
pub const MAX_NEURONS_PER_LAYER: usize = 8;

/// Samples generated for a classification dataset.
pub const NUM_SAMPLES_CLASSIFY: usize = 500;
/// Samples generated for a regression dataset.
pub const NUM_SAMPLES_REGRESS: usize = 1200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Problem {
    #[default]
    Classification,
    Regression,
}

impl Problem {
    pub fn num_samples(&self) -> usize {
        match self {
            Problem::Classification => NUM_SAMPLES_CLASSIFY,
            Problem::Regression => NUM_SAMPLES_REGRESS,
        }
    }

    /// Activation of the output node: tanh squashes towards the ±1 class
    /// labels, regression needs an unbounded output.
    pub fn output_activation(&self) -> ActivationFunction {
        match self {
            Problem::Classification => ActivationFunction::Tanh,
            Problem::Regression => ActivationFunction::Linear,
        }
    }
}

/// Everything a playground run is configured by.
///
/// Deserializing fills missing fields from `Default`, and unknown dataset,
/// activation or regularization names fall back to their defaults, so any
/// partial JSON object is accepted. Ranges are checked by `validate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaygroundConfig {
    pub problem: Problem,
    pub dataset: ClassifyDataset,
    pub reg_dataset: RegressDataset,
    /// Noise level in percent, 0..=50.
    pub noise: f64,
    /// Share of the generated points used for training, in percent, 10..=90.
    pub perc_train_data: f64,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub regularization_rate: f64,
    pub activation: ActivationFunction,
    pub regularization: RegularizationFunction,
    /// Width of each hidden layer.
    pub network_shape: Vec<usize>,
    #[serde(flatten)]
    pub features: FeatureMask,
    pub init_zero: bool,
    /// Seed of the dataset generator.
    pub seed: String,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        PlaygroundConfig {
            problem: Problem::Classification,
            dataset: ClassifyDataset::Circle,
            reg_dataset: RegressDataset::Plane,
            noise: 0.0,
            perc_train_data: 50.0,
            batch_size: 10,
            learning_rate: 0.03,
            regularization_rate: 0.0,
            activation: ActivationFunction::Tanh,
            regularization: RegularizationFunction::None,
            network_shape: vec![4, 2],
            features: FeatureMask::default(),
            init_zero: false,
            seed: "nn-viz".to_owned(),
        }
    }
}

impl PlaygroundConfig {
    /// Checks every field against the ranges the playground supports.
    pub fn validate(&self) -> Result<()> {
        check_range("noise", self.noise, 0.0, 50.0)?;
        check_range("percTrainData", self.perc_train_data, 10.0, 90.0)?;
        check_range("batchSize", self.batch_size as f64, 1.0, 30.0)?;
        check_range("learningRate", self.learning_rate, LEARNING_RATES[0], LEARNING_RATES[LEARNING_RATES.len() - 1])?;
        check_range(
            "regularizationRate",
            self.regularization_rate,
            REGULARIZATION_RATES[0],
            REGULARIZATION_RATES[REGULARIZATION_RATES.len() - 1],
        )?;
        if self.network_shape.len() > MAX_HIDDEN_LAYERS {
            return Err(Error::InvalidConfig(format!(
                "at most {MAX_HIDDEN_LAYERS} hidden layers are supported, got {}",
                self.network_shape.len()
            )));
        }
        if let Some(&width) = self
            .network_shape
            .iter()
            .find(|&&w| w == 0 || w > MAX_NEURONS_PER_LAYER)
        {
            return Err(Error::InvalidConfig(format!(
                "hidden layers need 1 to {MAX_NEURONS_PER_LAYER} neurons, got {width}"
            )));
        }
        if self.features.count() == 0 {
            return Err(Error::InvalidConfig("at least one input feature must be enabled".into()));
        }
        Ok(())
    }

    /// Full layer shape: inputs, hidden layers, one output.
    pub fn layer_shape(&self) -> Vec<usize> {
        let mut shape = Vec::with_capacity(self.network_shape.len() + 2);
        shape.push(self.features.count());
        shape.extend_from_slice(&self.network_shape);
        shape.push(1);
        shape
    }

    /// Name of the dataset selected for the current problem.
    pub fn dataset_name(&self) -> &'static str {
        match self.problem {
            Problem::Classification => self.dataset.name(),
            Problem::Regression => self.reg_dataset.name(),
        }
    }

    /// Serializes the configuration to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a configuration from a JSON file written by `save_json`.
    pub fn load_json(path: &str) -> Result<PlaygroundConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

fn check_range(name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if value.is_nan() || value < min || value > max {
        return Err(Error::InvalidConfig(format!("{name} must be within [{min}, {max}], got {value}")));
    }
    Ok(())
}

/// Configuration for a `play_loop` run.
///
/// # Fields
/// - `iterations`:  number of steps to run; `None` runs until stopped
/// - `interval`:    pause between steps (the playground UI ticks every 100 ms)
/// - `progress_tx`: optional channel; one `StepStats` is sent per step. If
///                   the receiver is dropped the loop ends.
/// - `stop_flag`:   optional atomic flag; when set from another thread the
///                   loop ends before the next step.
pub struct PlayConfig {
    pub iterations: Option<usize>,
    pub interval: Duration,
    pub progress_tx: Option<mpsc::Sender<StepStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl PlayConfig {
    /// Runs `iterations` steps back to back with no channel and no stop flag.
    pub fn new(iterations: usize) -> Self {
        PlayConfig {
            iterations: Some(iterations),
            interval: Duration::ZERO,
            progress_tx: None,
            stop_flag: None,
        }
    }
}
