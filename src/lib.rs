pub mod activation;
pub mod dataset;
pub mod error;
pub mod loss;
pub mod network;
pub mod random;
pub mod regularization;
pub mod train;

// Convenience re-exports
pub use activation::activation::ActivationFunction;
pub use dataset::point::Point;
pub use error::{Error, Result};
pub use loss::loss_type::ErrorFunction;
pub use network::network::Network;
pub use random::seeded::SeedRandom;
pub use regularization::regularization::RegularizationFunction;
pub use train::loop_fn::play_loop;
pub use train::playground::{DataSplit, Playground, TrainingState};
pub use train::step_stats::StepStats;
pub use train::train_config::{PlayConfig, PlaygroundConfig, Problem};
