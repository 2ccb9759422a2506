pub mod features;
pub mod loop_fn;
pub mod playground;
pub mod step_stats;
pub mod train_config;

pub use features::{construct_input, input_ids, Feature, FeatureMask};
pub use loop_fn::play_loop;
pub use playground::{generate_data, get_loss, one_step, reset, DataSplit, Playground, TrainingState};
pub use step_stats::{LossHistory, StepStats};
pub use train_config::{PlayConfig, PlaygroundConfig, Problem};
