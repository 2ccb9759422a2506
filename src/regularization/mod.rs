pub mod regularization;

pub use regularization::RegularizationFunction;
