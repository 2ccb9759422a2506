use serde::{Deserialize, Serialize};

use crate::loss::square::SquareError;

/// Error function applied at the output node during back-propagation.
///
/// - `Square`: half squared error; the playground uses it for both
///   classification (±1 targets with a tanh output) and regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorFunction {
    #[default]
    Square,
}

impl ErrorFunction {
    pub fn error(&self, output: f64, target: f64) -> f64 {
        match self {
            ErrorFunction::Square => SquareError::error(output, target),
        }
    }

    pub fn derivative(&self, output: f64, target: f64) -> f64 {
        match self {
            ErrorFunction::Square => SquareError::derivative(output, target),
        }
    }
}
