use serde::{Deserialize, Serialize};

/// Node activation functions available in the playground.
///
/// Parsed from a name; an unrecognised name falls back to `Tanh`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ActivationFunction {
    #[default]
    Tanh,
    ReLU,
    Sigmoid,
    Linear,
}

impl ActivationFunction {
    pub const ALL: [ActivationFunction; 4] = [
        ActivationFunction::Tanh,
        ActivationFunction::ReLU,
        ActivationFunction::Sigmoid,
        ActivationFunction::Linear,
    ];

    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::ReLU => x.max(0.0),
            ActivationFunction::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            ActivationFunction::Linear => x,
        }
    }

    /// Derivative with respect to the node's total input.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Tanh => {
                let t = self.function(x);
                1.0 - t * t
            }
            ActivationFunction::ReLU => if x <= 0.0 { 0.0 } else { 1.0 },
            ActivationFunction::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            }
            ActivationFunction::Linear => 1.0,
        }
    }

    pub fn from_name(name: &str) -> ActivationFunction {
        match name.trim().to_ascii_lowercase().as_str() {
            "tanh" => ActivationFunction::Tanh,
            "relu" => ActivationFunction::ReLU,
            "sigmoid" => ActivationFunction::Sigmoid,
            "linear" => ActivationFunction::Linear,
            other => {
                log::warn!("unknown activation {other:?}, using tanh");
                ActivationFunction::Tanh
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActivationFunction::Tanh => "tanh",
            ActivationFunction::ReLU => "relu",
            ActivationFunction::Sigmoid => "sigmoid",
            ActivationFunction::Linear => "linear",
        }
    }
}

impl From<String> for ActivationFunction {
    fn from(name: String) -> Self {
        ActivationFunction::from_name(&name)
    }
}
