use serde::{Deserialize, Serialize};

/// Weight penalty applied during `update_weights`.
///
/// `None` is a selectable option but is never attached to a link; the graph
/// builder stores it as the absence of a penalty. Unrecognised names parse as
/// `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum RegularizationFunction {
    #[default]
    None,
    L1,
    L2,
}

impl RegularizationFunction {
    pub const ALL: [RegularizationFunction; 3] = [
        RegularizationFunction::None,
        RegularizationFunction::L1,
        RegularizationFunction::L2,
    ];

    /// Penalty cost for `weight`.
    pub fn output(&self, weight: f64) -> f64 {
        match self {
            RegularizationFunction::None => 0.0,
            RegularizationFunction::L1 => weight.abs(),
            RegularizationFunction::L2 => 0.5 * weight * weight,
        }
    }

    /// Derivative of the penalty; L1 is 0 at exactly 0.
    pub fn derivative(&self, weight: f64) -> f64 {
        match self {
            RegularizationFunction::None => 0.0,
            RegularizationFunction::L1 => {
                if weight < 0.0 {
                    -1.0
                } else if weight > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            RegularizationFunction::L2 => weight,
        }
    }

    /// The penalty to attach to links, or `None` when there is none.
    pub fn for_links(self) -> Option<RegularizationFunction> {
        match self {
            RegularizationFunction::None => None,
            other => Some(other),
        }
    }

    pub fn from_name(name: &str) -> RegularizationFunction {
        match name.trim().to_ascii_lowercase().as_str() {
            "none" | "" => RegularizationFunction::None,
            "l1" => RegularizationFunction::L1,
            "l2" => RegularizationFunction::L2,
            other => {
                log::warn!("unknown regularization {other:?}, using none");
                RegularizationFunction::None
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RegularizationFunction::None => "none",
            RegularizationFunction::L1 => "l1",
            RegularizationFunction::L2 => "l2",
        }
    }
}

impl From<String> for RegularizationFunction {
    fn from(name: String) -> Self {
        RegularizationFunction::from_name(&name)
    }
}
