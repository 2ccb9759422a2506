use serde::{Deserialize, Serialize};

use crate::network::node::NodeId;
use crate::regularization::regularization::RegularizationFunction;

/// Stable handle of a link inside its `Network`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkId(pub(crate) usize);

impl LinkId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A weighted edge from `source` to `dest`.
///
/// Once `is_dead` is set (L1 drove the weight across zero) the weight stays
/// at 0 and the link no longer takes part in learning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    id: String,
    source: NodeId,
    dest: NodeId,
    regularization: Option<RegularizationFunction>,
    pub weight: f64,
    pub is_dead: bool,
    /// dE/d(weight) from the last backward pass.
    pub error_der: f64,
    pub acc_error_der: f64,
    pub num_accumulated_ders: usize,
}

impl Link {
    pub(crate) fn new(
        id: String,
        source: NodeId,
        dest: NodeId,
        regularization: Option<RegularizationFunction>,
        weight: f64,
    ) -> Link {
        Link {
            id,
            source,
            dest,
            regularization,
            weight,
            is_dead: false,
            error_der: 0.0,
            acc_error_der: 0.0,
            num_accumulated_ders: 0,
        }
    }

    /// `"<source id> - <dest id>"`
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn dest(&self) -> NodeId {
        self.dest
    }

    pub fn regularization(&self) -> Option<RegularizationFunction> {
        self.regularization
    }
}
