use serde::{Deserialize, Serialize};

/// One labeled sample in the plane.
///
/// `label` is ±1 for classification datasets and a continuous value in
/// roughly [-1, 1] for regression datasets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub label: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, label: f64) -> Point {
        Point { x, y, label }
    }
}

/// Euclidean distance between `(ax, ay)` and `(bx, by)`.
pub(crate) fn dist(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let dx = ax - bx;
    let dy = ay - by;
    (dx * dx + dy * dy).sqrt()
}
