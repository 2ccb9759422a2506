use serde::{Deserialize, Serialize};

use crate::dataset::generators;
use crate::dataset::point::Point;
use crate::random::SeedRandom;

/// Classification datasets offered by the playground.
///
/// Parsing never fails: an unrecognised name falls back to `Circle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ClassifyDataset {
    #[default]
    Circle,
    Xor,
    Gauss,
    Spiral,
}

impl ClassifyDataset {
    pub const ALL: [ClassifyDataset; 4] = [
        ClassifyDataset::Circle,
        ClassifyDataset::Xor,
        ClassifyDataset::Gauss,
        ClassifyDataset::Spiral,
    ];

    pub fn from_name(name: &str) -> ClassifyDataset {
        match name.trim().to_ascii_lowercase().as_str() {
            "circle" => ClassifyDataset::Circle,
            "xor" => ClassifyDataset::Xor,
            "gauss" => ClassifyDataset::Gauss,
            "spiral" => ClassifyDataset::Spiral,
            other => {
                log::warn!("unknown classification dataset {other:?}, using circle");
                ClassifyDataset::Circle
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ClassifyDataset::Circle => "circle",
            ClassifyDataset::Xor => "xor",
            ClassifyDataset::Gauss => "gauss",
            ClassifyDataset::Spiral => "spiral",
        }
    }

    pub fn generate(&self, rng: &mut SeedRandom, num_samples: usize, noise: f64) -> Vec<Point> {
        match self {
            ClassifyDataset::Circle => generators::classify_circle_data(rng, num_samples, noise),
            ClassifyDataset::Xor => generators::classify_xor_data(rng, num_samples, noise),
            ClassifyDataset::Gauss => generators::classify_two_gauss_data(rng, num_samples, noise),
            ClassifyDataset::Spiral => generators::classify_spiral_data(rng, num_samples, noise),
        }
    }
}

impl From<String> for ClassifyDataset {
    fn from(name: String) -> Self {
        ClassifyDataset::from_name(&name)
    }
}

/// Regression datasets offered by the playground.
///
/// Accepts both the short names and the `reg-` prefixed ones; anything else
/// falls back to `Plane`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum RegressDataset {
    #[default]
    Plane,
    Gauss,
}

impl RegressDataset {
    pub const ALL: [RegressDataset; 2] = [RegressDataset::Plane, RegressDataset::Gauss];

    pub fn from_name(name: &str) -> RegressDataset {
        match name.trim().to_ascii_lowercase().as_str() {
            "plane" | "reg-plane" => RegressDataset::Plane,
            "gauss" | "reg-gauss" => RegressDataset::Gauss,
            other => {
                log::warn!("unknown regression dataset {other:?}, using plane");
                RegressDataset::Plane
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RegressDataset::Plane => "plane",
            RegressDataset::Gauss => "gauss",
        }
    }

    pub fn generate(&self, rng: &mut SeedRandom, num_samples: usize, noise: f64) -> Vec<Point> {
        match self {
            RegressDataset::Plane => generators::regress_plane(rng, num_samples, noise),
            RegressDataset::Gauss => generators::regress_gaussian(rng, num_samples, noise),
        }
    }
}

impl From<String> for RegressDataset {
    fn from(name: String) -> Self {
        RegressDataset::from_name(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for d in ClassifyDataset::ALL {
            assert_eq!(ClassifyDataset::from_name(d.name()), d);
        }
        for d in RegressDataset::ALL {
            assert_eq!(RegressDataset::from_name(d.name()), d);
        }
    }

    #[test]
    fn unknown_names_fall_back() {
        assert_eq!(ClassifyDataset::from_name("moons"), ClassifyDataset::Circle);
        assert_eq!(RegressDataset::from_name("sine"), RegressDataset::Plane);
        assert_eq!(RegressDataset::from_name("reg-gauss"), RegressDataset::Gauss);
    }

    #[test]
    fn deserializes_with_fallback() {
        let d: ClassifyDataset = serde_json::from_str("\"spiral\"").unwrap();
        assert_eq!(d, ClassifyDataset::Spiral);
        let d: ClassifyDataset = serde_json::from_str("\"nope\"").unwrap();
        assert_eq!(d, ClassifyDataset::Circle);
        assert_eq!(serde_json::to_string(&RegressDataset::Gauss).unwrap(), "\"gauss\"");
    }
}
