pub mod generators;
pub mod kind;
pub mod point;
pub mod scale;

pub use generators::{
    classify_circle_data, classify_spiral_data, classify_two_gauss_data, classify_xor_data,
    regress_gaussian, regress_plane,
};
pub use kind::{ClassifyDataset, RegressDataset};
pub use point::Point;
pub use scale::LinearScale;
