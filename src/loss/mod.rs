pub mod loss_type;
pub mod square;

pub use loss_type::ErrorFunction;
pub use square::SquareError;
