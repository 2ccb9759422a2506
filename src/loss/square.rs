pub struct SquareError;

impl SquareError {
    /// Half squared error: 0.5 * (output - target)²
    pub fn error(output: f64, target: f64) -> f64 {
        0.5 * (output - target).powi(2)
    }

    /// Gradient with respect to the output: output - target
    pub fn derivative(output: f64, target: f64) -> f64 {
        output - target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_values() {
        assert_eq!(SquareError::error(1.0, 2.0), 0.5);
        assert_eq!(SquareError::error(5.0, 1.0), 8.0);
    }

    #[test]
    fn derivative_is_difference() {
        for &(o, t) in &[(1.0, 2.0), (5.0, 1.0), (-0.25, 0.75)] {
            assert_eq!(SquareError::derivative(o, t), o - t);
        }
    }
}
