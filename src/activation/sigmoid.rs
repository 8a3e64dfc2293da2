/// The logistic function, the only activation used by the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sigmoid;

impl Sigmoid {
    /// σ(x) = 1 / (1 + e^(-x))
    pub fn function(x: f32) -> f32 {
        1.0 / (1.0 + (-x).exp())
    }

    /// σ'(x) = σ(x)(1 − σ(x)), taken at the pre-activation `x`.
    pub fn derivative(x: f32) -> f32 {
        let fx = Sigmoid::function(x);
        fx * (1.0 - fx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn known_values() {
        assert_eq!(Sigmoid::function(0.0), 0.5);
        assert_eq!(Sigmoid::derivative(0.0), 0.25);
        assert_abs_diff_eq!(Sigmoid::function(2.0), 0.880_797_1, epsilon = 1e-6);
        assert_abs_diff_eq!(Sigmoid::function(-2.0), 0.119_202_92, epsilon = 1e-6);
    }

    #[test]
    fn saturates_without_nan() {
        assert_eq!(Sigmoid::function(-1000.0), 0.0);
        assert_eq!(Sigmoid::function(1000.0), 1.0);
        assert_eq!(Sigmoid::derivative(1000.0), 0.0);
        assert!(!Sigmoid::derivative(-1000.0).is_nan());
    }

    #[test]
    fn derivative_matches_central_difference() {
        let h = 1e-3;
        for &x in &[-3.0f32, -0.5, 0.0, 0.7, 2.5] {
            let numeric = (Sigmoid::function(x + h) - Sigmoid::function(x - h)) / (2.0 * h);
            assert_abs_diff_eq!(Sigmoid::derivative(x), numeric, epsilon = 1e-4);
        }
    }
}
