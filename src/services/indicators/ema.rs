//! Exponential Moving Average (EMA).

/// Recursive EMA over `values` with `alpha = 2 / (span + 1)`, seeded with the
/// first value so the output has the same length as the input.
pub fn ema_series(values: &[f64], span: usize) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };

    let multiplier = 2.0 / (span as f64 + 1.0);
    let mut ema = Vec::with_capacity(values.len());
    let mut current = first;
    ema.push(current);

    for value in values.iter().skip(1) {
        current = (value - current) * multiplier + current;
        ema.push(current);
    }

    ema
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ema_same_length_and_seed() {
        let ema = ema_series(&[10.0, 20.0, 30.0], 3);
        assert_eq!(ema.len(), 3);
        assert_eq!(ema[0], 10.0);
        // alpha = 0.5
        assert_eq!(ema[1], 15.0);
        assert_eq!(ema[2], 22.5);
    }

    #[test]
    fn test_ema_constant_series() {
        let ema = ema_series(&[5.0; 50], 12);
        assert!(ema.iter().all(|v| (*v - 5.0).abs() < 1e-12));
    }

    #[test]
    fn test_ema_empty() {
        assert!(ema_series(&[], 12).is_empty());
    }
}
