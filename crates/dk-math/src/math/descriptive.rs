//! Descriptive statistics over sample slices.
//!
//! Sums use Kahan compensation and the variance is computed in two passes
//! around the mean, so long simulation runs do not drift.

use dk_common::{Error, Result};

/// Compensated sum of `values`.
pub fn kahan_sum(values: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut carry = 0.0;
    for &v in values {
        let y = v - carry;
        let t = sum + y;
        carry = (t - sum) - y;
        sum = t;
    }
    sum
}

/// Arithmetic mean.
///
/// # Errors
/// [`Error::InvalidInput`] for an empty slice.
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(Error::InvalidInput("mean of an empty sample".to_string()));
    }
    Ok(kahan_sum(values) / values.len() as f64)
}

/// Sample variance with `ddof` delta degrees of freedom (1 for the unbiased
/// estimator, 0 for the population variance).
///
/// # Errors
/// [`Error::InvalidInput`] unless `values.len() > ddof`.
pub fn variance(values: &[f64], ddof: usize) -> Result<f64> {
    if values.len() <= ddof {
        return Err(Error::InvalidInput(format!(
            "variance needs more than {ddof} values, got {}",
            values.len()
        )));
    }
    let m = mean(values)?;
    let squared: Vec<f64> = values.iter().map(|v| (v - m) * (v - m)).collect();
    Ok(kahan_sum(&squared) / (values.len() - ddof) as f64)
}

/// Square root of [`variance`].
pub fn standard_deviation(values: &[f64], ddof: usize) -> Result<f64> {
    variance(values, ddof).map(f64::sqrt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_simple_sample() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(mean(&xs).unwrap(), 2.5);
        assert!((variance(&xs, 1).unwrap() - 5.0 / 3.0).abs() < 1e-15);
    }

    #[test]
    fn unbiased_variance() {
        // 2, 4, 4, 4, 5, 5, 7, 9: population variance 4, sample variance 32/7
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((variance(&xs, 0).unwrap() - 4.0).abs() < 1e-15);
        assert!((variance(&xs, 1).unwrap() - 32.0 / 7.0).abs() < 1e-15);
        assert!((standard_deviation(&xs, 0).unwrap() - 2.0).abs() < 1e-15);
    }

    #[test]
    fn compensated_sum_keeps_small_terms() {
        let mut xs = vec![1.0e16];
        xs.extend(std::iter::repeat(1.0).take(1000));
        xs.push(-1.0e16);
        assert_eq!(kahan_sum(&xs), 1000.0);
    }

    #[test]
    fn empty_and_short_samples_are_rejected() {
        assert!(matches!(mean(&[]), Err(Error::InvalidInput(_))));
        assert!(matches!(variance(&[1.0], 1), Err(Error::InvalidInput(_))));
        assert!(variance(&[1.0], 0).is_ok());
    }
}
