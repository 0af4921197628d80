//! Summary statistics over token lengths

use crate::errors::MetricError;

/// Arithmetic mean
pub fn mean(samples: &[usize]) -> Result<f64, MetricError> {
    if samples.is_empty() {
        return Err(MetricError::DivisionByZero {
            denominator: "sample count",
        });
    }
    Ok(samples.iter().sum::<usize>() as f64 / samples.len() as f64)
}

/// Median; the mean of the two middle values for even-sized samples
pub fn median(samples: &[usize]) -> Result<f64, MetricError> {
    if samples.is_empty() {
        return Err(MetricError::InsufficientSample {
            required: 1,
            actual: 0,
        });
    }
    let mut sorted = samples.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) as f64 / 2.0)
    } else {
        Ok(sorted[mid] as f64)
    }
}

/// Sample standard deviation (n - 1 denominator). Needs two samples.
pub fn std_dev(samples: &[usize]) -> Result<f64, MetricError> {
    if samples.len() < 2 {
        return Err(MetricError::InsufficientSample {
            required: 2,
            actual: samples.len(),
        });
    }
    let mean = mean(samples)?;
    let sum_sq: f64 = samples
        .iter()
        .map(|&x| {
            let d = x as f64 - mean;
            d * d
        })
        .sum();
    Ok((sum_sq / (samples.len() - 1) as f64).sqrt())
}

/// Smallest and largest sample
pub fn extremum(samples: &[usize]) -> Result<(usize, usize), MetricError> {
    let min = samples.iter().min();
    let max = samples.iter().max();
    match (min, max) {
        (Some(&min), Some(&max)) => Ok((min, max)),
        _ => Err(MetricError::InsufficientSample {
            required: 1,
            actual: 0,
        }),
    }
}

/// `numerator / denominator`, refusing a zero denominator
pub fn ratio(numerator: usize, denominator: usize, name: &'static str) -> Result<f64, MetricError> {
    if denominator == 0 {
        return Err(MetricError::DivisionByZero { denominator: name });
    }
    Ok(numerator as f64 / denominator as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_median() {
        assert_eq!(mean(&[2, 4, 9]).unwrap(), 5.0);
        assert_eq!(median(&[9, 2, 4]).unwrap(), 4.0);
        assert_eq!(median(&[5, 1, 4, 2]).unwrap(), 3.0);
        assert!(mean(&[]).is_err());
        assert!(median(&[]).is_err());
    }

    #[test]
    fn test_std_dev() {
        let sd = std_dev(&[2, 4, 4, 4, 5, 5, 7, 9]).unwrap();
        assert!((sd - 2.138_089_935).abs() < 1e-9);
        assert_eq!(std_dev(&[3, 3]).unwrap(), 0.0);
    }

    #[test]
    fn test_std_dev_needs_two_samples() {
        let err = std_dev(&[5]).unwrap_err();
        assert_eq!(
            err,
            MetricError::InsufficientSample {
                required: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_extremum() {
        assert_eq!(extremum(&[5, 3, 11, 4]).unwrap(), (3, 11));
        assert!(extremum(&[]).is_err());
    }

    #[test]
    fn test_ratio() {
        assert_eq!(ratio(1, 4, "x").unwrap(), 0.25);
        assert_eq!(
            ratio(1, 0, "item count").unwrap_err(),
            MetricError::DivisionByZero {
                denominator: "item count"
            }
        );
    }
}
