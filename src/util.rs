pub fn mean(data: &[f64]) -> Option<f64> {
    let sum = data.iter().sum::<f64>();
    let count = data.len();

    match count {
        positive if positive > 0 => Some(sum / count as f64),
        _ => None,
    }
}

pub fn std_dev(data: &[f64]) -> Option<f64> {
    match (mean(data), data.len()) {
        (Some(data_mean), count) if count > 0 => {
            let variance = data
                .iter()
                .map(|value| {
                    let diff = data_mean - *value;

                    diff * diff
                })
                .sum::<f64>()
                / count as f64;

            Some(variance.sqrt())
        }
        _ => None,
    }
}

pub fn median(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;

    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[200., 300., 400.]), Some(300.0));
        assert_eq!(mean(&[312.5, 217.5]), Some(265.0));
    }

    #[test]
    fn test_mean_empty_slice() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_std_dev() {
        assert_eq!(std_dev(&[200., 400.]), Some(100.0));
        let result = std_dev(&[280., 390., 420., 280.]).unwrap();
        assert!((result - 63.39361166552983).abs() < 1e-9);
    }

    #[test]
    fn test_std_dev_single_value() {
        assert_eq!(std_dev(&[217.8]), Some(0.0));
    }

    #[test]
    fn test_std_dev_empty_slice() {
        assert_eq!(std_dev(&[]), None);
    }

    #[test]
    fn test_median_odd() {
        assert_eq!(median(&[300.0, 100.0, 200.0]), Some(200.0));
    }

    #[test]
    fn test_median_even() {
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn test_median_empty_slice() {
        assert_eq!(median(&[]), None);
    }
}
