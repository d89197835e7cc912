pub fn mean(data: &[f64]) -> Option<f64> {
    let sum = data.iter().sum::<f64>();
    let count = data.len();

    match count {
        positive if positive > 0 => Some(sum / count as f64),
        _ => None,
    }
}

/// Population standard deviation
pub fn std_dev(data: &[f64]) -> Option<f64> {
    let data_mean = mean(data)?;
    let variance = data
        .iter()
        .map(|value| {
            let diff = data_mean - *value;

            diff * diff
        })
        .sum::<f64>()
        / data.len() as f64;

    Some(variance.sqrt())
}

pub fn min(data: &[f64]) -> Option<f64> {
    data.iter().copied().reduce(f64::min)
}

pub fn max(data: &[f64]) -> Option<f64> {
    data.iter().copied().reduce(f64::max)
}

/// Two-decimal rendering of an optional score, `none` when absent
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(value) => format!("{value:.2}"),
        None => "none".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_of_tier_scores() {
        assert_eq!(mean(&[1., 3., 5.]), Some(3.0));
        assert_eq!(mean(&[2., 2.]), Some(2.0));
        assert_eq!(mean(&[1., 1., 2.]), Some(4.0 / 3.0));
    }

    #[test]
    fn test_mean_empty_slice() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_std_dev() {
        assert_eq!(std_dev(&[1., 1., 1.]), Some(0.0));
        assert_eq!(std_dev(&[1., 3.]), Some(1.0));
        assert_eq!(std_dev(&[]), None);
    }

    #[test]
    fn test_min_max() {
        assert_eq!(min(&[2.5, 1.0, 4.0]), Some(1.0));
        assert_eq!(max(&[2.5, 1.0, 4.0]), Some(4.0));
        assert_eq!(min(&[]), None);
        assert_eq!(max(&[]), None);
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(Some(1.25)), "1.25");
        assert_eq!(format_score(Some(2.0)), "2.00");
        assert_eq!(format_score(None), "none");
    }
}
