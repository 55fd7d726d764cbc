//! Small descriptive-statistics helpers shared by the weight engine and
//! the uncertainty propagator.

use causeweb_core::models::AggregateStats;

pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Percentile by linear interpolation on a sorted slice. `p` in 0–100.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted {
        [] => 0.0,
        [only] => *only,
        _ => {
            let rank = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
            let low = rank.floor() as usize;
            let high = rank.ceil() as usize;
            let fraction = rank - low as f64;
            sorted[low] + (sorted[high] - sorted[low]) * fraction
        }
    }
}

/// Summarize one aggregated sample vector: mean, median, 95% percentile
/// interval, and the fraction of draws above 1.0.
pub fn summarize(samples: &[f64]) -> AggregateStats {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let strong = samples.iter().filter(|&&x| x > 1.0).count();
    AggregateStats {
        mean: mean(samples),
        median: percentile(&sorted, 50.0),
        ci95: (percentile(&sorted, 2.5), percentile(&sorted, 97.5)),
        probability_strong: if samples.is_empty() {
            0.0
        } else {
            strong as f64 / samples.len() as f64
        },
    }
}
