use super::rolling::{rolling_max, rolling_min};
use super::sma::sma_series;

#[derive(Debug, Clone, Default)]
pub struct StochasticSeries {
    pub k: Vec<Option<f64>>,
    pub d: Vec<Option<f64>>,
}

/// Stochastic oscillator. %K places the close within the `period` high/low
/// range; a flat range leaves %K undefined. %D is the `smooth`-row mean of %K.
pub fn stochastic(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    period: usize,
    smooth: usize,
) -> StochasticSeries {
    let lowest = rolling_min(low, period);
    let highest = rolling_max(high, period);

    let k: Vec<Option<f64>> = close
        .iter()
        .zip(lowest.iter().zip(&highest))
        .map(|(c, (lo, hi))| {
            let (lo, hi) = ((*lo)?, (*hi)?);
            let range = hi - lo;
            if range == 0.0 || !range.is_finite() {
                return None;
            }
            Some(100.0 * (c - lo) / range)
        })
        .collect();
    let d = sma_series(&k, smooth);

    StochasticSeries { k, d }
}
