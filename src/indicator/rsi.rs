use super::sma::Sma;

/// Relative Strength Index from simple rolling means of gains and losses.
///
/// The first close has no predecessor and counts as a zero change, so the
/// first defined value sits at index `period - 1`. A window with gains but
/// no losses saturates at 100; a window with neither is `None`.
pub fn rsi(close: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut gains = Sma::new(period);
    let mut losses = Sma::new(period);
    let mut prev: Option<f64> = None;

    close
        .iter()
        .map(|&price| {
            let delta = prev.map(|p| price - p).unwrap_or(0.0);
            prev = Some(price);
            let avg_gain = gains.push(delta.max(0.0));
            let avg_loss = losses.push((-delta).max(0.0));
            let (avg_gain, avg_loss) = (avg_gain?, avg_loss?);
            if !avg_gain.is_finite() || !avg_loss.is_finite() {
                return None;
            }
            if avg_loss <= 0.0 {
                return (avg_gain > 0.0).then_some(100.0);
            }
            let rs = avg_gain / avg_loss;
            Some(100.0 - (100.0 / (1.0 + rs)))
        })
        .collect()
}
