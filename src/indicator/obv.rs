/// On-Balance Volume.
///
/// Volume is added when the close rises and subtracted otherwise. A flat
/// close and the first row (no previous close) both subtract.
pub fn obv(close: &[f64], volume: &[f64]) -> Vec<Option<f64>> {
    let mut total = 0.0;
    let mut prev: Option<f64> = None;
    close
        .iter()
        .zip(volume)
        .map(|(&c, &v)| {
            let rising = prev.is_some_and(|p| c - p > 0.0);
            prev = Some(c);
            total += if rising { v } else { -v };
            Some(total)
        })
        .collect()
}
