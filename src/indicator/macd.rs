use super::ema::{ema_series, Ema};

#[derive(Debug, Clone, Default)]
pub struct MacdSeries {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

/// MACD line (fast EMA - slow EMA of close), its signal EMA and the histogram.
pub fn macd(close: &[f64], fast: usize, slow: usize, signal_period: usize) -> MacdSeries {
    let close: Vec<Option<f64>> = close.iter().copied().map(Some).collect();
    let fast_ema = ema_series(&close, Ema::new(fast));
    let slow_ema = ema_series(&close, Ema::new(slow));

    let macd: Vec<Option<f64>> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| Some((*f)? - (*s)?))
        .collect();
    let signal = ema_series(&macd, Ema::new(signal_period));
    let histogram = macd
        .iter()
        .zip(&signal)
        .map(|(m, s)| Some((*m)? - (*s)?))
        .collect();

    MacdSeries {
        macd,
        signal,
        histogram,
    }
}
