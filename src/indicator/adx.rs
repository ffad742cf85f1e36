use super::atr::atr;
use super::ema::{ema_series, Ema};

/// Average Directional Index.
///
/// Directional movements are clipped at zero, Wilder-smoothed and divided by
/// ATR to get +DI/-DI. DX is their normalized spread, and ADX is DX smoothed
/// again. Zero ATR or a zero DI sum leaves the row undefined.
pub fn adx(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut plus_dm = Vec::with_capacity(high.len());
    let mut minus_dm = Vec::with_capacity(high.len());
    for i in 0..high.len() {
        if i == 0 {
            plus_dm.push(Some(0.0));
            minus_dm.push(Some(0.0));
            continue;
        }
        plus_dm.push(Some((high[i] - high[i - 1]).max(0.0)));
        minus_dm.push(Some((low[i - 1] - low[i]).max(0.0)));
    }

    let plus_smooth = ema_series(&plus_dm, Ema::wilder(period));
    let minus_smooth = ema_series(&minus_dm, Ema::wilder(period));
    let atr = atr(high, low, close, period);

    let dx: Vec<Option<f64>> = (0..high.len())
        .map(|i| {
            let range = atr[i]?;
            if range <= 0.0 {
                return None;
            }
            let plus_di = 100.0 * plus_smooth[i]? / range;
            let minus_di = 100.0 * minus_smooth[i]? / range;
            let sum = plus_di + minus_di;
            if sum <= 0.0 {
                return None;
            }
            Some(100.0 * (plus_di - minus_di).abs() / sum)
        })
        .collect();

    ema_series(&dx, Ema::wilder(period))
}
