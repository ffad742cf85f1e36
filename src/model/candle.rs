use super::tick::Tick;

/// Column-oriented OHLCV rows derived one-per-tick.
///
/// `close` is the trade price, `volume` the trade size, `high`/`low` the
/// max/min of the top-of-book quotes and `open` the previous row's close.
#[derive(Debug, Clone, Default)]
pub struct OhlcvSeries {
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<f64>,
}

impl OhlcvSeries {
    pub fn from_ticks(ticks: &[Tick]) -> Self {
        let mut series = Self {
            open: Vec::with_capacity(ticks.len()),
            high: Vec::with_capacity(ticks.len()),
            low: Vec::with_capacity(ticks.len()),
            close: Vec::with_capacity(ticks.len()),
            volume: Vec::with_capacity(ticks.len()),
        };
        let mut prev_close: Option<f64> = None;
        for tick in ticks {
            series.open.push(prev_close.unwrap_or(tick.price));
            series.high.push(tick.high());
            series.low.push(tick.low());
            series.close.push(tick.price);
            series.volume.push(tick.size);
            prev_close = Some(tick.price);
        }
        series
    }

    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_is_previous_close() {
        let ticks = vec![
            Tick::from_price(100.0, 1.0, 0.5),
            Tick::from_price(102.0, 2.0, 0.5),
            Tick::from_price(101.0, 3.0, 0.5),
        ];
        let s = OhlcvSeries::from_ticks(&ticks);
        assert_eq!(s.len(), 3);
        assert!((s.open[0] - 100.0).abs() < f64::EPSILON);
        assert!((s.open[1] - 100.0).abs() < f64::EPSILON);
        assert!((s.open[2] - 102.0).abs() < f64::EPSILON);
        assert!((s.high[1] - 102.5).abs() < f64::EPSILON);
        assert!((s.low[1] - 101.5).abs() < f64::EPSILON);
        assert!((s.volume[2] - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_ticks_give_empty_series() {
        let s = OhlcvSeries::from_ticks(&[]);
        assert!(s.is_empty());
    }
}
