use super::sma::Sma;

/// Exponential Moving Average.
///
/// The first value is the simple mean of the first `period` inputs; after
/// that `ema += (x - ema) * multiplier`.
#[derive(Debug, Clone)]
pub struct Ema {
    multiplier: f64,
    ema: Option<f64>,
    // Used to calculate the first EMA value (which is an SMA)
    initial_sma: Sma,
}

impl Ema {
    /// Span-style EMA, `multiplier = 2 / (period + 1)`.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "EMA period must be > 0");
        Self::with_multiplier(period, 2.0 / (period as f64 + 1.0))
    }

    /// Wilder smoothing, `multiplier = 1 / period`.
    pub fn wilder(period: usize) -> Self {
        assert!(period > 0, "EMA period must be > 0");
        Self::with_multiplier(period, 1.0 / period as f64)
    }

    fn with_multiplier(period: usize, multiplier: f64) -> Self {
        Self {
            multiplier,
            ema: None,
            initial_sma: Sma::new(period),
        }
    }

    /// Push a new value, return the current EMA if enough data.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        self.ema = match self.ema {
            Some(prev) => Some((value - prev) * self.multiplier + prev),
            None => self.initial_sma.push(value),
        };
        self.ema
    }
}

/// Run `ema` over a series with gaps. Missing inputs produce `None` and leave
/// the average untouched, so leading warm-up gaps of an upstream indicator
/// simply delay this one.
pub fn ema_series(values: &[Option<f64>], mut ema: Ema) -> Vec<Option<f64>> {
    values
        .iter()
        .map(|v| match v {
            Some(x) if x.is_finite() => ema.push(*x),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_with_sma_then_smooths() {
        let mut ema = Ema::new(3);
        assert_eq!(ema.push(1.0), None);
        assert_eq!(ema.push(2.0), None);
        let seed = ema.push(3.0).unwrap();
        assert!((seed - 2.0).abs() < f64::EPSILON);

        // multiplier = 0.5
        let next = ema.push(6.0).unwrap();
        assert!((next - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn wilder_uses_one_over_period() {
        let mut ema = Ema::wilder(2);
        ema.push(2.0);
        ema.push(4.0); // seed = 3
        let next = ema.push(7.0).unwrap();
        assert!((next - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn series_skips_leading_gaps() {
        let input = [None, None, Some(1.0), Some(3.0), Some(5.0)];
        let out = ema_series(&input, Ema::new(2));
        assert!(out[..3].iter().all(Option::is_none));
        assert!((out[3].unwrap() - 2.0).abs() < f64::EPSILON);
        assert!(out[4].is_some());
    }
}
