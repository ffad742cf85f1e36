use crate::config::SignalConfig;
use crate::model::signal::Signal;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalThresholds {
    pub buy: f64,
    pub sell: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            buy: 0.005,
            sell: 0.005,
        }
    }
}

impl From<&SignalConfig> for SignalThresholds {
    fn from(cfg: &SignalConfig) -> Self {
        Self {
            buy: cfg.buy_threshold,
            sell: cfg.sell_threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    /// `prediction / realized - 1`; `None` when the realized close is zero
    /// or either input is not finite.
    pub ratio: Option<f64>,
    pub signal: Signal,
}

/// BUY above `+buy`, SELL below `-sell`, HOLD in between or when the ratio
/// is undefined.
pub fn decide(prediction: f64, realized: f64, thresholds: SignalThresholds) -> Decision {
    let ratio = if realized == 0.0 {
        None
    } else {
        Some(prediction / realized - 1.0).filter(|r| r.is_finite())
    };
    let signal = match ratio {
        Some(r) if r > thresholds.buy => Signal::Buy,
        Some(r) if r < -thresholds.sell => Signal::Sell,
        _ => Signal::Hold,
    };
    Decision { ratio, signal }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_percent_above_is_buy() {
        let d = decide(110.0, 100.0, SignalThresholds::default());
        assert_eq!(d.signal, Signal::Buy);
        assert!((d.ratio.unwrap() - 0.10).abs() < 1e-12);
    }

    #[test]
    fn ten_percent_below_is_sell() {
        assert_eq!(
            decide(90.0, 100.0, SignalThresholds::default()).signal,
            Signal::Sell
        );
    }

    #[test]
    fn inside_band_is_hold() {
        let d = decide(100.1, 100.0, SignalThresholds::default());
        assert_eq!(d.signal, Signal::Hold);
        assert!((d.ratio.unwrap() - 0.001).abs() < 1e-9);
    }

    #[test]
    fn exact_threshold_is_hold() {
        let t = SignalThresholds { buy: 0.5, sell: 0.5 };
        assert_eq!(decide(150.0, 100.0, t).signal, Signal::Hold);
        assert_eq!(decide(50.0, 100.0, t).signal, Signal::Hold);
    }

    #[test]
    fn zero_realized_has_no_ratio() {
        let d = decide(1.0, 0.0, SignalThresholds::default());
        assert_eq!(d.ratio, None);
        assert_eq!(d.signal, Signal::Hold);

        let d = decide(f64::NAN, 100.0, SignalThresholds::default());
        assert_eq!(d.ratio, None);
        assert_eq!(d.signal, Signal::Hold);
    }
}
