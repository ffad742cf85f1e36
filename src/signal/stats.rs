use serde::Serialize;

use super::generator::SignalPoint;
use crate::model::signal::Signal;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SignalStats {
    pub buy: u32,
    pub sell: u32,
    pub hold: u32,
    /// Points whose ratio could not be computed (zero or non-finite close).
    pub undefined: u32,
}

impl SignalStats {
    pub fn from_points(points: &[SignalPoint]) -> Self {
        let mut stats = Self::default();
        for p in points {
            stats.record(p.signal, p.ratio.is_none());
        }
        stats
    }

    pub fn record(&mut self, signal: Signal, undefined: bool) {
        match signal {
            Signal::Buy => self.buy = self.buy.saturating_add(1),
            Signal::Sell => self.sell = self.sell.saturating_add(1),
            Signal::Hold => self.hold = self.hold.saturating_add(1),
        }
        if undefined {
            self.undefined = self.undefined.saturating_add(1);
        }
    }

    pub fn total(&self) -> u32 {
        self.buy.saturating_add(self.sell).saturating_add(self.hold)
    }

    pub fn buy_rate_percent(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            (self.buy as f64 / total as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_signal() {
        let mut stats = SignalStats::default();
        stats.record(Signal::Buy, false);
        stats.record(Signal::Buy, false);
        stats.record(Signal::Hold, true);
        stats.record(Signal::Sell, false);
        assert_eq!(stats.total(), 4);
        assert_eq!(stats.undefined, 1);
        assert!((stats.buy_rate_percent() - 50.0).abs() < f64::EPSILON);
        assert_eq!(SignalStats::default().buy_rate_percent(), 0.0);
    }

    #[test]
    fn total_saturates_instead_of_overflowing() {
        let stats = SignalStats {
            buy: u32::MAX,
            sell: 2,
            hold: 3,
            undefined: 0,
        };
        assert_eq!(stats.total(), u32::MAX);
    }
}
