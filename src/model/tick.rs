use chrono::{DateTime, Utc};

/// Fixed-point scale of raw price fields.
pub const PRICE_SCALE: f64 = 1e9;

/// Raw feeds mark an absent price with `i64::MAX`.
pub const UNDEF_PRICE: i64 = i64::MAX;

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub price: f64,
    pub size: f64,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub ts_event: Option<DateTime<Utc>>,
}

impl Tick {
    /// Create a synthetic tick whose quotes straddle the trade price.
    pub fn from_price(price: f64, size: f64, half_spread: f64) -> Self {
        Self {
            price,
            size,
            bid: Some(price - half_spread),
            ask: Some(price + half_spread),
            ts_event: None,
        }
    }

    pub fn high(&self) -> f64 {
        match (self.bid, self.ask) {
            (Some(b), Some(a)) => b.max(a),
            (Some(q), None) | (None, Some(q)) => q,
            (None, None) => self.price,
        }
    }

    pub fn low(&self) -> f64 {
        match (self.bid, self.ask) {
            (Some(b), Some(a)) => b.min(a),
            (Some(q), None) | (None, Some(q)) => q,
            (None, None) => self.price,
        }
    }
}

/// A source row that carried no usable trade price.
#[derive(Debug, Clone, PartialEq)]
pub struct Gap {
    /// Zero-based data row in the source, header excluded.
    pub row: usize,
    pub ts_event: Option<DateTime<Utc>>,
}

/// Ticks in arrival order plus the source rows that were left out of them.
///
/// `gaps` is sorted by row; every source row is either a tick or a gap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickTape {
    pub ticks: Vec<Tick>,
    pub gaps: Vec<Gap>,
}

impl TickTape {
    /// Number of source rows, ticks and gaps together.
    pub fn rows(&self) -> usize {
        self.ticks.len() + self.gaps.len()
    }
}

impl From<Vec<Tick>> for TickTape {
    fn from(ticks: Vec<Tick>) -> Self {
        Self {
            ticks,
            gaps: Vec::new(),
        }
    }
}

/// Convert a raw fixed-point price to decimal. The undefined sentinel maps to `None`.
pub fn scale_price(raw: f64) -> Option<f64> {
    if !raw.is_finite() || raw >= UNDEF_PRICE as f64 {
        return None;
    }
    Some(raw / PRICE_SCALE)
}
