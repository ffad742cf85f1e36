pub mod normalizer;

pub use normalizer::MinMaxScaler;

use crate::config::ScalerFit;
use crate::error::{PipelineError, Result};
use crate::indicator::IndicatorFrame;

pub const FEATURE_COUNT: usize = 12;

pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Close",
    "Volume",
    "RSI",
    "MACD",
    "MACD_signal",
    "Stoch_k",
    "Stoch_d",
    "OBV",
    "Upper_BB",
    "Lower_BB",
    "ATR",
    "ADX",
];

/// Column of the close price inside a feature vector.
pub const CLOSE_COLUMN: usize = 0;

pub type FeatureVector = [f64; FEATURE_COUNT];

/// Rows whose features are all defined and finite, with their input row index.
#[derive(Debug, Clone, Default)]
pub struct FeatureFrame {
    pub row_index: Vec<usize>,
    pub values: Vec<FeatureVector>,
}

impl FeatureFrame {
    pub fn from_indicators(frame: &IndicatorFrame) -> Self {
        let o = &frame.ohlcv;
        let mut out = Self::default();
        for i in 0..frame.len() {
            let row = [
                Some(o.close[i]),
                Some(o.volume[i]),
                frame.rsi[i],
                frame.macd[i],
                frame.macd_signal[i],
                frame.stoch_k[i],
                frame.stoch_d[i],
                frame.obv[i],
                frame.upper_bb[i],
                frame.lower_bb[i],
                frame.atr[i],
                frame.adx[i],
            ];
            if let Some(values) = complete_row(row) {
                out.row_index.push(i);
                out.values.push(values);
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn complete_row(row: [Option<f64>; FEATURE_COUNT]) -> Option<FeatureVector> {
    let mut out = [0.0; FEATURE_COUNT];
    for (slot, v) in out.iter_mut().zip(row) {
        let v = v?;
        if !v.is_finite() {
            return None;
        }
        *slot = v;
    }
    Some(out)
}

/// Min-max normalized feature rows plus the fitted scaler.
#[derive(Debug, Clone)]
pub struct NormalizedFeatures {
    pub row_index: Vec<usize>,
    pub values: Vec<FeatureVector>,
    pub scaler: MinMaxScaler,
}

impl NormalizedFeatures {
    /// Fit on every row (`ScalerFit::All`) or on the first `train_rows` rows
    /// (`ScalerFit::Train`), then transform every row with that fit.
    pub fn fit_transform(
        frame: &FeatureFrame,
        fit: ScalerFit,
        train_rows: usize,
    ) -> Result<Self> {
        let fit_rows = match fit {
            ScalerFit::All => frame.len(),
            ScalerFit::Train => train_rows.min(frame.len()),
        };
        if fit_rows == 0 {
            return Err(PipelineError::InsufficientData {
                needed: 1,
                available: 0,
            });
        }
        let scaler = MinMaxScaler::fit(&frame.values[..fit_rows])?;
        Ok(Self {
            row_index: frame.row_index.clone(),
            values: scaler.transform(&frame.values),
            scaler,
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn close(&self, i: usize) -> f64 {
        self.values[i][CLOSE_COLUMN]
    }

    /// Map a normalized close back to price units.
    pub fn close_to_price(&self, normalized: f64) -> f64 {
        self.scaler.inverse_transform_value(CLOSE_COLUMN, normalized)
    }
}
