//! Technical indicators over an ordered OHLCV series.
//!
//! Every function returns one entry per input row; rows inside an
//! indicator's warm-up, or where its formula divides by zero, are `None`.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod obv;
pub mod rolling;
pub mod rsi;
pub mod sma;
pub mod stochastic;

use crate::config::IndicatorConfig;
use crate::model::candle::OhlcvSeries;

/// OHLCV columns plus every derived indicator, all aligned by row.
#[derive(Debug, Clone, Default)]
pub struct IndicatorFrame {
    pub ohlcv: OhlcvSeries,
    pub rsi: Vec<Option<f64>>,
    pub macd: Vec<Option<f64>>,
    pub macd_signal: Vec<Option<f64>>,
    pub macd_hist: Vec<Option<f64>>,
    pub stoch_k: Vec<Option<f64>>,
    pub stoch_d: Vec<Option<f64>>,
    pub obv: Vec<Option<f64>>,
    pub bb_middle: Vec<Option<f64>>,
    pub upper_bb: Vec<Option<f64>>,
    pub lower_bb: Vec<Option<f64>>,
    pub atr: Vec<Option<f64>>,
    pub adx: Vec<Option<f64>>,
}

impl IndicatorFrame {
    pub fn compute(ohlcv: OhlcvSeries, cfg: &IndicatorConfig) -> Self {
        let (high, low, close) = (&ohlcv.high, &ohlcv.low, &ohlcv.close);

        let macd = macd::macd(close, cfg.macd_fast, cfg.macd_slow, cfg.macd_signal);
        let stoch = stochastic::stochastic(high, low, close, cfg.stoch_period, cfg.stoch_smooth);
        let bands = bollinger::bollinger(close, cfg.bollinger_period, cfg.bollinger_k);

        Self {
            rsi: rsi::rsi(close, cfg.rsi_period),
            macd: macd.macd,
            macd_signal: macd.signal,
            macd_hist: macd.histogram,
            stoch_k: stoch.k,
            stoch_d: stoch.d,
            obv: obv::obv(close, &ohlcv.volume),
            bb_middle: bands.middle,
            upper_bb: bands.upper,
            lower_bb: bands.lower,
            atr: atr::atr(high, low, close, cfg.atr_period),
            adx: adx::adx(high, low, close, cfg.adx_period),
            ohlcv,
        }
    }

    pub fn len(&self) -> usize {
        self.ohlcv.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ohlcv.is_empty()
    }
}
