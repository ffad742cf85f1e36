use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "SIGNAL_FORECASTER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub indicators: IndicatorConfig,
    pub features: FeatureConfig,
    pub model: ModelConfig,
    pub training: TrainingConfig,
    pub signal: SignalConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub report_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data/ticks.csv"),
            output_path: PathBuf::from("data/signals.csv"),
            report_path: PathBuf::from("data/report.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub stoch_period: usize,
    pub stoch_smooth: usize,
    pub bollinger_period: usize,
    pub bollinger_k: f64,
    pub atr_period: usize,
    pub adx_period: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            stoch_period: 14,
            stoch_smooth: 3,
            bollinger_period: 20,
            bollinger_k: 2.0,
            atr_period: 14,
            adx_period: 14,
        }
    }
}

/// Which rows the min-max scaler is fitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalerFit {
    /// Every complete row, including the rows later scored. Leaks future
    /// ranges into the training features.
    #[default]
    All,
    /// Only the chronological training prefix.
    Train,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    pub window_length: usize,
    pub scaler_fit: ScalerFit,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            window_length: 60,
            scaler_fit: ScalerFit::All,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub model_dim: usize,
    pub num_heads: usize,
    pub num_layers: usize,
    pub feedforward_dim: usize,
    pub dropout: f64,
    pub seed: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dim: 64,
            num_heads: 8,
            num_layers: 4,
            feedforward_dim: 256,
            dropout: 0.1,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    /// Share of windows, taken from the end of the series, held out for
    /// validation. Zero trains on everything.
    pub validation_fraction: f64,
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: 1,
            batch_size: 256,
            learning_rate: 0.001,
            validation_fraction: 0.0,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    pub buy_threshold: f64,
    pub sell_threshold: f64,
    pub inference_batch_size: usize,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            buy_threshold: 0.005,
            sell_threshold: 0.005,
            inference_batch_size: 512,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Config {
    /// Load `.env`, then the TOML file named by `SIGNAL_FORECASTER_CONFIG`
    /// (or `config/default.toml`).
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::from_path(&path)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&config_str)
            .with_context(|| format!("failed to load {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).context("failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let ind = &self.indicators;
        for (name, period) in [
            ("indicators.rsi_period", ind.rsi_period),
            ("indicators.macd_fast", ind.macd_fast),
            ("indicators.macd_slow", ind.macd_slow),
            ("indicators.macd_signal", ind.macd_signal),
            ("indicators.stoch_period", ind.stoch_period),
            ("indicators.stoch_smooth", ind.stoch_smooth),
            ("indicators.atr_period", ind.atr_period),
            ("indicators.adx_period", ind.adx_period),
        ] {
            if period == 0 {
                bail!("{} must be > 0", name);
            }
        }
        if ind.bollinger_period < 2 {
            bail!("indicators.bollinger_period must be >= 2");
        }
        if ind.macd_fast >= ind.macd_slow {
            bail!(
                "indicators.macd_fast ({}) must be < indicators.macd_slow ({})",
                ind.macd_fast,
                ind.macd_slow
            );
        }
        if self.features.window_length < 2 {
            bail!("features.window_length must be >= 2");
        }

        let model = &self.model;
        if model.model_dim == 0 || model.num_heads == 0 || model.num_layers == 0 {
            bail!("model.model_dim, model.num_heads and model.num_layers must be > 0");
        }
        if model.model_dim % model.num_heads != 0 {
            bail!(
                "model.model_dim ({}) must be divisible by model.num_heads ({})",
                model.model_dim,
                model.num_heads
            );
        }
        if model.feedforward_dim == 0 {
            bail!("model.feedforward_dim must be > 0");
        }
        if !(0.0..1.0).contains(&model.dropout) {
            bail!("model.dropout must be in [0, 1)");
        }

        let train = &self.training;
        if train.batch_size == 0 {
            bail!("training.batch_size must be > 0");
        }
        if !(train.learning_rate > 0.0 && train.learning_rate.is_finite()) {
            bail!("training.learning_rate must be a positive number");
        }
        if !(0.0..1.0).contains(&train.validation_fraction) {
            bail!("training.validation_fraction must be in [0, 1)");
        }

        let signal = &self.signal;
        if signal.inference_batch_size == 0 {
            bail!("signal.inference_batch_size must be > 0");
        }
        if signal.buy_threshold < 0.0 || signal.sell_threshold < 0.0 {
            bail!("signal thresholds must be >= 0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_reference_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.features.window_length, 60);
        assert_eq!(config.features.scaler_fit, ScalerFit::All);
        assert_eq!(config.model.model_dim, 64);
        assert_eq!(config.model.num_heads, 8);
        assert_eq!(config.model.num_layers, 4);
        assert_eq!(config.training.epochs, 1);
        assert_eq!(config.training.batch_size, 256);
        assert!((config.training.learning_rate - 0.001).abs() < f64::EPSILON);
        assert!((config.signal.buy_threshold - 0.005).abs() < f64::EPSILON);
        assert_eq!(config.signal.inference_batch_size, 512);
    }

    #[test]
    fn rejects_heads_not_dividing_model_dim() {
        let err = Config::from_toml_str("[model]\nmodel_dim = 30\nnum_heads = 8\n").unwrap_err();
        assert!(format!("{:#}", err).contains("divisible"));
    }
}
