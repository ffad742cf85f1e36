//! Ticks -> indicators -> normalized windows -> forecaster -> aligned signals.

use std::fs::File;
use std::path::Path;

use burn::module::AutodiffModule;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::{Config, ScalerFit, SignalConfig};
use crate::dataset::{train_window_count, WindowDataset};
use crate::error::{PipelineError, Result};
use crate::features::{FeatureFrame, NormalizedFeatures, FEATURE_COUNT};
use crate::forecaster::{
    train, BurnForecaster, Forecaster, InferenceBackend, SequenceForecaster, TrainBackend,
    TrainingReport,
};
use crate::indicator::IndicatorFrame;
use crate::model::candle::OhlcvSeries;
use crate::model::tick::{Tick, TickTape};
use crate::signal::{SignalGenerator, SignalStats, SignalTable};

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub input_rows: usize,
    pub input_ticks: usize,
    pub gap_rows: usize,
    pub complete_rows: usize,
    pub windows: usize,
    pub window_length: usize,
    pub scaler_fit: ScalerFit,
    pub training: TrainingReport,
    pub signals: SignalStats,
}

impl RunReport {
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path.as_ref())?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub table: SignalTable,
    pub report: RunReport,
}

/// Indicators, warm-up removal, scaling and windowing.
pub fn build_dataset(ticks: &[Tick], cfg: &Config) -> Result<WindowDataset> {
    let window_length = cfg.features.window_length;
    let frame = IndicatorFrame::compute(OhlcvSeries::from_ticks(ticks), &cfg.indicators);
    let features = FeatureFrame::from_indicators(&frame);
    info!(
        ticks = ticks.len(),
        complete_rows = features.len(),
        dropped = ticks.len() - features.len(),
        "Computed indicators"
    );

    if features.len() <= window_length {
        return Err(PipelineError::InsufficientData {
            needed: window_length + 1,
            available: features.len(),
        });
    }

    let windows = features.len() - window_length;
    let train_rows =
        train_window_count(windows, cfg.training.validation_fraction) + window_length;
    match cfg.features.scaler_fit {
        ScalerFit::All => warn!(
            rows = features.len(),
            "Scaler fitted on the full series; features see future ranges"
        ),
        ScalerFit::Train => info!(rows = train_rows, "Scaler fitted on the training prefix"),
    }

    let normalized =
        NormalizedFeatures::fit_transform(&features, cfg.features.scaler_fit, train_rows)?;
    Ok(WindowDataset::new(normalized, window_length))
}

/// Build and train a fresh transformer forecaster on `dataset`.
pub fn train_forecaster(
    dataset: &WindowDataset,
    cfg: &Config,
) -> Result<(BurnForecaster<InferenceBackend>, TrainingReport)> {
    let device = Default::default();
    let model = SequenceForecaster::<TrainBackend>::new(&cfg.model, FEATURE_COUNT, &device);
    let (train_idx, val_idx) = dataset.split(cfg.training.validation_fraction);
    let (model, report) = train(model, dataset, &train_idx, &val_idx, &cfg.training, &device)?;
    Ok((BurnForecaster::new(model.valid(), device), report))
}

/// Score every window and align the decisions with the source rows.
pub fn generate_signals<F: Forecaster + ?Sized>(
    tape: &TickTape,
    dataset: &WindowDataset,
    forecaster: &F,
    cfg: &SignalConfig,
) -> Result<(SignalTable, SignalStats)> {
    let points = SignalGenerator::from_config(cfg).generate(forecaster, dataset)?;
    let stats = SignalStats::from_points(&points);
    if stats.undefined > 0 {
        warn!(count = stats.undefined, "Windows with an undefined prediction ratio");
    }
    info!(
        buy = stats.buy,
        sell = stats.sell,
        hold = stats.hold,
        "Generated signals"
    );
    let table = SignalTable::align(tape, &points)?;
    Ok((table, stats))
}

/// Full run: train a forecaster on the ticks, then score them.
///
/// Too few complete rows for a single window is not fatal: every row is
/// reported as HOLD without a prediction.
pub fn run(tape: &TickTape, cfg: &Config) -> Result<PipelineOutput> {
    let Some(dataset) = prepare(tape, cfg)? else {
        return unscored(tape, cfg);
    };
    let (forecaster, training) = train_forecaster(&dataset, cfg)?;
    finish(tape, &dataset, &forecaster, training, cfg)
}

/// Score the ticks with an already trained forecaster.
pub fn run_with_forecaster<F: Forecaster + ?Sized>(
    tape: &TickTape,
    cfg: &Config,
    forecaster: &F,
) -> Result<PipelineOutput> {
    let Some(dataset) = prepare(tape, cfg)? else {
        return unscored(tape, cfg);
    };
    finish(tape, &dataset, forecaster, TrainingReport::default(), cfg)
}

fn prepare(tape: &TickTape, cfg: &Config) -> Result<Option<WindowDataset>> {
    match build_dataset(&tape.ticks, cfg) {
        Ok(dataset) => Ok(Some(dataset)),
        Err(PipelineError::InsufficientData { needed, available }) => {
            warn!(needed, available, "Too few complete rows for a window; all rows HOLD");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn unscored(tape: &TickTape, cfg: &Config) -> Result<PipelineOutput> {
    let frame = IndicatorFrame::compute(OhlcvSeries::from_ticks(&tape.ticks), &cfg.indicators);
    let report = RunReport {
        input_rows: tape.rows(),
        input_ticks: tape.ticks.len(),
        gap_rows: tape.gaps.len(),
        complete_rows: FeatureFrame::from_indicators(&frame).len(),
        windows: 0,
        window_length: cfg.features.window_length,
        scaler_fit: cfg.features.scaler_fit,
        training: TrainingReport::default(),
        signals: SignalStats::default(),
    };
    Ok(PipelineOutput {
        table: SignalTable::align(tape, &[])?,
        report,
    })
}

fn finish<F: Forecaster + ?Sized>(
    tape: &TickTape,
    dataset: &WindowDataset,
    forecaster: &F,
    training: TrainingReport,
    cfg: &Config,
) -> Result<PipelineOutput> {
    let (table, signals) = generate_signals(tape, dataset, forecaster, &cfg.signal)?;
    let report = RunReport {
        input_rows: tape.rows(),
        input_ticks: tape.ticks.len(),
        gap_rows: tape.gaps.len(),
        complete_rows: dataset.features().len(),
        windows: dataset.len(),
        window_length: dataset.window_length(),
        scaler_fit: cfg.features.scaler_fit,
        training,
        signals,
    };
    Ok(PipelineOutput { table, report })
}
