use serde::Serialize;

use super::decision::{decide, SignalThresholds};
use crate::config::SignalConfig;
use crate::dataset::WindowDataset;
use crate::error::{PipelineError, Result};
use crate::forecaster::Forecaster;
use crate::model::signal::Signal;

/// Decision for one window, in price units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignalPoint {
    pub window: usize,
    pub target_row: usize,
    pub prediction: f64,
    pub realized: f64,
    pub ratio: Option<f64>,
    pub signal: Signal,
}

#[derive(Debug, Clone, Copy)]
pub struct SignalGenerator {
    thresholds: SignalThresholds,
    batch_size: usize,
}

impl SignalGenerator {
    pub fn new(thresholds: SignalThresholds, batch_size: usize) -> Self {
        Self {
            thresholds,
            batch_size: batch_size.max(1),
        }
    }

    pub fn from_config(cfg: &SignalConfig) -> Self {
        Self::new(SignalThresholds::from(cfg), cfg.inference_batch_size)
    }

    /// Score every window that has a realized target, in batches.
    ///
    /// The result holds exactly `dataset.len()` points, ordered by window.
    /// Rows after the last target are never scored, so the output is shorter
    /// than the feature series by the window length.
    pub fn generate<F: Forecaster + ?Sized>(
        &self,
        forecaster: &F,
        dataset: &WindowDataset,
    ) -> Result<Vec<SignalPoint>> {
        let features = dataset.features();
        let indices: Vec<usize> = (0..dataset.len()).collect();
        let mut points = Vec::with_capacity(indices.len());

        for chunk in indices.chunks(self.batch_size) {
            let samples = dataset.samples(chunk)?;
            let predictions = forecaster.predict(&samples)?;
            if predictions.len() != samples.len() {
                return Err(PipelineError::Tensor(format!(
                    "forecaster returned {} predictions for {} windows",
                    predictions.len(),
                    samples.len()
                )));
            }
            for (sample, predicted) in samples.iter().zip(predictions) {
                let prediction = features.close_to_price(predicted);
                let realized = features.close_to_price(sample.target);
                let decision = decide(prediction, realized, self.thresholds);
                points.push(SignalPoint {
                    window: sample.start,
                    target_row: dataset.target_row(sample.start)?,
                    prediction,
                    realized,
                    ratio: decision.ratio,
                    signal: decision.signal,
                });
            }
        }
        Ok(points)
    }
}
