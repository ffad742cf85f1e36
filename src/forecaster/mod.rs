pub mod model;
pub mod trainer;

pub use model::SequenceForecaster;
pub use trainer::{train, EpochStats, TrainingReport};

use burn::backend::{Autodiff, NdArray};
use burn::prelude::*;

use crate::dataset::WindowSample;
use crate::error::{PipelineError, Result};

pub type InferenceBackend = NdArray;
pub type TrainBackend = Autodiff<InferenceBackend>;

/// Anything that turns lookback windows into one normalized close forecast each.
pub trait Forecaster {
    fn predict(&self, windows: &[WindowSample<'_>]) -> Result<Vec<f64>>;
}

/// A trained [`SequenceForecaster`] on a backend without gradient tracking.
#[derive(Debug)]
pub struct BurnForecaster<B: Backend> {
    model: SequenceForecaster<B>,
    device: B::Device,
}

impl<B: Backend> BurnForecaster<B> {
    pub fn new(model: SequenceForecaster<B>, device: B::Device) -> Self {
        Self { model, device }
    }
}

impl<B: Backend> Forecaster for BurnForecaster<B> {
    fn predict(&self, windows: &[WindowSample<'_>]) -> Result<Vec<f64>> {
        if windows.is_empty() {
            return Ok(Vec::new());
        }
        let input = windows_to_tensor::<B>(windows, &self.device)?;
        let output = self.model.forward(input);
        tensor_to_vec(output)
    }
}

/// Stack windows into a [batch, time, features] tensor.
pub fn windows_to_tensor<B: Backend>(
    windows: &[WindowSample<'_>],
    device: &B::Device,
) -> Result<Tensor<B, 3>> {
    let Some(first) = windows.first() else {
        return Err(PipelineError::Tensor("no windows to stack".to_string()));
    };
    let time = first.rows.len();
    let features = first.rows.first().map(|r| r.len()).unwrap_or(0);

    let mut buf: Vec<f32> = Vec::with_capacity(windows.len() * time * features);
    for w in windows {
        if w.rows.len() != time {
            return Err(PipelineError::Tensor(format!(
                "window {} has {} rows, expected {}",
                w.start,
                w.rows.len(),
                time
            )));
        }
        buf.extend(w.rows.iter().flatten().map(|v| *v as f32));
    }
    Ok(Tensor::from_data(
        TensorData::new(buf, [windows.len(), time, features]),
        device,
    ))
}

pub fn targets_to_tensor<B: Backend>(
    windows: &[WindowSample<'_>],
    device: &B::Device,
) -> Tensor<B, 1> {
    let targets: Vec<f32> = windows.iter().map(|w| w.target as f32).collect();
    let n = targets.len();
    Tensor::from_data(TensorData::new(targets, [n]), device)
}

fn tensor_to_vec<B: Backend>(tensor: Tensor<B, 1>) -> Result<Vec<f64>> {
    let values: Vec<f32> = tensor
        .into_data()
        .to_vec()
        .map_err(|e| PipelineError::Tensor(format!("{:?}", e)))?;
    Ok(values.into_iter().map(f64::from).collect())
}
