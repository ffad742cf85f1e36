use burn::{
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info};

use super::{targets_to_tensor, windows_to_tensor, BurnForecaster, Forecaster, SequenceForecaster};
use crate::config::TrainingConfig;
use crate::dataset::WindowDataset;
use crate::error::{PipelineError, Result};

#[derive(Debug, Clone, Serialize)]
pub struct EpochStats {
    pub epoch: usize,
    pub train_loss: f64,
    pub validation_loss: Option<f64>,
    pub batches: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TrainingReport {
    pub train_windows: usize,
    pub validation_windows: usize,
    pub epochs: Vec<EpochStats>,
}

impl TrainingReport {
    pub fn final_train_loss(&self) -> Option<f64> {
        self.epochs.last().map(|e| e.train_loss)
    }
}

/// Minimize MSE between predicted and realized next-step close with Adam
/// over shuffled mini-batches of `train_idx` windows.
///
/// There is no early stopping or checkpointing; every epoch runs.
pub fn train<B: AutodiffBackend>(
    model: SequenceForecaster<B>,
    dataset: &WindowDataset,
    train_idx: &[usize],
    val_idx: &[usize],
    cfg: &TrainingConfig,
    device: &B::Device,
) -> Result<(SequenceForecaster<B>, TrainingReport)> {
    if train_idx.is_empty() {
        return Err(PipelineError::InsufficientData {
            needed: dataset.window_length() + 1,
            available: dataset.features().len(),
        });
    }
    info!(
        epochs = cfg.epochs,
        batch_size = cfg.batch_size,
        learning_rate = cfg.learning_rate,
        train_windows = train_idx.len(),
        validation_windows = val_idx.len(),
        "Starting training"
    );

    let mut model = model;
    let mut optimizer = AdamConfig::new().init();
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let mut order = train_idx.to_vec();
    let mut report = TrainingReport {
        train_windows: train_idx.len(),
        validation_windows: val_idx.len(),
        epochs: Vec::with_capacity(cfg.epochs),
    };

    for epoch in 0..cfg.epochs {
        order.shuffle(&mut rng);
        let mut loss_sum = 0.0;
        let mut batches = 0;

        for chunk in order.chunks(cfg.batch_size) {
            let samples = dataset.samples(chunk)?;
            let features = windows_to_tensor::<B>(&samples, device)?;
            let targets = targets_to_tensor::<B>(&samples, device);

            let predictions = model.forward(features);
            let loss = (predictions - targets).powf_scalar(2.0).mean();
            let loss_value = loss.clone().into_scalar().elem::<f64>();

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optimizer.step(cfg.learning_rate, model, grads);

            loss_sum += loss_value * chunk.len() as f64;
            batches += 1;
            debug!(epoch = epoch + 1, batch = batches, loss = loss_value, "Batch done");
        }

        let train_loss = loss_sum / order.len() as f64;
        let validation_loss = if val_idx.is_empty() {
            None
        } else {
            let forecaster = BurnForecaster::new(model.valid(), device.clone());
            Some(mean_squared_error(&forecaster, dataset, val_idx, cfg.batch_size)?)
        };

        info!(
            epoch = epoch + 1,
            epochs = cfg.epochs,
            train_loss,
            validation_loss = ?validation_loss,
            "Epoch finished"
        );
        report.epochs.push(EpochStats {
            epoch: epoch + 1,
            train_loss,
            validation_loss,
            batches,
        });
    }

    Ok((model, report))
}

/// MSE of `forecaster` over the given windows, evaluated in batches.
pub fn mean_squared_error<F: Forecaster + ?Sized>(
    forecaster: &F,
    dataset: &WindowDataset,
    indices: &[usize],
    batch_size: usize,
) -> Result<f64> {
    if indices.is_empty() {
        return Ok(0.0);
    }
    let mut sum = 0.0;
    for chunk in indices.chunks(batch_size.max(1)) {
        let samples = dataset.samples(chunk)?;
        let predictions = forecaster.predict(&samples)?;
        sum += predictions
            .iter()
            .zip(&samples)
            .map(|(p, s)| (p - s.target).powi(2))
            .sum::<f64>();
    }
    Ok(sum / indices.len() as f64)
}
