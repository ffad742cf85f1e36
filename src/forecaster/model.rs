//! Transformer encoder that maps a window of feature vectors to one scalar.

use burn::{
    module::Module,
    nn::{
        transformer::{TransformerEncoder, TransformerEncoderConfig, TransformerEncoderInput},
        Linear, LinearConfig,
    },
    prelude::*,
};

use crate::config::ModelConfig;

/// Projection -> encoder stack -> mean over time -> linear head.
#[derive(Module, Debug)]
pub struct SequenceForecaster<B: Backend> {
    input_projection: Linear<B>,
    encoder: TransformerEncoder<B>,
    head: Linear<B>,
}

impl<B: Backend> SequenceForecaster<B> {
    pub fn new(cfg: &ModelConfig, num_features: usize, device: &B::Device) -> Self {
        B::seed(cfg.seed);
        Self {
            input_projection: LinearConfig::new(num_features, cfg.model_dim).init(device),
            encoder: TransformerEncoderConfig::new(
                cfg.model_dim,
                cfg.feedforward_dim,
                cfg.num_heads,
                cfg.num_layers,
            )
            .with_dropout(cfg.dropout)
            .init(device),
            head: LinearConfig::new(cfg.model_dim, 1).init(device),
        }
    }

    /// `x`: [batch, time, features] -> [batch]
    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 1> {
        let [batch, _, _] = x.dims();
        let x = self.input_projection.forward(x);
        let x = self.encoder.forward(TransformerEncoderInput::new(x));
        let pooled = x.mean_dim(1); // [batch, 1, model_dim]
        self.head.forward(pooled).reshape([batch])
    }

    /// A single window [time, features] is promoted to a batch of one.
    pub fn forward_window(&self, window: Tensor<B, 2>) -> Tensor<B, 1> {
        self.forward(window.unsqueeze::<3>())
    }
}
