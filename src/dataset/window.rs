use crate::error::{PipelineError, Result};
use crate::features::{FeatureVector, NormalizedFeatures};

/// A lookback window and the normalized close of the row right after it.
#[derive(Debug, Clone, Copy)]
pub struct WindowSample<'a> {
    pub start: usize,
    pub rows: &'a [FeatureVector],
    pub target: f64,
}

/// Fixed-length windows over the complete, normalized feature rows.
///
/// Window `i` covers rows `i..i + window_length`; its target is the close at
/// row `i + window_length`, so only windows with a realized target exist.
#[derive(Debug, Clone)]
pub struct WindowDataset {
    features: NormalizedFeatures,
    window_length: usize,
}

impl WindowDataset {
    pub fn new(features: NormalizedFeatures, window_length: usize) -> Self {
        assert!(window_length > 0, "window_length must be > 0");
        Self {
            features,
            window_length,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len().saturating_sub(self.window_length)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn window_length(&self) -> usize {
        self.window_length
    }

    pub fn features(&self) -> &NormalizedFeatures {
        &self.features
    }

    pub fn sample(&self, i: usize) -> Result<WindowSample<'_>> {
        let len = self.len();
        if i >= len {
            return Err(PipelineError::WindowOutOfBounds { index: i, len });
        }
        let end = i + self.window_length;
        Ok(WindowSample {
            start: i,
            rows: &self.features.values[i..end],
            target: self.features.close(end),
        })
    }

    /// Samples for a set of window indices, in the given order.
    pub fn samples(&self, indices: &[usize]) -> Result<Vec<WindowSample<'_>>> {
        indices.iter().map(|&i| self.sample(i)).collect()
    }

    /// Input row index of window `i`'s target.
    pub fn target_row(&self, i: usize) -> Result<usize> {
        let len = self.len();
        if i >= len {
            return Err(PipelineError::WindowOutOfBounds { index: i, len });
        }
        Ok(self.features.row_index[i + self.window_length])
    }

    /// Chronological split: the last `validation_fraction` of windows are
    /// held out. Returns `(train, validation)` window indices.
    pub fn split(&self, validation_fraction: f64) -> (Vec<usize>, Vec<usize>) {
        let len = self.len();
        let n_train = train_window_count(len, validation_fraction);
        ((0..n_train).collect(), (n_train..len).collect())
    }
}

/// Number of leading windows kept for training out of `windows`.
pub fn train_window_count(windows: usize, validation_fraction: f64) -> usize {
    let n_val = ((windows as f64) * validation_fraction.clamp(0.0, 1.0)).floor() as usize;
    windows - n_val.min(windows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScalerFit;
    use crate::features::{FeatureFrame, FEATURE_COUNT};

    fn dataset(rows: usize, window: usize) -> WindowDataset {
        let frame = FeatureFrame {
            row_index: (0..rows).map(|i| i + 10).collect(),
            values: (0..rows).map(|i| [i as f64; FEATURE_COUNT]).collect(),
        };
        let norm = NormalizedFeatures::fit_transform(&frame, ScalerFit::All, rows).unwrap();
        WindowDataset::new(norm, window)
    }

    #[test]
    fn length_is_rows_minus_window() {
        let ds = dataset(100, 60);
        assert_eq!(ds.len(), 40);
        assert!(dataset(60, 60).is_empty());
        assert!(dataset(10, 60).is_empty());
    }

    #[test]
    fn last_sample_targets_last_row() {
        let ds = dataset(100, 60);
        let last = ds.sample(ds.len() - 1).unwrap();
        assert_eq!(last.start, 39);
        assert_eq!(last.rows.len(), 60);
        assert!((last.target - 1.0).abs() < 1e-12);
        assert_eq!(ds.target_row(ds.len() - 1).unwrap(), 109);
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let ds = dataset(100, 60);
        match ds.sample(40) {
            Err(PipelineError::WindowOutOfBounds { index, len }) => {
                assert_eq!(index, 40);
                assert_eq!(len, 40);
            }
            other => panic!("expected out-of-bounds error, got {:?}", other.map(|s| s.start)),
        }
        assert!(ds.target_row(40).is_err());
    }

    #[test]
    fn split_holds_out_the_tail() {
        let ds = dataset(100, 60);
        let (train, val) = ds.split(0.25);
        assert_eq!(train.len(), 30);
        assert_eq!(val, (30..40).collect::<Vec<_>>());

        let (train, val) = ds.split(0.0);
        assert_eq!(train.len(), 40);
        assert!(val.is_empty());
    }
}
