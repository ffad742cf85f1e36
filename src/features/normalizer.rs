use crate::error::{PipelineError, Result};

/// Per-column min-max scaler mapping the fitted range onto [0, 1].
///
/// Values outside the fitted range are not clamped. A column with zero
/// range maps every value to `x - min` (0 on the fitted set).
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler {
    min: Vec<f64>,
    max: Vec<f64>,
}

impl MinMaxScaler {
    pub fn fit<const N: usize>(rows: &[[f64; N]]) -> Result<Self> {
        if rows.is_empty() {
            return Err(PipelineError::Data(
                "cannot fit scaler on an empty set".to_string(),
            ));
        }
        let mut min = vec![f64::INFINITY; N];
        let mut max = vec![f64::NEG_INFINITY; N];
        for row in rows {
            for (j, v) in row.iter().enumerate() {
                min[j] = min[j].min(*v);
                max[j] = max[j].max(*v);
            }
        }
        Ok(Self { min, max })
    }

    fn scale(&self, column: usize) -> f64 {
        let range = self.max[column] - self.min[column];
        if range > 0.0 {
            range
        } else {
            1.0
        }
    }

    pub fn transform_value(&self, column: usize, value: f64) -> f64 {
        (value - self.min[column]) / self.scale(column)
    }

    pub fn inverse_transform_value(&self, column: usize, value: f64) -> f64 {
        value * self.scale(column) + self.min[column]
    }

    pub fn transform<const N: usize>(&self, rows: &[[f64; N]]) -> Vec<[f64; N]> {
        rows.iter()
            .map(|row| {
                let mut out = [0.0; N];
                for (j, v) in row.iter().enumerate() {
                    out[j] = self.transform_value(j, *v);
                }
                out
            })
            .collect()
    }

    pub fn fitted_range(&self, column: usize) -> (f64, f64) {
        (self.min[column], self.max[column])
    }
}
