use std::collections::VecDeque;

/// Fixed-length lookback over the most recent values.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    period: usize,
    values: VecDeque<f64>,
}

impl RollingWindow {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "rolling period must be > 0");
        Self {
            period,
            values: VecDeque::with_capacity(period),
        }
    }

    /// Push a value; returns true once the window is full.
    pub fn push(&mut self, value: f64) -> bool {
        self.values.push_back(value);
        while self.values.len() > self.period {
            let _ = self.values.pop_front();
        }
        self.is_ready()
    }

    pub fn is_ready(&self) -> bool {
        self.values.len() >= self.period
    }

    pub fn mean(&self) -> Option<f64> {
        if !self.is_ready() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.period as f64)
    }

    /// Sample standard deviation (n - 1 denominator).
    pub fn std(&self) -> Option<f64> {
        if !self.is_ready() || self.period < 2 {
            return None;
        }
        let mean = self.mean()?;
        let ss: f64 = self.values.iter().map(|v| (v - mean).powi(2)).sum();
        Some((ss / (self.period as f64 - 1.0)).sqrt())
    }

    pub fn min(&self) -> Option<f64> {
        if !self.is_ready() {
            return None;
        }
        Some(self.values.iter().fold(f64::MAX, |acc, v| acc.min(*v)))
    }

    pub fn max(&self) -> Option<f64> {
        if !self.is_ready() {
            return None;
        }
        Some(self.values.iter().fold(f64::MIN, |acc, v| acc.max(*v)))
    }
}

fn rolling_map(
    values: &[f64],
    period: usize,
    f: impl Fn(&RollingWindow) -> Option<f64>,
) -> Vec<Option<f64>> {
    let mut window = RollingWindow::new(period);
    values
        .iter()
        .map(|v| {
            window.push(*v);
            f(&window)
        })
        .collect()
}

pub fn rolling_std(values: &[f64], period: usize) -> Vec<Option<f64>> {
    rolling_map(values, period, RollingWindow::std)
}

pub fn rolling_min(values: &[f64], period: usize) -> Vec<Option<f64>> {
    rolling_map(values, period, RollingWindow::min)
}

pub fn rolling_max(values: &[f64], period: usize) -> Vec<Option<f64>> {
    rolling_map(values, period, RollingWindow::max)
}
