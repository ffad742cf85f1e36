/// Simple Moving Average using a ring buffer for O(1) push.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    buffer: Vec<f64>,
    head: usize,
    count: usize,
    sum: f64,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "SMA period must be > 0");
        Self {
            period,
            buffer: vec![0.0; period],
            head: 0,
            count: 0,
            sum: 0.0,
        }
    }

    /// Push a new value, return the current SMA if enough data.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        if self.count >= self.period {
            self.sum -= self.buffer[self.head];
        }
        self.buffer[self.head] = value;
        self.sum += value;
        self.head = (self.head + 1) % self.period;
        if self.count < self.period {
            self.count += 1;
        }
        self.value()
    }

    pub fn value(&self) -> Option<f64> {
        if self.count >= self.period {
            Some(self.sum / self.period as f64)
        } else {
            None
        }
    }

    /// Forget all pushed values; the next `period` pushes warm up again.
    pub fn reset(&mut self) {
        self.buffer.iter_mut().for_each(|v| *v = 0.0);
        self.head = 0;
        self.count = 0;
        self.sum = 0.0;
    }

    pub fn is_ready(&self) -> bool {
        self.count >= self.period
    }
}

/// Rolling mean over a series with gaps. A window containing any `None`
/// (or non-finite value) yields `None`.
pub fn sma_series(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut sma = Sma::new(period);
    values
        .iter()
        .map(|v| match v {
            Some(x) if x.is_finite() => sma.push(*x),
            _ => {
                sma.reset();
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_sma() {
        let mut sma = Sma::new(3);
        assert_eq!(sma.push(1.0), None);
        assert_eq!(sma.push(2.0), None);
        assert!(!sma.is_ready());

        let v = sma.push(3.0).unwrap();
        assert!((v - 2.0).abs() < f64::EPSILON);

        let v = sma.push(4.0).unwrap();
        assert!((v - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ring_buffer_wraps_correctly() {
        let mut sma = Sma::new(3);
        sma.push(10.0);
        sma.push(20.0);
        sma.push(30.0);
        let v = sma.push(40.0).unwrap(); // [40, 20, 30] -> avg = 30
        assert!((v - 30.0).abs() < f64::EPSILON);

        let v = sma.push(50.0).unwrap(); // [40, 50, 30] -> avg = 40
        assert!((v - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn reset_restarts_warmup() {
        let mut sma = Sma::new(2);
        sma.push(1.0);
        sma.push(3.0);
        assert!(sma.is_ready());
        sma.reset();
        assert!(!sma.is_ready());
        assert_eq!(sma.push(5.0), None);
        assert!((sma.push(7.0).unwrap() - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn series_gap_invalidates_window() {
        let input = [Some(1.0), Some(2.0), None, Some(4.0), Some(6.0), Some(8.0)];
        let out = sma_series(&input, 2);
        assert_eq!(out.len(), input.len());
        assert_eq!(out[0], None);
        assert!((out[1].unwrap() - 1.5).abs() < f64::EPSILON);
        assert_eq!(out[2], None);
        assert_eq!(out[3], None);
        assert!((out[4].unwrap() - 5.0).abs() < f64::EPSILON);
        assert!((out[5].unwrap() - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    #[should_panic(expected = "SMA period must be > 0")]
    fn zero_period_panics() {
        Sma::new(0);
    }
}
