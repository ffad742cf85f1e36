use super::rolling::RollingWindow;

#[derive(Debug, Clone, Default)]
pub struct BollingerSeries {
    pub middle: Vec<Option<f64>>,
    pub upper: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Rolling mean of close with bands at `k` sample standard deviations.
pub fn bollinger(close: &[f64], period: usize, k: f64) -> BollingerSeries {
    let mut window = RollingWindow::new(period);
    let mut out = BollingerSeries {
        middle: Vec::with_capacity(close.len()),
        upper: Vec::with_capacity(close.len()),
        lower: Vec::with_capacity(close.len()),
    };
    for &c in close {
        window.push(c);
        match (window.mean(), window.std()) {
            (Some(mean), Some(std)) => {
                out.middle.push(Some(mean));
                out.upper.push(Some(mean + k * std));
                out.lower.push(Some(mean - k * std));
            }
            _ => {
                out.middle.push(None);
                out.upper.push(None);
                out.lower.push(None);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_bracket_the_mean() {
        let close: Vec<f64> = (0..50)
            .map(|i| 100.0 + ((i * 7) % 11) as f64 - 5.0)
            .collect();
        let out = bollinger(&close, 20, 2.0);
        assert!(out.middle[..19].iter().all(Option::is_none));
        for i in 19..close.len() {
            let (u, m, l) = (
                out.upper[i].unwrap(),
                out.middle[i].unwrap(),
                out.lower[i].unwrap(),
            );
            assert!(u >= m && m >= l);
        }
    }

    #[test]
    fn flat_series_collapses_bands() {
        let out = bollinger(&[3.0; 5], 3, 2.0);
        assert!((out.upper[4].unwrap() - 3.0).abs() < 1e-12);
        assert!((out.lower[4].unwrap() - 3.0).abs() < 1e-12);
    }
}
