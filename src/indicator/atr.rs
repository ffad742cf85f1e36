use super::sma::Sma;

/// True range per row. The first row has no previous close and uses high - low.
pub fn true_range(high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
    let mut prev_close: Option<f64> = None;
    high.iter()
        .zip(low)
        .zip(close)
        .map(|((&h, &l), &c)| {
            let hl = h - l;
            let tr = match prev_close {
                Some(pc) => hl.max((h - pc).abs()).max((l - pc).abs()),
                None => hl,
            };
            prev_close = Some(c);
            tr
        })
        .collect()
}

/// Average True Range: simple rolling mean of the true range.
pub fn atr(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut sma = Sma::new(period);
    true_range(high, low, close)
        .into_iter()
        .map(|tr| sma.push(tr))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_up_extends_true_range() {
        let high = [11.0, 15.0];
        let low = [9.0, 14.0];
        let close = [10.0, 14.5];
        let tr = true_range(&high, &low, &close);
        assert!((tr[0] - 2.0).abs() < f64::EPSILON);
        // |15 - 10| dominates 15 - 14
        assert!((tr[1] - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn warmup_length() {
        let n = 30;
        let high: Vec<f64> = (0..n).map(|i| 101.0 + i as f64).collect();
        let low: Vec<f64> = (0..n).map(|i| 99.0 + i as f64).collect();
        let close: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
        let out = atr(&high, &low, &close, 14);
        assert_eq!(out.len(), n);
        assert!(out[..13].iter().all(Option::is_none));
        assert!(out[13..].iter().all(Option::is_some));
    }
}
