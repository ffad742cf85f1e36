use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::generator::SignalPoint;
use crate::error::{PipelineError, Result};
use crate::model::signal::Signal;
use crate::model::tick::TickTape;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalRow {
    pub row: usize,
    pub ts_event: Option<DateTime<Utc>>,
    /// `None` for source rows without a usable trade price.
    pub close: Option<f64>,
    pub prediction: Option<f64>,
    pub signal: Signal,
}

impl SignalRow {
    fn hold(row: usize, ts_event: Option<DateTime<Utc>>, close: Option<f64>) -> Self {
        Self {
            row,
            ts_event,
            close,
            prediction: None,
            signal: Signal::Hold,
        }
    }
}

/// Output aligned one-to-one with the source rows.
#[derive(Debug, Clone, Default)]
pub struct SignalTable {
    pub rows: Vec<SignalRow>,
}

impl SignalTable {
    /// Place each point on its target tick, then interleave the tape's gaps
    /// at their source positions. Rows without a point (warm-up, the first
    /// window, dropped rows, gaps) carry no prediction and HOLD.
    pub fn align(tape: &TickTape, points: &[SignalPoint]) -> Result<Self> {
        let ticks = &tape.ticks;
        let mut tick_rows: Vec<SignalRow> = ticks
            .iter()
            .enumerate()
            .map(|(i, t)| SignalRow::hold(i, t.ts_event, Some(t.price)))
            .collect();

        for p in points {
            let Some(slot) = tick_rows.get_mut(p.target_row) else {
                return Err(PipelineError::Data(format!(
                    "signal for window {} targets row {} beyond {} input rows",
                    p.window,
                    p.target_row,
                    ticks.len()
                )));
            };
            slot.prediction = Some(p.prediction);
            slot.signal = p.signal;
        }

        let total = tape.rows();
        let mut rows = Vec::with_capacity(total);
        let mut tick_rows = tick_rows.into_iter();
        let mut gaps = tape.gaps.iter().peekable();
        for row in 0..total {
            if let Some(gap) = gaps.next_if(|g| g.row == row) {
                rows.push(SignalRow::hold(row, gap.ts_event, None));
            } else if let Some(mut r) = tick_rows.next() {
                r.row = row;
                rows.push(r);
            } else {
                break;
            }
        }
        if let Some(gap) = gaps.next() {
            return Err(PipelineError::Data(format!(
                "gap at row {} is out of order or beyond {} source rows",
                gap.row, total
            )));
        }
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn signals(&self) -> impl Iterator<Item = Signal> + '_ {
        self.rows.iter().map(|r| r.signal)
    }

    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path.as_ref())?;
        let mut writer = csv::Writer::from_writer(file);
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}
