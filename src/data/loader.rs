use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{PipelineError, Result};
use crate::model::tick::{scale_price, Gap, Tick, TickTape};

/// One CSV row as it appears in the raw feed. Extra columns are ignored.
#[derive(Debug, Clone, Deserialize)]
struct RawTick {
    price: f64,
    size: f64,
    #[serde(default)]
    bid_px_00: Option<f64>,
    #[serde(default)]
    ask_px_00: Option<f64>,
    #[serde(default)]
    ts_event: Option<String>,
}

/// Load ticks from a CSV file with `price,size,bid_px_00,ask_px_00` columns.
pub fn load_ticks<P: AsRef<Path>>(path: P) -> Result<TickTape> {
    let file = File::open(path.as_ref()).map_err(|e| {
        PipelineError::Data(format!(
            "failed to open {}: {}",
            path.as_ref().display(),
            e
        ))
    })?;
    read_ticks(file)
}

/// Read ticks from any CSV source, keeping arrival order. Rows whose trade
/// price is undefined become gaps so the source row count is preserved.
pub fn read_ticks<R: Read>(reader: R) -> Result<TickTape> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut tape = TickTape::default();

    for (row, result) in reader.deserialize::<RawTick>().enumerate() {
        let raw = result?;
        let ts_event = match raw.ts_event.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => Some(parse_ts_event(s).ok_or_else(|| {
                PipelineError::Data(format!("row {}: unparseable ts_event '{}'", row, s))
            })?),
            _ => None,
        };
        let Some(price) = scale_price(raw.price) else {
            tape.gaps.push(Gap { row, ts_event });
            continue;
        };
        tape.ticks.push(Tick {
            price,
            size: raw.size,
            bid: raw.bid_px_00.and_then(scale_price),
            ask: raw.ask_px_00.and_then(scale_price),
            ts_event,
        });
    }

    if !tape.gaps.is_empty() {
        tracing::warn!(skipped = tape.gaps.len(), "Ticks with undefined price kept as gaps");
    }
    tracing::debug!(count = tape.ticks.len(), rows = tape.rows(), "Read ticks");
    Ok(tape)
}

/// Integer nanoseconds since the epoch, or an RFC 3339 timestamp.
fn parse_ts_event(s: &str) -> Option<DateTime<Utc>> {
    if s.bytes().all(|b| b.is_ascii_digit()) {
        let nanos: i64 = s.parse().ok()?;
        let secs = nanos.div_euclid(1_000_000_000);
        let sub = nanos.rem_euclid(1_000_000_000) as u32;
        return DateTime::from_timestamp(secs, sub);
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nanos_and_rfc3339() {
        let a = parse_ts_event("1700000000123456789").unwrap();
        assert_eq!(a.timestamp(), 1_700_000_000);
        assert_eq!(a.timestamp_subsec_nanos(), 123_456_789);

        let b = parse_ts_event("2024-03-01T14:30:00.5Z").unwrap();
        assert_eq!(b.timestamp_subsec_millis(), 500);

        assert!(parse_ts_event("yesterday").is_none());
    }

    #[test]
    fn reads_fixed_point_rows_and_ignores_extra_columns() {
        let csv = "\
ts_event,symbol,price,size,bid_px_00,ask_px_00
1700000000000000000,ES,100500000000,3,100250000000,100750000000
,ES,101000000000,1,,101250000000
";
        let ticks = read_ticks(csv.as_bytes()).unwrap().ticks;
        assert_eq!(ticks.len(), 2);
        assert!((ticks[0].price - 100.5).abs() < 1e-12);
        assert!((ticks[0].size - 3.0).abs() < f64::EPSILON);
        assert!((ticks[0].bid.unwrap() - 100.25).abs() < 1e-12);
        assert!(ticks[0].ts_event.is_some());
        assert_eq!(ticks[1].bid, None);
        assert!(ticks[1].ts_event.is_none());
    }

    #[test]
    fn undefined_trade_price_becomes_gap() {
        let csv = format!(
            "price,size,bid_px_00,ask_px_00\n{},1,1,1\n2000000000,1,1000000000,3000000000\n",
            i64::MAX
        );
        let tape = read_ticks(csv.as_bytes()).unwrap();
        assert_eq!(tape.ticks.len(), 1);
        assert!((tape.ticks[0].price - 2.0).abs() < 1e-12);
        assert_eq!(tape.gaps, vec![Gap { row: 0, ts_event: None }]);
        assert_eq!(tape.rows(), 2);
    }
}
