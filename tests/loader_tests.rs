use std::io::Write;

use tick_signal_forecaster::data::{load_ticks, read_ticks};
use tick_signal_forecaster::error::PipelineError;
use tick_signal_forecaster::model::candle::OhlcvSeries;
use tick_signal_forecaster::model::signal::Signal;
use tick_signal_forecaster::signal::SignalTable;

#[test]
fn load_from_file_keeps_order() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "ts_event,price,size,bid_px_00,ask_px_00").unwrap();
    for i in 0..5u64 {
        let px = 100_000_000_000 + i * 250_000_000;
        writeln!(
            file,
            "{},{},{},{},{}",
            1_700_000_000_000_000_000 + i * 1_000,
            px,
            i + 1,
            px - 100_000_000,
            px + 100_000_000
        )
        .unwrap();
    }
    file.flush().unwrap();

    let tape = load_ticks(file.path()).unwrap();
    assert!(tape.gaps.is_empty());
    let ticks = tape.ticks;
    assert_eq!(ticks.len(), 5);
    for (i, t) in ticks.iter().enumerate() {
        assert!((t.price - (100.0 + i as f64 * 0.25)).abs() < 1e-9);
        assert!((t.size - (i + 1) as f64).abs() < f64::EPSILON);
        assert!(t.low() < t.price && t.price < t.high());
    }
    assert!(ticks.windows(2).all(|w| w[0].ts_event < w[1].ts_event));
}

#[test]
fn missing_file_is_a_data_error() {
    let dir = tempfile::tempdir().unwrap();
    match load_ticks(dir.path().join("absent.csv")) {
        Err(PipelineError::Data(msg)) => assert!(msg.contains("absent.csv")),
        other => panic!("expected data error, got {:?}", other.map(|t| t.rows())),
    }
}

#[test]
fn missing_required_column_fails() {
    let csv = "price,bid_px_00,ask_px_00\n1000000000,1,1\n";
    assert!(matches!(read_ticks(csv.as_bytes()), Err(PipelineError::Csv(_))));
}

#[test]
fn bad_timestamp_fails() {
    let csv = "ts_event,price,size\nnot-a-time,1000000000,1\n";
    assert!(matches!(read_ticks(csv.as_bytes()), Err(PipelineError::Data(_))));
}

#[test]
fn ticks_become_ohlcv_rows() {
    let csv = "\
price,size,bid_px_00,ask_px_00
100000000000,2,99000000000,101000000000
102000000000,3,101000000000,103000000000
";
    let ticks = read_ticks(csv.as_bytes()).unwrap().ticks;
    let series = OhlcvSeries::from_ticks(&ticks);
    assert_eq!(series.len(), 2);
    assert!((series.open[1] - 100.0).abs() < 1e-9);
    assert!((series.close[1] - 102.0).abs() < 1e-9);
    assert!((series.high[1] - 103.0).abs() < 1e-9);
    assert!((series.low[1] - 101.0).abs() < 1e-9);
    assert!((series.volume[1] - 3.0).abs() < f64::EPSILON);
}

#[test]
fn undefined_price_row_stays_in_output_position() {
    let csv = format!(
        "ts_event,price,size,bid_px_00,ask_px_00\n\
         1,100000000000,1,99000000000,101000000000\n\
         2,{},1,99000000000,101000000000\n\
         3,101000000000,1,100000000000,102000000000\n",
        i64::MAX
    );
    let tape = read_ticks(csv.as_bytes()).unwrap();
    assert_eq!(tape.ticks.len(), 2);
    assert_eq!(tape.gaps.len(), 1);
    assert_eq!(tape.gaps[0].row, 1);
    assert!(tape.gaps[0].ts_event.is_some());

    let table = SignalTable::align(&tape, &[]).unwrap();
    assert_eq!(table.len(), 3);
    let closes: Vec<Option<f64>> = table.rows.iter().map(|r| r.close).collect();
    assert_eq!(closes, vec![Some(100.0), None, Some(101.0)]);
    assert_eq!(table.rows[1].signal, Signal::Hold);
    assert!(table.rows[1].prediction.is_none());
    assert_eq!(table.rows[2].row, 2);
}
