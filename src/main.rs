use anyhow::{Context, Result};

use tick_signal_forecaster::config::Config;
use tick_signal_forecaster::data::load_ticks;
use tick_signal_forecaster::pipeline;

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        config
            .logging
            .level
            .parse()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    });
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            eprintln!("Set SIGNAL_FORECASTER_CONFIG or create config/default.toml");
            std::process::exit(1);
        }
    };

    init_tracing(&config);
    tracing::info!(
        input = %config.data.input_path.display(),
        window_length = config.features.window_length,
        epochs = config.training.epochs,
        "Starting tick-signal-forecaster"
    );

    let tape = load_ticks(&config.data.input_path)
        .with_context(|| format!("failed to load {}", config.data.input_path.display()))?;
    tracing::info!(
        ticks = tape.ticks.len(),
        gaps = tape.gaps.len(),
        "Loaded ticks"
    );

    let output = pipeline::run(&tape, &config).context("pipeline run failed")?;

    output
        .table
        .write_csv(&config.data.output_path)
        .with_context(|| format!("failed to write {}", config.data.output_path.display()))?;
    output
        .report
        .write_json(&config.data.report_path)
        .with_context(|| format!("failed to write {}", config.data.report_path.display()))?;

    tracing::info!(
        rows = output.table.len(),
        output = %config.data.output_path.display(),
        report = %config.data.report_path.display(),
        "Done"
    );
    Ok(())
}
