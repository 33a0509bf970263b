mod args;
mod driver;
mod logging;
mod model;
mod oracle;

use clap::Parser;
use tracing::Level;

use crate::args::{Args, SimConfig};
use crate::logging::LogWriter;

fn main() {
    let args = Args::parse();
    let config = SimConfig::from_args(args);
    let writer = LogWriter::new(config.log.clone()).unwrap_or_else(|err| {
        eprintln!("failed to open log file: {err}");
        std::process::exit(1);
    });

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_target(false)
        .with_max_level(Level::INFO)
        .init();

    let config_json = serde_json::to_string_pretty(&config).unwrap_or_else(|_| "{}".to_string());
    tracing::info!("config: {}", config_json);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|err| {
            eprintln!("failed to start tokio runtime: {err}");
            std::process::exit(1);
        });

    match runtime.block_on(driver::run(config.clone())) {
        Ok(summary) => tracing::info!(
            "complete: steps={} rows={} expected_errors={} elapsed={} tasks={} pool_size={} seed={}",
            summary.steps,
            summary.rows,
            summary.expected_errors,
            humantime::format_duration(summary.elapsed),
            config.tasks,
            config.pool_size,
            config.seed
        ),
        Err(_) => {
            eprintln!("simulation failed; rerun with --seed {}", config.seed);
            std::process::exit(1);
        }
    }
}
