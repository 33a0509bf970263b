use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Seeded concurrency simulator for sql-rowpool")]
pub(crate) struct Args {
    #[arg(long, value_parser = humantime::parse_duration)]
    pub(crate) duration: Option<Duration>,
    /// Operations per task.
    #[arg(long)]
    pub(crate) iterations: Option<u64>,
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    #[arg(long, default_value_t = 4)]
    pub(crate) pool_size: usize,
    #[arg(long, default_value_t = 16)]
    pub(crate) tasks: usize,
    /// Share of operations that are expected to fail (bad SQL, bad mapping).
    #[arg(long, default_value_t = 0.05)]
    pub(crate) error_rate: f64,
    /// Share of operations that hold a connection across a sleep.
    #[arg(long, default_value_t = 0.05)]
    pub(crate) hold_rate: f64,
    /// Database file; a temporary one is created when omitted.
    #[arg(long)]
    pub(crate) db_path: Option<PathBuf>,
    #[arg(long)]
    pub(crate) log: Option<PathBuf>,
    #[arg(long)]
    pub(crate) quick: bool,
    #[arg(long)]
    pub(crate) stress: bool,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SimConfig {
    pub(crate) duration_ms: Option<u64>,
    pub(crate) iterations: u64,
    pub(crate) seed: u64,
    pub(crate) pool_size: usize,
    pub(crate) tasks: usize,
    pub(crate) error_rate: f64,
    pub(crate) hold_rate: f64,
    pub(crate) db_path: Option<PathBuf>,
    pub(crate) log: Option<PathBuf>,
    pub(crate) preset: Option<String>,
    pub(crate) first_steps: usize,
    pub(crate) tail_steps: usize,
}

impl SimConfig {
    pub(crate) fn from_args(args: Args) -> Self {
        let mut config = SimConfig {
            duration_ms: args
                .duration
                .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
            iterations: args.iterations.unwrap_or(500),
            seed: args.seed.unwrap_or_else(random_seed),
            pool_size: args.pool_size.max(1),
            tasks: args.tasks.max(1),
            error_rate: clamp_rate(args.error_rate),
            hold_rate: clamp_rate(args.hold_rate),
            db_path: args.db_path,
            log: args.log,
            preset: None,
            first_steps: 30,
            tail_steps: 80,
        };

        if args.quick {
            config.apply_quick();
        }
        if args.stress {
            config.apply_stress();
        }

        config
    }

    fn apply_quick(&mut self) {
        self.preset = Some("quick".to_string());
        self.iterations = 200;
        self.duration_ms = None;
        self.pool_size = 2;
        self.tasks = 4;
        self.error_rate = 0.05;
        self.hold_rate = 0.05;
    }

    fn apply_stress(&mut self) {
        self.preset = Some("stress".to_string());
        self.iterations = 5_000;
        self.duration_ms = None;
        self.pool_size = 8;
        self.tasks = 64;
        self.error_rate = 0.08;
        self.hold_rate = 0.10;
    }
}

fn clamp_rate(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn random_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    now.as_secs() ^ u64::from(now.subsec_nanos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_rate_limits_bounds() {
        assert_eq!(clamp_rate(-1.0), 0.0);
        assert_eq!(clamp_rate(2.0), 1.0);
        assert_eq!(clamp_rate(0.5), 0.5);
        assert_eq!(clamp_rate(f64::NAN), 0.0);
    }

    #[test]
    fn presets_override_flags() {
        let args = Args::parse_from(["simulator", "--tasks", "3", "--stress"]);
        let config = SimConfig::from_args(args);
        assert_eq!(config.tasks, 64);
        assert_eq!(config.preset.as_deref(), Some("stress"));

        let args = Args::parse_from(["simulator", "--pool-size", "0", "--seed", "9"]);
        let config = SimConfig::from_args(args);
        assert_eq!(config.pool_size, 1);
        assert_eq!(config.seed, 9);
    }
}
