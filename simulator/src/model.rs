use rand::Rng;
use rand_chacha::ChaCha8Rng;
use sql_rowpool::impl_record;

use crate::args::SimConfig;

pub(crate) const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS sim_row (\
     id INTEGER PRIMARY KEY AUTOINCREMENT, \
     task INTEGER NOT NULL, \
     label TEXT NOT NULL, \
     hits INTEGER NOT NULL DEFAULT 0, \
     weight REAL NOT NULL DEFAULT 0.5)";

/// One row as the simulator reads it back.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct SimRow {
    pub(crate) id: i64,
    pub(crate) task: u32,
    pub(crate) label: String,
    pub(crate) hits: u64,
}
impl_record!(SimRow { id, task, label, hits });

/// Maps the REAL `weight` column onto a float field, which mapping must reject.
#[derive(Debug, Default)]
pub(crate) struct WeightedRow {
    pub(crate) id: i64,
    pub(crate) weight: f64,
}
impl_record!(WeightedRow { id, weight });

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    Insert,
    UpdateOne,
    SelectMany,
    SelectOne,
    SelectInt,
    BadQuery,
    BadMapping,
    Hold(u64),
}

impl Op {
    pub(crate) fn expects_error(self) -> bool {
        matches!(self, Op::BadQuery | Op::BadMapping)
    }
}

/// Pick the next operation for a task that owns `owned_rows` rows.
pub(crate) fn next_op(owned_rows: usize, config: &SimConfig, rng: &mut ChaCha8Rng) -> Op {
    if rng.random::<f64>() < config.hold_rate {
        return Op::Hold(rng.random_range(1..=20));
    }
    if rng.random::<f64>() < config.error_rate {
        return if rng.random_bool(0.5) {
            Op::BadQuery
        } else {
            Op::BadMapping
        };
    }
    if owned_rows == 0 {
        return Op::Insert;
    }

    let weights = [
        (Op::Insert, 0.30),
        (Op::UpdateOne, 0.20),
        (Op::SelectMany, 0.15),
        (Op::SelectOne, 0.25),
        (Op::SelectInt, 0.10),
    ];
    choose_weighted(&weights, rng)
}

fn choose_weighted(items: &[(Op, f64)], rng: &mut ChaCha8Rng) -> Op {
    let total: f64 = items.iter().map(|(_, weight)| weight.max(0.0)).sum();
    if total <= f64::EPSILON {
        return items.first().map_or(Op::Hold(1), |(op, _)| *op);
    }
    let mut target = rng.random::<f64>() * total;
    for (op, weight) in items {
        let w = weight.max(0.0);
        if target <= w {
            return *op;
        }
        target -= w;
    }
    items.last().map_or(Op::Hold(1), |(op, _)| *op)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn same_seed_same_ops() {
        let config = crate::args::SimConfig::from_args(clap::Parser::parse_from([
            "simulator",
            "--seed",
            "1",
        ]));
        let run = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..50).map(|i| next_op(i % 3, &config, &mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(run(7), run(7));
    }

    #[test]
    fn empty_task_starts_with_insert() {
        let config = crate::args::SimConfig::from_args(clap::Parser::parse_from([
            "simulator",
            "--error-rate",
            "0",
            "--hold-rate",
            "0",
        ]));
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(next_op(0, &config, &mut rng), Op::Insert);
    }
}
