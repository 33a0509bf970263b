#![allow(clippy::cast_possible_wrap)]

//! Criterion benchmark for contended pool checkout: a batch of workers larger than the pool
//! either just borrows and returns a connection, or runs a single-row `select_one` lookup.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use sql_rowpool::prelude::*;
use std::hint::black_box;
use std::sync::LazyLock;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tokio::runtime::Runtime;
use tokio::task::JoinSet;

const SELECT_BY_ID: &str = "SELECT id, name, rank FROM item WHERE id = ?1";

#[derive(Debug, Default)]
#[allow(dead_code)]
struct Item {
    id: i64,
    name: String,
    rank: u32,
}
impl_record!(Item { id, name, rank });

struct Dataset {
    _dir: TempDir,
    pool: RowPool<SqliteDriver>,
    ids: Vec<i64>,
}

static TOKIO_RUNTIME: LazyLock<Runtime> =
    LazyLock::new(|| Runtime::new().expect("create tokio runtime"));

static DATASET: LazyLock<Dataset> = LazyLock::new(|| {
    TOKIO_RUNTIME
        .block_on(prepare_dataset(row_count_to_run(), pool_size_to_run()))
        .expect("prepare benchmark dataset")
});

fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn row_count_to_run() -> usize {
    env_usize("BENCH_ROWS", 512).max(1)
}

fn pool_size_to_run() -> usize {
    env_usize("BENCH_POOL_SIZE", 4).max(1)
}

fn concurrency_to_run() -> usize {
    env_usize("BENCH_CONCURRENCY", 16).max(1)
}

async fn prepare_dataset(rows: usize, pool_size: usize) -> Result<Dataset, RowPoolError> {
    let dir = tempfile::tempdir().map_err(|e| RowPoolError::Config(e.to_string()))?;
    let path = dir.path().join("bench.db").to_string_lossy().into_owned();
    let pool = RowPool::new_sqlite(vec![path; pool_size]).await?;

    pool.exec(
        "CREATE TABLE item (id INTEGER PRIMARY KEY, name TEXT NOT NULL, rank INTEGER NOT NULL)",
        &[],
    )
    .await?;
    for id in 1..=rows as i64 {
        pool.insert_ignore_id(
            "INSERT INTO item (id, name, rank) VALUES (?1, ?2, ?3)",
            &[id.into(), format!("item-{id}").into(), (id % 100).into()],
        )
        .await?;
    }

    let mut ids: Vec<i64> = (1..=rows as i64).collect();
    ids.shuffle(&mut ChaCha8Rng::seed_from_u64(9_876_543_210));
    Ok(Dataset { _dir: dir, pool, ids })
}

async fn parallel_checkout(pool: &RowPool<SqliteDriver>, workers: usize) {
    let mut join_set = JoinSet::new();
    for _ in 0..workers {
        let pool = pool.clone();
        join_set.spawn(async move {
            let conn = pool.acquire().await?;
            drop(black_box(conn));
            Ok::<(), RowPoolError>(())
        });
    }
    while let Some(outcome) = join_set.join_next().await {
        outcome
            .expect("checkout worker panicked")
            .expect("checkout");
    }
}

async fn parallel_select_one(pool: &RowPool<SqliteDriver>, ids: &[i64], workers: usize) {
    let per_worker = ids.len().div_ceil(workers).max(1);
    let mut join_set = JoinSet::new();
    for chunk in ids.chunks(per_worker) {
        let pool = pool.clone();
        let chunk = chunk.to_vec();
        join_set.spawn(async move {
            for id in chunk {
                let mut item: Option<Item> = None;
                pool.select_one(&mut item, SELECT_BY_ID, &[id.into()]).await?;
                black_box(item);
            }
            Ok::<(), RowPoolError>(())
        });
    }
    while let Some(outcome) = join_set.join_next().await {
        outcome
            .expect("select worker panicked")
            .expect("select_one");
    }
}

fn bench_pool(c: &mut Criterion) {
    let dataset = &*DATASET;
    let runtime = &*TOKIO_RUNTIME;
    let workers = concurrency_to_run();

    let mut group = c.benchmark_group("rowpool_sqlite");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(5));

    group.bench_function(BenchmarkId::new("checkout", workers), |b| {
        b.to_async(runtime).iter_custom(|iters| async move {
            let mut total = Duration::default();
            for _ in 0..iters {
                let start = Instant::now();
                parallel_checkout(&dataset.pool, workers).await;
                total += start.elapsed();
            }
            total
        });
    });

    group.bench_function(BenchmarkId::new("select_one", workers), |b| {
        b.to_async(runtime).iter_custom(|iters| async move {
            let mut total = Duration::default();
            for _ in 0..iters {
                let start = Instant::now();
                parallel_select_one(&dataset.pool, &dataset.ids, workers).await;
                total += start.elapsed();
            }
            total
        });
    });

    group.finish();
}

criterion_group!(benches, bench_pool);
criterion_main!(benches);
