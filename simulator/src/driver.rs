use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sql_rowpool::prelude::*;

use crate::args::SimConfig;
use crate::logging::EventLog;
use crate::model::{Op, SCHEMA, SimRow, WeightedRow, next_op};
use crate::oracle::Oracle;

#[derive(Debug)]
pub(crate) struct Summary {
    pub(crate) steps: u64,
    pub(crate) rows: u64,
    pub(crate) expected_errors: u64,
    pub(crate) elapsed: Duration,
}

struct Shared {
    pool: RowPool<SqliteDriver>,
    events: Mutex<EventLog>,
    steps: AtomicU64,
    rows: AtomicU64,
    expected_errors: AtomicU64,
    started: Instant,
    deadline: Option<Duration>,
}

impl Shared {
    fn record(&self, line: String) {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .record(line);
    }

    fn out_of_time(&self) -> bool {
        self.deadline
            .is_some_and(|deadline| self.started.elapsed() >= deadline)
    }
}

/// Rows a task inserted, with the hit count it expects each to have.
#[derive(Default)]
struct TaskRows {
    rows: Vec<(i64, u64)>,
}

/// Run the simulation. On failure the error carries the reason and the event log is dumped.
pub(crate) async fn run(config: SimConfig) -> Result<Summary, String> {
    let temp_dir = tempfile::tempdir().map_err(|e| format!("creating temp dir: {e}"))?;
    let db_path = config
        .db_path
        .clone()
        .unwrap_or_else(|| temp_dir.path().join("simulator.db"));
    let descriptor = db_path.to_string_lossy().into_owned();

    let pool = RowPool::new_sqlite(vec![descriptor; config.pool_size])
        .await
        .map_err(|e| format!("building pool: {e}"))?;
    pool.exec(SCHEMA, &[])
        .await
        .map_err(|e| format!("creating schema: {e}"))?;
    pool.exec("DELETE FROM sim_row", &[])
        .await
        .map_err(|e| format!("clearing table: {e}"))?;

    let shared = Arc::new(Shared {
        pool,
        events: Mutex::new(EventLog::new(config.first_steps, config.tail_steps)),
        steps: AtomicU64::new(0),
        rows: AtomicU64::new(0),
        expected_errors: AtomicU64::new(0),
        started: Instant::now(),
        deadline: config.duration_ms.map(Duration::from_millis),
    });

    let mut handles = Vec::with_capacity(config.tasks);
    for task in 0..config.tasks {
        let shared = Arc::clone(&shared);
        let config = config.clone();
        handles.push(tokio::spawn(async move {
            run_task(task, &shared, &config).await
        }));
    }

    let mut failure = None;
    for handle in handles {
        let outcome = handle
            .await
            .unwrap_or_else(|e| Err(format!("task panicked: {e}")));
        if let Err(reason) = outcome {
            failure.get_or_insert(reason);
        }
    }

    let result = match failure {
        Some(reason) => Err(reason),
        None => check_final(&shared).await,
    };
    if let Err(reason) = &result {
        shared
            .events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .dump_failure(reason);
    }
    result?;

    Ok(Summary {
        steps: shared.steps.load(Ordering::SeqCst),
        rows: shared.rows.load(Ordering::SeqCst),
        expected_errors: shared.expected_errors.load(Ordering::SeqCst),
        elapsed: shared.started.elapsed(),
    })
}

async fn check_final(shared: &Shared) -> Result<(), String> {
    Oracle::check_drained(shared.pool.available(), shared.pool.size())?;
    let count = shared
        .pool
        .select_int("SELECT COUNT(*) FROM sim_row", &[])
        .await
        .map_err(|e| format!("final count: {e}"))?;
    Oracle::check_row_count(shared.rows.load(Ordering::SeqCst), count)
}

async fn run_task(task: usize, shared: &Shared, config: &SimConfig) -> Result<(), String> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed ^ (task as u64).rotate_left(32));
    let mut owned = TaskRows::default();

    for iteration in 0..config.iterations {
        if shared.out_of_time() {
            break;
        }
        let op = next_op(owned.rows.len(), config, &mut rng);
        let outcome = apply(task, op, &mut owned, &shared.pool, &mut rng).await;
        let step = shared.steps.fetch_add(1, Ordering::SeqCst);

        let label = match &outcome {
            Ok(()) => "Ok".to_string(),
            Err(err) => format!("Err({err})"),
        };
        shared.record(format!(
            "step={step} task={task} iter={iteration} op={op:?} available={} result={label}",
            shared.pool.available()
        ));

        match (op.expects_error(), outcome) {
            (false, Ok(())) => {
                if op == Op::Insert {
                    shared.rows.fetch_add(1, Ordering::SeqCst);
                }
            }
            (true, Err(_)) => {
                shared.expected_errors.fetch_add(1, Ordering::SeqCst);
            }
            (true, Ok(())) => return Err(format!("task {task}: {op:?} unexpectedly succeeded")),
            (false, Err(err)) => return Err(format!("task {task}: {op:?} failed: {err}")),
        }

        Oracle::check_slots(shared.pool.available(), shared.pool.size())?;
    }
    Ok(())
}

/// Run one operation. Errors are `String`s so expected and unexpected failures share a path.
async fn apply(
    task: usize,
    op: Op,
    owned: &mut TaskRows,
    pool: &RowPool<SqliteDriver>,
    rng: &mut ChaCha8Rng,
) -> Result<(), String> {
    let task_arg = SqlArg::from(task);
    match op {
        Op::Insert => {
            let label = format!("t{task}-r{}", owned.rows.len());
            let id = pool
                .insert(
                    "INSERT INTO sim_row (task, label) VALUES (?1, ?2)",
                    &[task_arg, label.into()],
                )
                .await
                .map_err(|e| e.to_string())?;
            owned.rows.push((id, 0));
        }
        Op::UpdateOne => {
            let index = pick(owned.rows.len(), rng);
            let (id, hits) = &mut owned.rows[index];
            pool.update_one(
                "UPDATE sim_row SET hits = hits + 1 WHERE id = ?1 AND task = ?2",
                &[(*id).into(), task_arg],
            )
            .await
            .map_err(|e| e.to_string())?;
            *hits += 1;
        }
        Op::SelectOne => {
            let (id, hits) = owned.rows[pick(owned.rows.len(), rng)];
            let mut row: Option<SimRow> = None;
            pool.select_one(
                &mut row,
                "SELECT id, task, label, hits FROM sim_row WHERE id = ?1",
                &[id.into()],
            )
            .await
            .map_err(|e| e.to_string())?;
            let row = row.ok_or("select_one left its output empty")?;
            if row.hits != hits || usize::try_from(row.task).ok() != Some(task) {
                return Err(format!("row {id} read back as {row:?}, expected hits={hits}"));
            }
        }
        Op::SelectMany => {
            let mut rows: Vec<SimRow> = Vec::new();
            pool.select(
                &mut rows,
                "SELECT id, task, label, hits FROM sim_row WHERE task = ?1 ORDER BY id",
                &[task_arg],
            )
            .await
            .map_err(|e| e.to_string())?;
            let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
            let expected: Vec<i64> = owned.rows.iter().map(|(id, _)| *id).collect();
            if ids != expected {
                return Err(format!("task rows {ids:?}, expected {expected:?}"));
            }
        }
        Op::SelectInt => {
            let count = pool
                .select_int("SELECT COUNT(*) FROM sim_row WHERE task = ?1", &[task_arg])
                .await
                .map_err(|e| e.to_string())?;
            if count != i64::try_from(owned.rows.len()).ok() {
                return Err(format!("count {count:?}, expected {}", owned.rows.len()));
            }
        }
        Op::BadQuery => {
            pool.query("SELECT no_such_column FROM sim_row", &[])
                .await
                .map_err(|e| e.to_string())?;
        }
        Op::BadMapping => {
            let mut rows: Vec<WeightedRow> = Vec::new();
            // empty tables map fine, so read a literal row
            pool.select(&mut rows, "SELECT 1 AS id, 0.5 AS weight", &[])
                .await
                .map_err(|e| e.to_string())?;
        }
        Op::Hold(ms) => {
            let conn = pool.acquire().await.map_err(|e| e.to_string())?;
            tokio::time::sleep(Duration::from_millis(ms)).await;
            drop(conn);
        }
    }
    Ok(())
}

fn pick(len: usize, rng: &mut ChaCha8Rng) -> usize {
    use rand::Rng;
    rng.random_range(0..len.max(1))
}
