use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing_subscriber::fmt::writer::MakeWriter;

/// Writes log lines to stdout and, when configured, to a file as well.
#[derive(Clone)]
pub(crate) struct LogWriter {
    file: Option<Arc<Mutex<File>>>,
}

impl LogWriter {
    pub(crate) fn new(path: Option<PathBuf>) -> io::Result<Self> {
        let file = match path {
            Some(path) => Some(Arc::new(Mutex::new(File::create(path)?))),
            None => None,
        };
        Ok(Self { file })
    }
}

pub(crate) struct LogWriterGuard {
    file: Option<Arc<Mutex<File>>>,
}

fn lock_file(file: &Mutex<File>) -> MutexGuard<'_, File> {
    file.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

impl<'a> MakeWriter<'a> for LogWriter {
    type Writer = LogWriterGuard;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriterGuard {
            file: self.file.clone(),
        }
    }
}

impl Write for LogWriterGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        if let Some(file) = &self.file {
            lock_file(file).write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        if let Some(file) = &self.file {
            lock_file(file).flush()?;
        }
        Ok(())
    }
}

/// Keeps the first and the most recent step lines so a failure can be replayed from the log.
pub(crate) struct EventLog {
    first: Vec<String>,
    tail: VecDeque<String>,
    first_cap: usize,
    tail_cap: usize,
    dropped: u64,
}

impl EventLog {
    pub(crate) fn new(first_cap: usize, tail_cap: usize) -> Self {
        Self {
            first: Vec::with_capacity(first_cap),
            tail: VecDeque::with_capacity(tail_cap),
            first_cap,
            tail_cap,
            dropped: 0,
        }
    }

    pub(crate) fn record(&mut self, line: String) {
        if self.first.len() < self.first_cap {
            self.first.push(line);
            return;
        }
        if self.tail_cap == 0 {
            self.dropped += 1;
            return;
        }
        if self.tail.len() == self.tail_cap {
            self.tail.pop_front();
            self.dropped += 1;
        }
        self.tail.push_back(line);
    }

    pub(crate) fn dump_failure(&self, reason: &str) {
        tracing::error!("simulation failed: {reason}");
        for line in &self.first {
            tracing::error!("{line}");
        }
        if self.dropped > 0 {
            tracing::error!("... {} steps omitted ...", self.dropped);
        }
        for line in &self.tail {
            tracing::error!("{line}");
        }
    }
}
