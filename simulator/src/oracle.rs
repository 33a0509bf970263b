/// Invariant checks run against a live pool.
pub(crate) struct Oracle;

impl Oracle {
    /// While tasks run, free connections can never exceed the pool size.
    pub(crate) fn check_slots(available: usize, size: usize) -> Result<(), String> {
        if available > size {
            return Err(format!("{available} connections available in a pool of {size}"));
        }
        Ok(())
    }

    /// Once every task finished, every connection must be back.
    pub(crate) fn check_drained(available: usize, size: usize) -> Result<(), String> {
        if available != size {
            return Err(format!(
                "{available} of {size} connections returned after all tasks finished"
            ));
        }
        Ok(())
    }

    pub(crate) fn check_row_count(expected: u64, actual: Option<i64>) -> Result<(), String> {
        let actual = actual.unwrap_or(0);
        if u64::try_from(actual).ok() != Some(expected) {
            return Err(format!("expected {expected} rows, table holds {actual}"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oracle_flags_leaks_and_lost_rows() {
        assert!(Oracle::check_slots(2, 4).is_ok());
        assert!(Oracle::check_slots(5, 4).is_err());
        assert!(Oracle::check_drained(3, 4).is_err());
        assert!(Oracle::check_row_count(3, Some(3)).is_ok());
        assert!(Oracle::check_row_count(3, Some(2)).is_err());
        assert!(Oracle::check_row_count(0, None).is_ok());
    }
}
