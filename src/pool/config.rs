use serde::{Deserialize, Serialize};

use crate::error::RowPoolError;

/// Driver-independent pool settings.
///
/// One connection is opened per descriptor, so the list length is the pool size.
/// ```rust
/// use sql_rowpool::prelude::*;
///
/// let opts = PoolOptions::new(["db/a.sqlite", "db/a.sqlite"]);
/// assert_eq!(opts.size(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolOptions {
    pub descriptors: Vec<String>,
}

impl PoolOptions {
    pub fn new<I, S>(descriptors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            descriptors: descriptors.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.descriptors.len()
    }

    /// # Errors
    /// Returns [`RowPoolError::Config`] when no descriptor is configured.
    pub fn validate(&self) -> Result<(), RowPoolError> {
        if self.descriptors.is_empty() {
            return Err(RowPoolError::Config(
                "at least one data source descriptor is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_options_are_rejected() {
        assert!(matches!(
            PoolOptions::default().validate(),
            Err(RowPoolError::Config(_))
        ));
        assert!(PoolOptions::new(["x", "x", "x"]).validate().is_ok());
    }

    #[test]
    fn options_deserialize_from_json() {
        let opts: PoolOptions =
            serde_json::from_str(r#"{"descriptors": ["one.db", "two.db"]}"#).unwrap();
        assert_eq!(opts, PoolOptions::new(["one.db", "two.db"]));
    }
}
