/// One result row as raw column bytes, in column order.
///
/// `None` marks SQL NULL. Non-NULL values are the driver's textual rendering of the column, so
/// an integer column holds e.g. `b"42"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    values: Vec<Option<Vec<u8>>>,
}

impl RawRow {
    #[must_use]
    pub fn new(values: Vec<Option<Vec<u8>>>) -> Self {
        Self { values }
    }

    /// Build a row from text values; handy for drivers and tests.
    #[must_use]
    pub fn from_text<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        Self {
            values: values
                .into_iter()
                .map(|v| v.map(|s| s.as_bytes().to_vec()))
                .collect(),
        }
    }

    /// Raw bytes at `index`; `None` for NULL or an out-of-range index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.values.get(index).and_then(|v| v.as_deref())
    }
}
