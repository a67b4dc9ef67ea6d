//! The uniform tabular result carrier produced by query execution.

/// Sentinel string that conveys a SQL `NULL` cell.
///
/// Every cell in a [`RecordSet`] is a string; databases have no textual
/// representation of `NULL` that could not collide with real data, so the
/// wire format reserves this exact marker instead.
pub const NULL_VALUE: &str = "__MLMD_NULL__";

/// An ordered list of column names plus zero or more rows of string cells.
///
/// Column order is backend-specified. Callers must locate columns by name
/// via [`RecordSet::column_index`] rather than hard-coding positions.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordSet {
    pub column_names: Vec<String>,
    pub records: Vec<Record>,
}

/// A single row.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Record {
    pub values: Vec<String>,
}

impl RecordSet {
    pub fn new(column_names: Vec<String>) -> Self {
        Self {
            column_names,
            records: Vec::new(),
        }
    }

    pub fn push_row(&mut self, values: Vec<String>) {
        self.records.push(Record { values });
    }

    /// Index of the named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_names.iter().position(|c| c == name)
    }

    /// The cell at `(row, column-name)`, if both exist.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.records.get(row)?.values.get(index).map(String::as_str)
    }

    /// All cells of the named column, in row order.
    pub fn column_values(&self, column: &str) -> Vec<&str> {
        match self.column_index(column) {
            Some(index) => self
                .records
                .iter()
                .filter_map(|r| r.values.get(index).map(String::as_str))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_lookup_is_positional_independent() {
        let mut set = RecordSet::new(vec!["name".to_owned(), "id".to_owned()]);
        set.push_row(vec!["foo".to_owned(), "7".to_owned()]);

        assert_eq!(set.column_index("id"), Some(1));
        assert_eq!(set.value(0, "id"), Some("7"));
        assert_eq!(set.value(0, "name"), Some("foo"));
        assert_eq!(set.value(0, "missing"), None);
    }

    #[test]
    fn empty_record_set() {
        let set = RecordSet::default();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.column_index("id"), None);
    }
}
