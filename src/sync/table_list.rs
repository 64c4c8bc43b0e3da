//! Ordered list of table names to synchronize.

/// Tables to copy, in the order they will be processed.
///
/// Built from either a single name or any list of names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableList(Vec<String>);

impl TableList {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for TableList {
    fn from(table: &str) -> Self {
        Self(vec![table.to_owned()])
    }
}

impl From<String> for TableList {
    fn from(table: String) -> Self {
        Self(vec![table])
    }
}

impl From<Vec<String>> for TableList {
    fn from(tables: Vec<String>) -> Self {
        Self(tables)
    }
}

impl From<Vec<&str>> for TableList {
    fn from(tables: Vec<&str>) -> Self {
        tables.into_iter().collect()
    }
}

impl From<&[&str]> for TableList {
    fn from(tables: &[&str]) -> Self {
        tables.iter().copied().collect()
    }
}

impl<const N: usize> From<[&str; N]> for TableList {
    fn from(tables: [&str; N]) -> Self {
        tables.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for TableList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_name_becomes_list() {
        let tables = TableList::from("algs");
        assert_eq!(tables.iter().collect::<Vec<_>>(), vec!["algs"]);
    }

    #[test]
    fn test_order_is_kept() {
        let tables = TableList::from(["matrix_alg", "algs", "alg_io"]);
        assert_eq!(tables.len(), 3);
        assert_eq!(
            tables.iter().collect::<Vec<_>>(),
            vec!["matrix_alg", "algs", "alg_io"]
        );
    }

    #[test]
    fn test_empty() {
        assert!(TableList::default().is_empty());
        assert!(TableList::from(Vec::<String>::new()).is_empty());
    }
}
