use crate::table::Table;
use crate::translate::column;

/// Columns that are never part of the combined output, even if every table has them.
pub const EXCLUDED_COLUMNS: [&str; 3] = [column::SOURCE_FILE, column::DATE, column::PURCHASE_DATE];

/// The columns shared by all tables, in the order of the first table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonColumns(Vec<String>);

impl CommonColumns {
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|column| column == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for CommonColumns {
    /// Collect column names, dropping repetitions.
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut out = Vec::<String>::new();
        for name in iter {
            let name = name.into();
            if !out.contains(&name) {
                out.push(name);
            }
        }
        CommonColumns(out)
    }
}

/// Return the columns present in every one of `tables`, except for the `EXCLUDED_COLUMNS`.
pub fn intersect<'a>(tables: impl IntoIterator<Item = &'a Table>) -> CommonColumns {
    let mut tables = tables.into_iter();
    let Some(first) = tables.next() else {
        return CommonColumns::default();
    };
    let mut common: Vec<&str> = first
        .columns()
        .iter()
        .map(String::as_str)
        .filter(|name| !EXCLUDED_COLUMNS.contains(name))
        .collect();
    for table in tables {
        common.retain(|name| table.column_index(name).is_some());
    }
    common.into_iter().collect()
}
