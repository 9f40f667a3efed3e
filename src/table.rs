/// A single normalized cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    /// The cell was empty, or an amount that couldn't be parsed.
    Absent,
}

impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Text(text) => serializer.serialize_str(text),
            Value::Number(number) => serializer.serialize_f64(*number),
            Value::Absent => serializer.serialize_none(),
        }
    }
}

/// The first worksheet of a spreadsheet as read, before any normalization took place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Header names in sheet order, unique, but otherwise exactly as they were found.
    pub headers: Vec<String>,
    /// Data rows, each with exactly one optional cell per header.
    pub rows: Vec<Vec<Option<String>>>,
}

/// One input file after header translation and cell coercion.
///
/// Rows are positional and aligned with `columns`, which never contains duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    source: String,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Assemble a table from its parts.
    ///
    /// # Panics
    ///
    /// If a row doesn't have exactly one value per column.
    pub fn new(source: String, columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        if let Some(row) = rows.iter().position(|row| row.len() != columns.len()) {
            panic!(
                "row {row} of '{source}' has {} values, but there are {} columns",
                rows[row].len(),
                columns.len()
            );
        }
        Table {
            source,
            columns,
            rows,
        }
    }

    /// The name of the file this table was loaded from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Return the position of the column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Return all values of the column called `name` in row order.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Value> + '_> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[index]))
    }
}
