use crate::schema::CommonColumns;
use crate::table::Value;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Column '{name}' could not be found in the table loaded from '{source_file}'")]
    MissingColumn { name: String, source_file: String },
}

/// All rows of all tables, restricted to a common set of columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Combined {
    /// The names of the values in each row, in order.
    pub columns: CommonColumns,
    /// The rows of all tables in the order they were passed, without row indices.
    pub rows: Vec<Vec<Value>>,
}

pub(crate) mod function {
    use crate::merge::{Combined, Error};
    use crate::schema::CommonColumns;
    use crate::table::Table;

    /// Project every table in `tables` onto `columns` and concatenate their rows in order.
    ///
    /// `columns` is expected to come from [`intersect()`](crate::intersect()) over the same tables,
    /// any column not present in one of the tables is an error.
    pub fn merge<'a>(
        tables: impl IntoIterator<Item = &'a Table>,
        columns: &CommonColumns,
    ) -> Result<Combined, Error> {
        let mut rows = Vec::new();
        for table in tables {
            let indices = column_indices(table, columns)?;
            rows.extend(
                table
                    .rows()
                    .iter()
                    .map(|row| indices.iter().map(|index| row[*index].clone()).collect()),
            );
        }
        Ok(Combined {
            columns: columns.clone(),
            rows,
        })
    }

    /// Return the position of each of `columns` within `table`.
    fn column_indices(table: &Table, columns: &CommonColumns) -> Result<Vec<usize>, Error> {
        columns
            .iter()
            .map(|name| {
                table
                    .column_index(name)
                    .ok_or_else(|| Error::MissingColumn {
                        name: name.to_owned(),
                        source_file: table.source().to_owned(),
                    })
            })
            .collect()
    }
}
