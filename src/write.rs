/// The largest sheet Excel is able to open.
const MAX_ROWS: usize = 1_048_576;
const MAX_COLUMNS: usize = 16_384;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot tell the output format of '{name}' as it doesn't end in .xlsx or .csv")]
    UnsupportedFormat { name: String },
    #[error("{rows} rows with {columns} columns do not fit into a single worksheet")]
    TooLarge { rows: usize, columns: usize },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("Could not write the combined spreadsheet")]
    Io(#[from] std::io::Error),
}

/// The formats the combined table can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Xlsx,
    Csv,
}

impl Format {
    /// Determine the format from the suffix of `name`, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        if name.ends_with(".xlsx") {
            Some(Format::Xlsx)
        } else if name.ends_with(".csv") {
            Some(Format::Csv)
        } else {
            None
        }
    }
}

pub(crate) mod function {
    use crate::merge::Combined;
    use crate::table::Value;
    use crate::write::{Error, Format, MAX_COLUMNS, MAX_ROWS};
    use std::io::Write;

    /// Write the rows of `combined` to `out` without a header line.
    ///
    /// Cells appear in the order of `combined.columns`. Absent values are left blank.
    pub fn write(combined: &Combined, format: Format, mut out: impl Write) -> Result<(), Error> {
        match format {
            Format::Csv => {
                let mut out = csv::WriterBuilder::new()
                    .has_headers(false)
                    .from_writer(out);
                for row in &combined.rows {
                    out.serialize(row)?;
                }
                out.flush()?;
            }
            Format::Xlsx => {
                let (rows, columns) = (combined.rows.len(), combined.columns.len());
                if rows > MAX_ROWS || columns > MAX_COLUMNS {
                    return Err(Error::TooLarge { rows, columns });
                }
                let mut workbook = rust_xlsxwriter::Workbook::new();
                let sheet = workbook.add_worksheet();
                for (row_index, row) in combined.rows.iter().enumerate() {
                    for (column_index, value) in row.iter().enumerate() {
                        // Bounds were checked above.
                        let (row_index, column_index) = (row_index as u32, column_index as u16);
                        match value {
                            Value::Text(text) => {
                                sheet.write_string(row_index, column_index, text)?;
                            }
                            Value::Number(number) => {
                                sheet.write_number(row_index, column_index, *number)?;
                            }
                            Value::Absent => {}
                        }
                    }
                }
                out.write_all(&workbook.save_to_buffer()?)?;
            }
        }
        Ok(())
    }
}
