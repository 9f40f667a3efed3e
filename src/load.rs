use crate::translate::Translations;

/// The physical row holding the column names. The row above it is a banner and is ignored.
pub const HEADER_ROW: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot tell the spreadsheet format of '{name}' as it doesn't end in .xls or .xlsx")]
    UnsupportedFormat { name: String },
    #[error("Could not read spreadsheet data")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Xls(#[from] calamine::XlsError),
    #[error(transparent)]
    Xlsx(#[from] calamine::XlsxError),
    #[error("The workbook does not contain a single worksheet")]
    NoWorksheet,
    #[error("The first worksheet has no header line in row {}", HEADER_ROW + 1)]
    MissingHeader,
    #[error("Date '{value}' in data row {row} could not be parsed")]
    InvalidDate { value: String, row: usize },
}

/// The spreadsheet formats we can read, distinguished by file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// The legacy binary format.
    Xls,
    /// The zipped XML format.
    Xlsx,
}

impl Format {
    /// Determine the format from the suffix of `name`, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        if name.ends_with(".xlsx") {
            Some(Format::Xlsx)
        } else if name.ends_with(".xls") {
            Some(Format::Xls)
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Options {
    /// Used to turn localized column names into canonical ones.
    pub translations: Translations,
}

pub(crate) mod function {
    use crate::coerce::{cell_to_string, normalize_date, parse_amount};
    use crate::load::{Error, Format, Options, HEADER_ROW};
    use crate::table::{RawTable, Table, Value};
    use crate::translate::column;
    use calamine::{Data, Range, Reader};
    use std::io::{Cursor, Read};

    /// Read the first worksheet of the spreadsheet in `data` and normalize it.
    ///
    /// `name` is the file name the data was read from. Its suffix selects the parser, and it is
    /// recorded in the `Source File` column of every row.
    pub fn load(mut data: impl Read, name: &str, options: &Options) -> Result<Table, Error> {
        let format = Format::from_name(name).ok_or_else(|| Error::UnsupportedFormat {
            name: name.to_owned(),
        })?;
        let mut buf = Vec::new();
        data.read_to_end(&mut buf)?;
        let buf = Cursor::new(buf);
        let range = match format {
            Format::Xls => calamine::Xls::new(buf)?
                .worksheet_range_at(0)
                .ok_or(Error::NoWorksheet)??,
            Format::Xlsx => calamine::Xlsx::new(buf)?
                .worksheet_range_at(0)
                .ok_or(Error::NoWorksheet)??,
        };
        normalize(read_raw(&range)?, name, options)
    }

    /// Translate the headers of `raw`, coerce its dates and amounts and tag each row with `source`.
    ///
    /// Fails if a single date can't be parsed, whereas amounts that aren't numbers become absent.
    pub fn normalize(raw: RawTable, source: &str, options: &Options) -> Result<Table, Error> {
        let RawTable { headers, rows } = raw;
        let mut columns = unique_names(
            headers
                .iter()
                .map(|name| options.translations.translate(name.trim()).to_owned()),
        );
        let position = |name: &str| columns.iter().position(|column| column == name);
        let date_index = position(column::DATE);
        let amount_indices: Vec<usize> = [column::TRANSACTION_AMOUNT, column::INVOICE_AMOUNT]
            .into_iter()
            .filter_map(position)
            .collect();
        let source_index = position(column::SOURCE_FILE);
        let width = columns.len();

        let mut out = Vec::with_capacity(rows.len());
        for (row_index, row) in rows.into_iter().enumerate() {
            let mut values = Vec::with_capacity(width + 1);
            let cells = row.into_iter().chain(std::iter::repeat(None)).take(width);
            for (index, cell) in cells.enumerate() {
                values.push(match cell {
                    None => Value::Absent,
                    Some(text) if Some(index) == date_index => {
                        Value::Text(normalize_date(&text).ok_or_else(|| Error::InvalidDate {
                            value: text.clone(),
                            row: row_index + 1,
                        })?)
                    }
                    Some(text) if amount_indices.contains(&index) => parse_amount(&text)
                        .map(Value::Number)
                        .unwrap_or(Value::Absent),
                    Some(text) => Value::Text(text),
                });
            }
            let provenance = Value::Text(source.to_owned());
            match source_index {
                Some(index) => values[index] = provenance,
                None => values.push(provenance),
            }
            out.push(values);
        }
        if source_index.is_none() {
            columns.push(column::SOURCE_FILE.to_owned());
        }

        tracing::debug!(
            source,
            columns = columns.len(),
            rows = out.len(),
            "normalized spreadsheet"
        );
        Ok(Table::new(source.to_owned(), columns, out))
    }

    /// Read headers from `HEADER_ROW` and all non-empty rows below it, as strings.
    fn read_raw(range: &Range<Data>) -> Result<RawTable, Error> {
        let (last_row, last_column) = range
            .end()
            .filter(|(last_row, _)| *last_row >= HEADER_ROW)
            .ok_or(Error::MissingHeader)?;
        let cell = |row: u32, column: u32| range.get_value((row, column)).and_then(cell_to_string);

        let headers = unique_names((0..=last_column).map(|column| {
            cell(HEADER_ROW, column).unwrap_or_else(|| format!("Unnamed: {column}"))
        }));
        let rows = (HEADER_ROW + 1..=last_row)
            .map(|row| {
                (0..=last_column)
                    .map(|column| cell(row, column))
                    .collect::<Vec<_>>()
            })
            .filter(|row| row.iter().any(Option::is_some))
            .collect();
        Ok(RawTable { headers, rows })
    }

    /// Make every name unique by suffixing repetitions with `.1`, `.2` and so forth.
    fn unique_names(names: impl IntoIterator<Item = String>) -> Vec<String> {
        let mut out = Vec::<String>::new();
        for name in names {
            let mut candidate = name.clone();
            let mut count = 0;
            while out.contains(&candidate) {
                count += 1;
                candidate = format!("{name}.{count}");
            }
            out.push(candidate);
        }
        out
    }
}
