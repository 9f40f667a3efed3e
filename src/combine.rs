use crate::schema::CommonColumns;
use crate::{load, write};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("None of the {attempted} given spreadsheet(s) contained data that could be combined")]
    NoUsableData { attempted: usize },
    #[error(transparent)]
    Merge(#[from] crate::merge::Error),
    #[error("Failed to write the combined spreadsheet")]
    Write(#[from] write::Error),
}

/// A spreadsheet to combine, along with the name of the file it came from.
pub struct Source<R> {
    pub name: String,
    pub data: R,
}

#[derive(Clone, Debug, Default)]
pub struct Options {
    pub load: load::Options,
    /// The format to write the combined table in.
    pub format: write::Format,
}

#[derive(Debug)]
pub struct Outcome {
    /// The columns of the written table, in order.
    pub columns: CommonColumns,
    /// The amount of rows that were written.
    pub rows: usize,
    /// The names of all spreadsheets that made it into the output, in order.
    pub combined: Vec<String>,
    /// The names of spreadsheets that could not be loaded, along with the reason.
    pub skipped: Vec<(String, load::Error)>,
}

pub(crate) mod function {
    use crate::combine::{Error, Options, Outcome, Source};
    use crate::{intersect, load, merge, write};

    /// Load all `sources`, and write the rows of all loadable ones restricted to the columns they have
    /// in common to `out`.
    ///
    /// Spreadsheets that fail to load are skipped with a warning. Nothing is written if none
    /// could be loaded.
    pub fn combine(
        sources: impl IntoIterator<Item = Source<impl std::io::Read>>,
        out: impl std::io::Write,
        Options {
            load: load_options,
            format,
        }: Options,
    ) -> Result<Outcome, Error> {
        let outcomes: Vec<_> = sources
            .into_iter()
            .map(|Source { name, data }| {
                let outcome = load(data, &name, &load_options);
                (name, outcome)
            })
            .collect();

        let mut tables = Vec::with_capacity(outcomes.len());
        let mut skipped = Vec::new();
        for (name, outcome) in outcomes {
            match outcome {
                Ok(table) => tables.push(table),
                Err(err) => {
                    tracing::warn!(file = %name, "Skipping spreadsheet that failed to load: {err}");
                    skipped.push((name, err));
                }
            }
        }
        if tables.is_empty() {
            return Err(Error::NoUsableData {
                attempted: skipped.len(),
            });
        }

        let columns = intersect(&tables);
        let combined = merge(&tables, &columns)?;
        write(&combined, format, out)?;
        tracing::info!(
            files = tables.len(),
            skipped = skipped.len(),
            rows = combined.rows.len(),
            "combined spreadsheets"
        );

        Ok(Outcome {
            rows: combined.rows.len(),
            columns: combined.columns,
            combined: tables.iter().map(|table| table.source().to_owned()).collect(),
            skipped,
        })
    }
}
