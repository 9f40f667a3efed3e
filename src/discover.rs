use crate::load::Format;
use std::path::{Path, PathBuf};

/// Office writes lock files with this prefix next to open documents.
pub const TEMPORARY_PREFIX: &str = "~$";

#[derive(Debug, thiserror::Error)]
#[error("Could not list spreadsheets in directory '{}'", directory.display())]
pub struct Error {
    directory: PathBuf,
    source: std::io::Error,
}

/// Return the paths of all readable spreadsheets directly inside `directory`, sorted by file name.
///
/// Lock files and the file called `output_name` are skipped.
pub fn spreadsheets(directory: &Path, output_name: &str) -> Result<Vec<PathBuf>, Error> {
    let err = |source| Error {
        directory: directory.to_owned(),
        source,
    };
    let mut out = Vec::new();
    for entry in std::fs::read_dir(directory).map_err(err)? {
        let entry = entry.map_err(err)?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if Format::from_name(name).is_none()
            || name.starts_with(TEMPORARY_PREFIX)
            || name == output_name
        {
            continue;
        }
        let path = entry.path();
        if path.is_file() {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}
