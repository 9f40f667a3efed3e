use anyhow::Context;
use clap::Parser;
use sheetmerge::combine::Source;
use std::path::PathBuf;

mod options {
    use std::path::PathBuf;

    #[derive(Debug, clap::Parser)]
    #[clap(
        name = "sheetmerge",
        about = "Combine expense report spreadsheets into a single one with the columns they all share"
    )]
    pub struct Args {
        /// The directory to search for .xls and .xlsx files to combine.
        #[clap(long, short = 'd', default_value = ".")]
        pub directory: PathBuf,
        /// The file to write the combined rows to, relative to the directory unless absolute.
        ///
        /// Its suffix, .xlsx or .csv, determines the output format. No header line is written.
        #[clap(long, short = 'o', default_value = "Combined_Transactions.xlsx")]
        pub output: PathBuf,
    }
}

fn main() -> anyhow::Result<()> {
    let env = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let options::Args { directory, output } = options::Args::parse();
    let output = directory.join(output);
    let output_name = output
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("Output path '{}' has no valid file name", output.display()))?
        .to_owned();
    let format = sheetmerge::write::Format::from_name(&output_name).ok_or_else(|| {
        sheetmerge::write::Error::UnsupportedFormat {
            name: output_name.clone(),
        }
    })?;

    let sources = into_sources(sheetmerge::discover::spreadsheets(&directory, &output_name)?);
    let mut buf = Vec::<u8>::new();
    let outcome = sheetmerge::combine(
        sources,
        &mut buf,
        sheetmerge::combine::Options {
            format,
            ..Default::default()
        },
    )?;
    std::fs::write(&output, buf).with_context(|| {
        format!(
            "Could not write combined spreadsheet to '{}'",
            output.display()
        )
    })?;

    println!("Combined file saved as: {}", output.display());
    println!(
        "Columns in combined file: {}",
        outcome.columns.iter().collect::<Vec<_>>().join(", ")
    );
    Ok(())
}

/// Open all files at `file_paths`, skipping those that can't be opened.
fn into_sources(file_paths: Vec<PathBuf>) -> Vec<Source<std::io::BufReader<std::fs::File>>> {
    file_paths
        .into_iter()
        .filter_map(|path| {
            let name = path.file_name()?.to_string_lossy().into_owned();
            match std::fs::File::open(&path) {
                Ok(file) => Some(Source {
                    name,
                    data: std::io::BufReader::new(file),
                }),
                Err(err) => {
                    tracing::warn!(file = %path.display(), "Skipping spreadsheet that could not be opened: {err}");
                    None
                }
            }
        })
        .collect()
}
