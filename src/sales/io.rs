use super::types::{
    LoadedDataset, MAKE, MMR, MODEL, PROJECTED_COLUMNS, SELLING_PRICE, SalesTable, TRANSMISSION,
    YEAR,
};
use crate::error::{Result, ResultExt as _, SalesError};
use polars::prelude::*;
use std::path::Path;

/// How the CSV reader should interpret the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvLoadOptions {
    pub has_header: bool,
    /// Rows scanned to infer column types, `None` scans the whole file
    pub infer_schema_length: Option<usize>,
}

impl Default for CsvLoadOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            infer_schema_length: None,
        }
    }
}

/// Reads a comma-separated file into memory, inferring column types.
///
/// With the default full-file inference a column holding a stray
/// non-numeric value is read as text, and [`project`] turns that value into
/// null instead of the load failing.
///
/// # Errors
///
/// Returns [`SalesError::InvalidPath`] if the file does not exist, or the
/// reader's error with the path attached if polars cannot parse it.
pub fn load_sales_csv(path: &Path, options: &CsvLoadOptions) -> Result<LoadedDataset> {
    if !path.is_file() {
        return Err(SalesError::InvalidPath(format!(
            "{} does not exist or is not a file",
            path.display()
        )));
    }

    let df = LazyCsvReader::new(path)
        .with_has_header(options.has_header)
        .with_infer_schema_length(options.infer_schema_length)
        .finish()
        .and_then(LazyFrame::collect)
        .with_context(|| format!("Failed to read CSV {}", path.display()))?;

    tracing::info!(
        "Loaded {} rows and {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );

    Ok(LoadedDataset {
        df,
        source: path.display().to_string(),
    })
}

/// Narrows a loaded table to the six sale columns and normalises their types.
///
/// Values that do not parse as numbers become null rather than failing the
/// whole load.
///
/// # Errors
///
/// Returns [`SalesError::MissingColumn`] for the first expected column that
/// is absent.
pub fn project(dataset: &LoadedDataset) -> Result<SalesTable> {
    if let Some(missing) = PROJECTED_COLUMNS
        .iter()
        .find(|name| dataset.df.column(name).is_err())
    {
        return Err(SalesError::MissingColumn((*missing).to_owned()));
    }

    let df = dataset
        .df
        .clone()
        .lazy()
        .select([
            col(YEAR).cast(DataType::Int64),
            col(MAKE).cast(DataType::String),
            col(MODEL).cast(DataType::String),
            col(TRANSMISSION).cast(DataType::String),
            col(MMR).cast(DataType::Float64),
            col(SELLING_PRICE).cast(DataType::Float64),
        ])
        .collect()
        .context("Failed to project sales columns")?;

    let dropped = dataset.df.width().saturating_sub(df.width());
    tracing::debug!("Projection kept {} columns, dropped {dropped}", df.width());

    Ok(SalesTable::new(df))
}
