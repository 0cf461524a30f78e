//! Engine bootstrap.
//!
//! A [`Session`] names the run and owns the options every load goes through.
//!
//! ```no_run
//! use carsales::session::Session;
//! use std::path::Path;
//!
//! # fn main() -> carsales::error::Result<()> {
//! let session = Session::builder().app_name("CarAnalysisApp").build();
//! let dataset = session.read_csv(Path::new("datasets/car_prices.csv"))?;
//! let table = session.project(&dataset)?;
//! println!("{} sales", table.height());
//! # Ok(())
//! # }
//! ```

use crate::config::ReportConfig;
use crate::error::Result;
use crate::sales::io::{self, CsvLoadOptions};
use crate::sales::{LoadedDataset, SalesTable};
use std::path::Path;

pub const DEFAULT_APP_NAME: &str = "CarAnalysisApp";

#[derive(Debug, Clone)]
pub struct Session {
    app_name: String,
    csv: CsvLoadOptions,
}

#[derive(Debug, Clone, Default)]
pub struct SessionBuilder {
    app_name: Option<String>,
    csv: CsvLoadOptions,
}

impl SessionBuilder {
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    pub fn has_header(mut self, has_header: bool) -> Self {
        self.csv.has_header = has_header;
        self
    }

    /// Limits type inference to the first `rows` rows instead of the whole file.
    pub fn infer_schema_length(mut self, rows: usize) -> Self {
        self.csv.infer_schema_length = Some(rows);
        self
    }

    pub fn build(self) -> Session {
        let session = Session {
            app_name: self
                .app_name
                .unwrap_or_else(|| DEFAULT_APP_NAME.to_owned()),
            csv: self.csv,
        };
        tracing::info!(
            app = %session.app_name,
            infer_schema_length = ?session.csv.infer_schema_length,
            "Session started"
        );
        session
    }
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    /// Session configured from a report configuration.
    pub fn from_config(config: &ReportConfig) -> Self {
        let mut builder = Self::builder();
        if let Some(rows) = config.infer_schema_length {
            builder = builder.infer_schema_length(rows);
        }
        builder.build()
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn csv_options(&self) -> &CsvLoadOptions {
        &self.csv
    }

    /// # Errors
    ///
    /// See [`io::load_sales_csv`].
    pub fn read_csv(&self, path: &Path) -> Result<LoadedDataset> {
        io::load_sales_csv(path, &self.csv)
    }

    /// # Errors
    ///
    /// See [`io::project`].
    pub fn project(&self, dataset: &LoadedDataset) -> Result<SalesTable> {
        io::project(dataset)
    }
}
