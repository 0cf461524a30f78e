use super::io::{load_sales_csv, project};
use super::queries;
use super::types::{LoadedDataset, SalesTable};
use crate::config::ReportConfig;
use crate::report::Reporter;
use crate::session::Session;
use anyhow::{Context as _, Result};
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// One block of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Overview,
    TopModels,
    TopManufacturers,
    Transmission,
    OverEstimation,
    PriceHistory,
}

impl Section {
    /// Every section, in report order.
    pub const ALL: [Self; 6] = [
        Self::Overview,
        Self::TopModels,
        Self::TopManufacturers,
        Self::Transmission,
        Self::OverEstimation,
        Self::PriceHistory,
    ];

    /// Heading printed above the section, if it has one.
    pub fn title(self) -> Option<&'static str> {
        match self {
            Self::Overview | Self::PriceHistory => None,
            Self::TopModels => Some("Best selling car models"),
            Self::TopManufacturers => Some("Best selling car manufacturers"),
            Self::Transmission => Some("Number of cars sold by transmission type over the years"),
            Self::OverEstimation => {
                Some("Percentage of sales that exceed that expected price of the car")
            }
        }
    }
}

/// A loaded dataset and its projection, ready to be queried.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub loaded: LoadedDataset,
    pub table: SalesTable,
}

/// Loads `dataset` through `session` and projects it.
pub fn prepare(session: &Session, dataset: &Path) -> Result<Prepared> {
    let start = Instant::now();
    let loaded = load_sales_csv(dataset, session.csv_options())
        .with_context(|| format!("Failed to load {}", dataset.display()))?;
    let table = project(&loaded).context("Failed to select sales columns")?;
    tracing::info!(
        app = session.app_name(),
        "Prepared {} sales from {} in {:?}",
        table.height(),
        loaded.source,
        start.elapsed()
    );
    Ok(Prepared { loaded, table })
}

pub fn run_section<W: Write>(
    section: Section,
    prepared: &Prepared,
    config: &ReportConfig,
    reporter: &mut Reporter<W>,
) -> Result<()> {
    let start = Instant::now();
    if let Some(title) = section.title() {
        reporter.line(title)?;
    }

    let table = &prepared.table;
    match section {
        Section::Overview => reporter.overview(&prepared.loaded, table)?,
        Section::TopModels => reporter.ranked(&queries::top_models(table)?)?,
        Section::TopManufacturers => {
            let total = queries::grand_total(table)?;
            reporter.ranked(&queries::top_manufacturers(table, total)?)?;
        }
        Section::Transmission => reporter.preview(&queries::transmission_by_year(table)?)?,
        Section::OverEstimation => reporter.over_estimation(&queries::over_estimation(table)?)?,
        Section::PriceHistory => {
            let history =
                queries::price_history(table, &config.history_make, &config.history_model)?;
            reporter.price_history(
                &config.history_make,
                &config.history_model,
                history.as_ref(),
                config.show_yearly_average,
            )?;
        }
    }

    tracing::debug!("{section:?} done in {:?}", start.elapsed());
    Ok(())
}

/// Runs every section in order, then the full-table dump if configured.
pub fn run_report<W: Write>(
    prepared: &Prepared,
    config: &ReportConfig,
    reporter: &mut Reporter<W>,
) -> Result<()> {
    for section in Section::ALL {
        run_section(section, prepared, config, reporter)
            .with_context(|| format!("Report section {section:?} failed"))?;
    }
    if config.show_full_table {
        reporter.preview(prepared.table.frame())?;
    }
    Ok(())
}
