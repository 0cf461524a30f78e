use anyhow::{Context as _, Result};
use carsales::config::ReportConfig;
use carsales::report::Reporter;
use carsales::sales::{self, Section};
use carsales::session::Session;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "carsales", about = "Exploratory analysis of used-car sales")]
pub struct Cli {
    /// Dataset to analyse (CSV with a header row)
    #[arg(short, long, global = true, env = "CARSALES_DATASET")]
    pub file: Option<PathBuf>,

    /// Path to a JSON report configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Rows shown for ranked results
    #[arg(short = 'n', long, global = true)]
    pub top: Option<usize>,

    /// Rows shown for full previews
    #[arg(long, global = true)]
    pub rows: Option<usize>,

    /// Also write logs to the rolling log directory
    #[arg(long, global = true)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run every section of the report (default)
    Report {
        /// Print the projected table again at the end
        #[arg(long)]
        show_full: bool,
    },
    /// Dataset count, schema and sample
    Overview,
    /// Best selling car models
    Models,
    /// Best selling manufacturers and their share of all sales
    Makes,
    /// Automatic and manual sales per year
    Transmission,
    /// Share of sales closed above the estimated price
    OverEstimation,
    /// Lowest, highest and yearly average price of one model
    History {
        /// Manufacturer, matched exactly
        #[arg(long)]
        make: Option<String>,

        /// Model, matched exactly
        #[arg(long)]
        model: Option<String>,

        /// Skip the per-year average table
        #[arg(long)]
        no_yearly: bool,
    },
}

impl Cli {
    /// Configuration file (or defaults) overridden by command-line flags.
    pub fn resolve_config(&self) -> Result<ReportConfig> {
        let mut config = ReportConfig::load_or_default(self.config.as_deref())
            .context("Failed to load configuration")?;

        if let Some(file) = &self.file {
            config.dataset.clone_from(file);
        }
        if let Some(top) = self.top {
            config.top_n = top;
        }
        if let Some(rows) = self.rows {
            config.preview_rows = rows;
        }
        match &self.command {
            Some(Commands::Report { show_full: true }) => config.show_full_table = true,
            Some(Commands::History {
                make,
                model,
                no_yearly,
            }) => {
                if let Some(make) = make {
                    config.history_make.clone_from(make);
                }
                if let Some(model) = model {
                    config.history_model.clone_from(model);
                }
                if *no_yearly {
                    config.show_yearly_average = false;
                }
            }
            _ => {}
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

impl Commands {
    /// The single section a command prints, `None` for the full report.
    fn section(&self) -> Option<Section> {
        match self {
            Self::Report { .. } => None,
            Self::Overview => Some(Section::Overview),
            Self::Models => Some(Section::TopModels),
            Self::Makes => Some(Section::TopManufacturers),
            Self::Transmission => Some(Section::Transmission),
            Self::OverEstimation => Some(Section::OverEstimation),
            Self::History { .. } => Some(Section::PriceHistory),
        }
    }
}

pub fn run(cli: &Cli) -> Result<()> {
    let config = cli.resolve_config()?;
    tracing::info!("Analysing {}", config.dataset.display());

    let session = Session::from_config(&config);
    let prepared = sales::prepare(&session, &config.dataset)?;

    let stdout = std::io::stdout();
    let mut reporter = Reporter::from_config(stdout.lock(), &config);

    match cli.command.as_ref().and_then(Commands::section) {
        Some(section) => sales::run_section(section, &prepared, &config, &mut reporter),
        None => sales::run_report(&prepared, &config, &mut reporter),
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used)]
    use super::*;
    use clap::CommandFactory as _;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "carsales",
            "--file",
            "other.csv",
            "-n",
            "3",
            "history",
            "--make",
            "Toyota",
            "--model",
            "Supra",
        ])
        .unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.dataset, PathBuf::from("other.csv"));
        assert_eq!(config.top_n, 3);
        assert_eq!(config.history_make, "Toyota");
        assert_eq!(config.history_model, "Supra");
        assert!(config.show_yearly_average);
    }

    #[test]
    fn test_report_show_full() {
        let cli = Cli::try_parse_from(["carsales", "report", "--show-full"]).unwrap();
        assert!(cli.resolve_config().unwrap().show_full_table);
        assert_eq!(cli.command.as_ref().and_then(Commands::section), None);
    }

    #[test]
    fn test_zero_rows_rejected() {
        let cli = Cli::try_parse_from(["carsales", "--rows", "0", "transmission"]).unwrap();
        assert!(cli.resolve_config().is_err());
    }
}
