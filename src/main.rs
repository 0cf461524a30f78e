//! # carsales entry point
//!
//! ```text
//! main()
//!   ├─> Parse CLI arguments (clap)
//!   ├─> Initialise tracing (stderr, optional rolling files)
//!   └─> Load, project and print the requested sections
//! ```
//!
//! ```bash
//! carsales --file datasets/car_prices.csv
//! carsales history --make Nissan --model GT-R
//! ```

#![warn(clippy::all, rust_2018_idioms)]

mod cli;

use anyhow::Result;
use clap::Parser as _;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    carsales::logging::init(cli.log_file)?;

    if let Err(e) = cli::run(&cli) {
        tracing::error!("{e:#}");
        return Err(e);
    }
    Ok(())
}
