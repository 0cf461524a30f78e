//! # carsales - exploratory aggregation over used-car sales
//!
//! Loads a CSV of car sale records with Polars, narrows it to the columns
//! that matter and answers a fixed set of questions about it: which models
//! and manufacturers sell best, how automatic and manual sales evolve per
//! year, how often a car sells above its estimated value, and how the price
//! of a given model has moved.
//!
//! ## Quick Start
//!
//! ```no_run
//! use carsales::config::ReportConfig;
//! use carsales::report::Reporter;
//! use carsales::sales;
//! use carsales::session::Session;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = ReportConfig::default();
//! let session = Session::from_config(&config);
//! let prepared = sales::prepare(&session, &config.dataset)?;
//!
//! let mut reporter = Reporter::from_config(std::io::stdout().lock(), &config);
//! sales::run_report(&prepared, &config, &mut reporter)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`session`]: engine bootstrap and CSV load options
//! - [`sales`]: loading, projection and the aggregation queries
//!   - [`sales::queries`]: one pure function per question
//!   - [`sales::flows`]: the report pipeline
//! - [`report`]: text rendering of results
//! - [`config`]: JSON report configuration
//! - [`error`]: error types
//! - [`logging`]: tracing setup
//!
//! ## Lazy Evaluation
//!
//! Every query builds a Polars `LazyFrame` plan over the projected table and
//! collects it once. The projected table itself is never modified, so all
//! queries read the same snapshot.

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod sales;
pub mod session;
