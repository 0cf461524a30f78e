pub mod flows;
pub mod io;
pub mod queries;
pub mod types;

pub use flows::{Prepared, Section, prepare, run_report, run_section};
pub use io::{CsvLoadOptions, load_sales_csv, project};
pub use queries::{
    grand_total, over_estimation, price_history, top_manufacturers, top_models,
    transmission_by_year,
};
pub use types::{LoadedDataset, OverEstimation, PriceHistory, SalesTable};
