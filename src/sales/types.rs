use polars::prelude::*;

pub const YEAR: &str = "year";
pub const MAKE: &str = "make";
pub const MODEL: &str = "model";
pub const TRANSMISSION: &str = "transmission";
pub const MMR: &str = "mmr";
pub const SELLING_PRICE: &str = "sellingprice";

/// Columns kept by the projection, in output order.
pub const PROJECTED_COLUMNS: [&str; 6] = [YEAR, MAKE, MODEL, TRANSMISSION, MMR, SELLING_PRICE];

pub const AUTOMATIC: &str = "automatic";
pub const MANUAL: &str = "manual";

pub const TOTAL_SELLING_PRICE: &str = "total_sellingprice";
pub const PERCENTAGE: &str = "percentage";
pub const COUNT: &str = "count";
pub const AVG_PRICE: &str = "avg_price";
pub const MIN_PRICE: &str = "min";
pub const MAX_PRICE: &str = "max";
pub const SOLD_OVER_ESTIMATION: &str = "sold_over_estimation";
pub const SOLD_OVER_ESTIMATION_TOTAL: &str = "sold_over_estimation_total";
pub const SOLD_OVER_ESTIMATION_PERCENTAGE: &str = "sold_over_estimation_percentage";

/// The six-column sales table every query runs against.
///
/// Only [`super::io::project`] builds one, and nothing mutates it afterwards,
/// so all queries observe the same snapshot.
#[derive(Debug, Clone)]
pub struct SalesTable {
    df: DataFrame,
}

impl SalesTable {
    pub(crate) fn new(df: DataFrame) -> Self {
        Self { df }
    }

    /// Lazy view over the table. Column buffers are shared, not copied.
    pub fn lazy(&self) -> LazyFrame {
        self.df.clone().lazy()
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }
}

/// The loaded table before projection, kept for the overview section.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub df: DataFrame,
    pub source: String,
}

impl LoadedDataset {
    pub fn row_count(&self) -> usize {
        self.df.height()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverEstimation {
    pub total_over: u64,
    pub total_rows: usize,
    /// `None` when the table is empty.
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct PriceHistory {
    pub make: String,
    pub model: String,
    pub sales: usize,
    pub min_price: f64,
    pub max_price: f64,
    /// `[year, avg_price]`, ascending by year
    pub yearly: DataFrame,
}
