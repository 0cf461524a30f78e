//! The aggregation queries run against a [`SalesTable`].
//!
//! Each query is a pure function of the table: it builds a lazy plan over
//! [`SalesTable::lazy`], collects it and returns a small result.

use super::types::{
    AUTOMATIC, AVG_PRICE, COUNT, MAKE, MANUAL, MAX_PRICE, MIN_PRICE, MMR, MODEL, OverEstimation,
    PERCENTAGE, PriceHistory, SELLING_PRICE, SOLD_OVER_ESTIMATION, SOLD_OVER_ESTIMATION_PERCENTAGE,
    SOLD_OVER_ESTIMATION_TOTAL, SalesTable, TOTAL_SELLING_PRICE, TRANSMISSION, YEAR,
};
use anyhow::{Context as _, Result};
use polars::prelude::*;

/// Sum of `sellingprice` over the whole table. Nulls are skipped and an
/// empty table sums to zero.
pub fn grand_total(table: &SalesTable) -> Result<f64> {
    let df = table
        .lazy()
        .select([col(SELLING_PRICE).sum()])
        .collect()
        .context("Failed to compute total sales")?;
    Ok(scalar(&df, SELLING_PRICE)?.extract::<f64>().unwrap_or(0.0))
}

/// Total selling price per (make, model), highest first.
pub fn top_models(table: &SalesTable) -> Result<DataFrame> {
    table
        .lazy()
        .group_by_stable([col(MAKE), col(MODEL)])
        .agg([col(SELLING_PRICE).sum().alias(TOTAL_SELLING_PRICE)])
        .sort_by_exprs(
            [col(TOTAL_SELLING_PRICE)],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .collect()
        .context("Failed to rank car models")
}

/// Total selling price per make, highest first, with its share of
/// `grand_total` as a percentage rounded to two decimals.
///
/// `grand_total` must come from [`grand_total`] on the same table. When it is
/// zero the percentage column is null.
pub fn top_manufacturers(table: &SalesTable, grand_total: f64) -> Result<DataFrame> {
    let ranked = table
        .lazy()
        .group_by_stable([col(MAKE)])
        .agg([col(SELLING_PRICE).sum().alias(TOTAL_SELLING_PRICE)])
        .sort_by_exprs(
            [col(TOTAL_SELLING_PRICE)],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        );

    if grand_total == 0.0 {
        tracing::warn!("Total sales are zero, manufacturer share is undefined");
        let mut df = ranked
            .collect()
            .context("Failed to rank car manufacturers")?;
        let height = df.height();
        df.with_column(Series::full_null(
            PERCENTAGE.into(),
            height,
            &DataType::Float64,
        ))?;
        return Ok(df);
    }

    ranked
        .with_column(
            (col(TOTAL_SELLING_PRICE) / lit(grand_total) * lit(100.0))
                .round(2)
                .alias(PERCENTAGE),
        )
        .collect()
        .context("Failed to rank car manufacturers")
}

/// Number of sales per (year, transmission) for automatic and manual cars.
///
/// Any other transmission value, including null, is left out. Newest year
/// first, then the most common transmission. Sales without a year come last.
pub fn transmission_by_year(table: &SalesTable) -> Result<DataFrame> {
    table
        .lazy()
        .select([col(YEAR), col(TRANSMISSION)])
        .filter(
            col(TRANSMISSION)
                .eq(lit(AUTOMATIC))
                .or(col(TRANSMISSION).eq(lit(MANUAL))),
        )
        .group_by_stable([col(YEAR), col(TRANSMISSION)])
        .agg([len().alias(COUNT)])
        .sort_by_exprs(
            [col(YEAR), col(COUNT)],
            SortMultipleOptions::default()
                .with_order_descending_multi([true, true])
                .with_nulls_last(true)
                .with_maintain_order(true),
        )
        .collect()
        .context("Failed to count sales by transmission")
}

/// How many sales closed above the `mmr` estimate.
///
/// A sale at exactly the estimate is not counted, nor is one with either
/// price missing. The percentage uses the row count of the whole table.
pub fn over_estimation(table: &SalesTable) -> Result<OverEstimation> {
    let total_rows = table.height();

    let mut aggregates = vec![
        col(SOLD_OVER_ESTIMATION)
            .sum()
            .alias(SOLD_OVER_ESTIMATION_TOTAL),
    ];
    if total_rows > 0 {
        aggregates.push(
            (lit(100.0) * col(SOLD_OVER_ESTIMATION).sum().cast(DataType::Float64)
                / lit(total_rows as f64))
            .round(2)
            .alias(SOLD_OVER_ESTIMATION_PERCENTAGE),
        );
    }

    let df = table
        .lazy()
        .select([col(MMR), col(SELLING_PRICE)])
        .with_column(
            when(col(MMR).lt(col(SELLING_PRICE)))
                .then(lit(1i64))
                .otherwise(lit(0i64))
                .alias(SOLD_OVER_ESTIMATION),
        )
        .select(aggregates)
        .collect()
        .context("Failed to compute over-estimation rate")?;

    let percentage = if total_rows > 0 {
        scalar(&df, SOLD_OVER_ESTIMATION_PERCENTAGE)?.extract::<f64>()
    } else {
        None
    };

    Ok(OverEstimation {
        total_over: scalar(&df, SOLD_OVER_ESTIMATION_TOTAL)?
            .extract::<u64>()
            .unwrap_or(0),
        total_rows,
        percentage,
    })
}

/// Lowest and highest selling price of one make/model, plus its average
/// price per year.
///
/// Matching is exact and case-sensitive. Returns `None` when no sale with a
/// known price matches.
pub fn price_history(table: &SalesTable, make: &str, model: &str) -> Result<Option<PriceHistory>> {
    let subset = table
        .lazy()
        .select([col(YEAR), col(MAKE), col(MODEL), col(SELLING_PRICE)])
        .filter(col(MAKE).eq(lit(make)).and(col(MODEL).eq(lit(model))));

    let extremes = subset
        .clone()
        .select([
            col(SELLING_PRICE).count().alias(COUNT),
            col(SELLING_PRICE).min().alias(MIN_PRICE),
            col(SELLING_PRICE).max().alias(MAX_PRICE),
        ])
        .collect()
        .with_context(|| format!("Failed to compute price range for {make} {model}"))?;

    let (Some(min_price), Some(max_price)) = (
        scalar(&extremes, MIN_PRICE)?.extract::<f64>(),
        scalar(&extremes, MAX_PRICE)?.extract::<f64>(),
    ) else {
        tracing::info!("No priced sales found for {make} {model}");
        return Ok(None);
    };
    let sales = scalar(&extremes, COUNT)?.extract::<usize>().unwrap_or(0);

    let yearly = subset
        .group_by([col(YEAR)])
        .agg([col(SELLING_PRICE).mean().round(0).alias(AVG_PRICE)])
        .sort_by_exprs([col(YEAR)], SortMultipleOptions::default())
        .collect()
        .with_context(|| format!("Failed to average prices per year for {make} {model}"))?;

    Ok(Some(PriceHistory {
        make: make.to_owned(),
        model: model.to_owned(),
        sales,
        min_price,
        max_price,
        yearly,
    }))
}

/// First value of a single-row aggregate. Null comes back as `AnyValue::Null`.
fn scalar<'a>(df: &'a DataFrame, name: &str) -> Result<AnyValue<'a>> {
    df.column(name)?
        .get(0)
        .with_context(|| format!("Aggregate {name} produced no rows"))
}
