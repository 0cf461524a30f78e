//! Console rendering of query results.
//!
//! Tables are drawn with comfy-table and cut to a row limit, ending with an
//! `only showing top N rows` note when rows were left out.

use crate::config::ReportConfig;
use crate::sales::{LoadedDataset, OverEstimation, PriceHistory, SalesTable};
use crate::sales::types::{SOLD_OVER_ESTIMATION_PERCENTAGE, SOLD_OVER_ESTIMATION_TOTAL};
use anyhow::Result;
use comfy_table::{Cell, CellAlignment, Table};
use polars::prelude::*;
use std::fmt::Write as _;
use std::io::Write;

/// Writes report sections to any [`Write`] sink.
pub struct Reporter<W: Write> {
    out: W,
    top_n: usize,
    preview_rows: usize,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, top_n: usize, preview_rows: usize) -> Self {
        Self {
            out,
            top_n,
            preview_rows,
        }
    }

    pub fn from_config(out: W, config: &ReportConfig) -> Self {
        Self::new(out, config.top_n, config.preview_rows)
    }

    pub fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    /// Row count, schema and a sample of the projected rows.
    pub fn overview(&mut self, loaded: &LoadedDataset, table: &SalesTable) -> Result<()> {
        writeln!(self.out, "Dataset count: {}", loaded.row_count())?;
        writeln!(self.out, "Dataset Schema:")?;
        write!(self.out, "{}", describe_schema(&loaded.df.schema())?)?;
        writeln!(self.out, "Dataset sample")?;
        self.ranked(table.frame())
    }

    /// A ranked result, cut to `top_n` rows.
    pub fn ranked(&mut self, df: &DataFrame) -> Result<()> {
        self.frame(df, self.top_n)
    }

    /// An unranked preview, cut to `preview_rows` rows.
    pub fn preview(&mut self, df: &DataFrame) -> Result<()> {
        self.frame(df, self.preview_rows)
    }

    pub fn frame(&mut self, df: &DataFrame, limit: usize) -> Result<()> {
        let rendered = render_frame(df, limit)?;
        write!(self.out, "{rendered}")?;
        Ok(())
    }

    pub fn over_estimation(&mut self, result: &OverEstimation) -> Result<()> {
        let mut table = Table::new();
        table.set_header(vec![
            SOLD_OVER_ESTIMATION_TOTAL,
            SOLD_OVER_ESTIMATION_PERCENTAGE,
        ]);
        table.add_row(vec![
            Cell::new(result.total_over).set_alignment(CellAlignment::Right),
            Cell::new(
                result
                    .percentage
                    .map_or_else(|| "null".to_owned(), format_float),
            )
            .set_alignment(CellAlignment::Right),
        ]);
        writeln!(self.out, "{table}")?;
        Ok(())
    }

    /// Price extremes for a make/model and, when asked, the yearly averages.
    pub fn price_history(
        &mut self,
        make: &str,
        model: &str,
        history: Option<&PriceHistory>,
        show_yearly: bool,
    ) -> Result<()> {
        writeln!(self.out, "{make} {model}")?;
        let Some(history) = history else {
            writeln!(self.out, "No sales found for {make} {model}")?;
            return Ok(());
        };
        writeln!(self.out, "Lowest price: {}", format_float(history.min_price))?;
        writeln!(self.out, "Highest price: {}", format_float(history.max_price))?;
        if show_yearly {
            writeln!(self.out, "Average price over the years:")?;
            self.preview(&history.yearly)?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Draws at most `limit` rows of `df` as a text table.
pub fn render_frame(df: &DataFrame, limit: usize) -> Result<String> {
    let mut table = Table::new();
    table.set_header(df.get_column_names().iter().map(|name| name.as_str()));

    let shown = df.height().min(limit);
    for row in 0..shown {
        let mut cells = Vec::with_capacity(df.width());
        for column in df.get_columns() {
            let alignment = if column.dtype().is_primitive_numeric() {
                CellAlignment::Right
            } else {
                CellAlignment::Left
            };
            cells.push(Cell::new(format_value(&column.get(row)?)).set_alignment(alignment));
        }
        table.add_row(cells);
    }

    let mut out = format!("{table}\n");
    if df.height() > shown {
        writeln!(out, "only showing top {shown} rows")?;
    }
    Ok(out)
}

/// Schema as an indented tree, one line per column.
pub fn describe_schema(schema: &Schema) -> Result<String> {
    let mut out = String::from("root\n");
    for (name, dtype) in schema.iter() {
        writeln!(out, " |-- {name}: {dtype} (nullable = true)")?;
    }
    Ok(out)
}

fn format_value(value: &AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => "null".to_owned(),
        AnyValue::String(s) => (*s).to_owned(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Float64(v) => format_float(*v),
        AnyValue::Float32(v) => format_float(f64::from(*v)),
        other => other.to_string(),
    }
}

/// Whole numbers keep one decimal (`42000.0`), others print as-is.
pub fn format_float(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        df!(
            "make" => ["Kia", "Ford", "BMW"],
            "total" => [3.0, 2.5, 1.0],
        )
        .expect("valid frame")
    }

    #[test]
    fn test_render_frame_limits_rows() -> Result<()> {
        let rendered = render_frame(&sample(), 2)?;
        assert!(rendered.contains("Kia"));
        assert!(rendered.contains("Ford"));
        assert!(!rendered.contains("BMW"));
        assert!(rendered.contains("only showing top 2 rows"));
        Ok(())
    }

    #[test]
    fn test_render_frame_without_truncation_note() -> Result<()> {
        let rendered = render_frame(&sample(), 10)?;
        assert!(rendered.contains("BMW"));
        assert!(rendered.contains("2.5"));
        assert!(!rendered.contains("only showing"));
        Ok(())
    }

    #[test]
    fn test_describe_schema() -> Result<()> {
        let schema = sample().schema().clone();
        let text = describe_schema(&schema)?;
        assert!(text.starts_with("root\n"));
        assert!(text.contains(" |-- make: str (nullable = true)"));
        assert!(text.contains(" |-- total: f64"));
        Ok(())
    }

    #[test]
    fn test_numeric_columns_right_aligned() -> Result<()> {
        let rendered = render_frame(&sample(), 10)?;
        // "total" is wider than its values, so alignment shows in the padding
        assert!(rendered.contains("   3.0 "), "{rendered}");
        assert!(rendered.contains(" Kia  "), "{rendered}");
        Ok(())
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(42000.0), "42000.0");
        assert_eq!(format_float(32.35), "32.35");
        assert_eq!(format_float(f64::NAN), "NaN");
    }

    #[test]
    fn test_missing_history_is_reported_not_fatal() -> Result<()> {
        let mut reporter = Reporter::new(Vec::new(), 10, 20);
        reporter.price_history("Nissan", "GT-R", None, true)?;
        let text = String::from_utf8(reporter.into_inner())?;
        assert!(text.contains("No sales found for Nissan GT-R"));
        Ok(())
    }

    #[test]
    fn test_over_estimation_null_percentage() -> Result<()> {
        let mut reporter = Reporter::new(Vec::new(), 10, 20);
        reporter.over_estimation(&OverEstimation {
            total_over: 0,
            total_rows: 0,
            percentage: None,
        })?;
        let text = String::from_utf8(reporter.into_inner())?;
        assert!(text.contains(SOLD_OVER_ESTIMATION_PERCENTAGE));
        assert!(text.contains("null"));
        Ok(())
    }
}
