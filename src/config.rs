use crate::error::{Result, ResultExt as _, SalesError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATASET: &str = "datasets/car_prices.csv";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ReportConfig {
    /// CSV file holding the sale records
    pub dataset: PathBuf,
    /// Rows printed for ranked results (models, manufacturers, sample)
    pub top_n: usize,
    /// Rows printed for unranked previews (transmission counts, full table)
    pub preview_rows: usize,
    /// Rows scanned by the CSV reader to infer column types, `None` scans
    /// the whole file
    pub infer_schema_length: Option<usize>,
    pub history_make: String,
    pub history_model: String,
    /// Print the per-year average price after the price extremes
    pub show_yearly_average: bool,
    /// Print the projected table once more at the end of the report
    pub show_full_table: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from(DEFAULT_DATASET),
            top_n: 10,
            preview_rows: 20,
            infer_schema_length: None,
            history_make: "Nissan".to_owned(),
            history_model: "GT-R".to_owned(),
            show_yearly_average: true,
            show_full_table: false,
        }
    }
}

impl ReportConfig {
    /// Reads a JSON configuration file. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SalesError::Config`] if the file is not valid JSON or holds
    /// invalid values, and an I/O error if it cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// See [`ReportConfig::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// # Errors
    ///
    /// Returns [`SalesError::Config`] naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(SalesError::Config("top_n must be at least 1".to_owned()));
        }
        if self.preview_rows == 0 {
            return Err(SalesError::Config(
                "preview_rows must be at least 1".to_owned(),
            ));
        }
        if self.infer_schema_length == Some(0) {
            return Err(SalesError::Config(
                "infer_schema_length must be at least 1".to_owned(),
            ));
        }
        if self.history_make.is_empty() || self.history_model.is_empty() {
            return Err(SalesError::Config(
                "history_make and history_model must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used)]
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_file_keeps_defaults() -> anyhow::Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, r#"{{ "top_n": 5, "history_model": "Altima" }}"#)?;

        let config = ReportConfig::load(file.path())?;
        assert_eq!(config.top_n, 5);
        assert_eq!(config.history_model, "Altima");
        assert_eq!(config.history_make, "Nissan");
        assert_eq!(config.preview_rows, 20);
        assert_eq!(config.dataset, PathBuf::from(DEFAULT_DATASET));
        Ok(())
    }

    #[test]
    fn test_zero_top_n_rejected() -> anyhow::Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, r#"{{ "top_n": 0 }}"#)?;

        let err = ReportConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, SalesError::Config(_)));
        Ok(())
    }

    #[test]
    fn test_malformed_json_is_config_error() -> anyhow::Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, "not json")?;

        let err = ReportConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
        Ok(())
    }

    #[test]
    fn test_missing_file_mentions_path() {
        let err = ReportConfig::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }

    #[test]
    fn test_load_or_default_without_path() -> anyhow::Result<()> {
        assert_eq!(ReportConfig::load_or_default(None)?, ReportConfig::default());
        Ok(())
    }
}
