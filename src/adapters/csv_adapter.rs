//! CSV price file adapter.
//!
//! Reads daily OHLCV files with a `Date,Open,High,Low,Close[,Adj Close],Volume`
//! header. Column positions come from the header row, since the adjusted-close
//! column is optional.

use crate::domain::error::DcasimError;
use crate::domain::price::{BasisSelection, PriceBasis, PricePoint, PriceSeries};
use crate::ports::data_port::PriceDataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct CsvDataAdapter {
    path: PathBuf,
}

struct ColumnMap {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    adj_close: Option<usize>,
    volume: usize,
}

impl CsvDataAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Pick the first existing file from an explicit candidate list.
    pub fn discover(candidates: &[PathBuf]) -> Result<Self, DcasimError> {
        for candidate in candidates {
            if candidate.exists() {
                return Ok(Self::new(candidate.clone()));
            }
        }
        Err(DcasimError::Data {
            reason: format!(
                "no price data file found among candidates: {}",
                candidates
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn map_columns(headers: &csv::StringRecord) -> Result<ColumnMap, DcasimError> {
        let find = |names: &[&str]| -> Option<usize> {
            headers.iter().position(|h| {
                let h = h.trim();
                names.iter().any(|n| h.eq_ignore_ascii_case(n))
            })
        };

        let required = |names: &[&str]| -> Result<usize, DcasimError> {
            find(names).ok_or_else(|| DcasimError::MissingColumn {
                column: names[0].to_string(),
            })
        };

        Ok(ColumnMap {
            date: required(&["Date"])?,
            open: required(&["Open"])?,
            high: required(&["High"])?,
            low: required(&["Low"])?,
            close: required(&["Close"])?,
            adj_close: find(&["Adj Close", "Adjusted Close"]),
            volume: required(&["Volume"])?,
        })
    }

    fn parse_field(record: &csv::StringRecord, index: usize, name: &str) -> Result<f64, DcasimError> {
        record
            .get(index)
            .ok_or_else(|| DcasimError::Data {
                reason: format!("row too short, missing {} value", name),
            })?
            .trim()
            .parse()
            .map_err(|e| DcasimError::Data {
                reason: format!("invalid {} value: {}", name, e),
            })
    }
}

impl PriceDataPort for CsvDataAdapter {
    fn load_series(&self, selection: BasisSelection) -> Result<PriceSeries, DcasimError> {
        let content = fs::read_to_string(&self.path).map_err(|e| DcasimError::Data {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| DcasimError::Data {
                reason: format!("CSV header error: {}", e),
            })?
            .clone();
        let columns = Self::map_columns(&headers)?;

        let basis = match selection {
            BasisSelection::Close => PriceBasis::Close,
            BasisSelection::AdjustedClose => {
                if columns.adj_close.is_none() {
                    return Err(DcasimError::MissingColumn {
                        column: "Adj Close".to_string(),
                    });
                }
                PriceBasis::AdjustedClose
            }
            BasisSelection::Auto => {
                if columns.adj_close.is_some() {
                    PriceBasis::AdjustedClose
                } else {
                    PriceBasis::Close
                }
            }
        };

        let mut points = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| DcasimError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(columns.date).ok_or_else(|| DcasimError::Data {
                reason: "row too short, missing Date value".into(),
            })?;
            let date =
                NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|e| {
                    DcasimError::Data {
                        reason: format!("invalid date {:?}: {}", date_str, e),
                    }
                })?;

            let adj_close = match columns.adj_close {
                Some(index) => Some(Self::parse_field(&record, index, "Adj Close")?),
                None => None,
            };

            points.push(PricePoint {
                date,
                open: Self::parse_field(&record, columns.open, "Open")?,
                high: Self::parse_field(&record, columns.high, "High")?,
                low: Self::parse_field(&record, columns.low, "Low")?,
                close: Self::parse_field(&record, columns.close, "Close")?,
                adj_close,
                volume: Self::parse_field(&record, columns.volume, "Volume")?,
            });
        }

        PriceSeries::new(points, basis)
    }
}
