#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use dcasim::domain::error::DcasimError;
use dcasim::domain::price::{BasisSelection, PriceBasis, PricePoint, PriceSeries};
use dcasim::domain::simulation::SimulationParams;
use dcasim::ports::data_port::PriceDataPort;
use std::path::PathBuf;

/// In-memory data port for pipeline tests that need no files on disk.
pub struct MockDataPort {
    pub points: Vec<PricePoint>,
    pub error: Option<String>,
}

impl MockDataPort {
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self {
            points,
            error: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            points: Vec::new(),
            error: Some(reason.to_string()),
        }
    }
}

impl PriceDataPort for MockDataPort {
    fn load_series(&self, selection: BasisSelection) -> Result<PriceSeries, DcasimError> {
        if let Some(reason) = &self.error {
            return Err(DcasimError::Data {
                reason: reason.clone(),
            });
        }
        let has_adj = self.points.iter().all(|p| p.adj_close.is_some());
        let basis = match selection {
            BasisSelection::Close => PriceBasis::Close,
            BasisSelection::AdjustedClose => {
                if !has_adj {
                    return Err(DcasimError::MissingColumn {
                        column: "Adj Close".to_string(),
                    });
                }
                PriceBasis::AdjustedClose
            }
            BasisSelection::Auto => {
                if has_adj && !self.points.is_empty() {
                    PriceBasis::AdjustedClose
                } else {
                    PriceBasis::Close
                }
            }
        };
        PriceSeries::new(self.points.clone(), basis)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_point(date_str: &str, close: f64) -> PricePoint {
    PricePoint {
        date: NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
        open: close - 1.0,
        high: close + 2.0,
        low: close - 2.0,
        close,
        adj_close: None,
        volume: 1000.0,
    }
}

/// Consecutive daily points starting 2024-01-01.
pub fn daily_points(closes: &[f64]) -> Vec<PricePoint> {
    let start = date(2024, 1, 1);
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint {
            date: start + Duration::days(i as i64),
            open: close,
            high: close,
            low: close,
            close,
            adj_close: None,
            volume: 1000.0,
        })
        .collect()
}

pub fn daily_series(closes: &[f64]) -> PriceSeries {
    PriceSeries::new(daily_points(closes), PriceBasis::Close).unwrap()
}

pub fn params(daily_amount: f64) -> SimulationParams {
    SimulationParams::new(daily_amount)
}

/// Write an OHLCV CSV (without Adj Close) into `dir` and return its path.
pub fn write_price_csv(dir: &tempfile::TempDir, name: &str, closes: &[f64]) -> PathBuf {
    let path = dir.path().join(name);
    let mut content = String::from("Date,Open,High,Low,Close,Volume\n");
    let start = date(2024, 1, 1);
    for (i, close) in closes.iter().enumerate() {
        let d = start + Duration::days(i as i64);
        content.push_str(&format!(
            "{},{:.2},{:.2},{:.2},{:.2},1000\n",
            d.format("%Y-%m-%d"),
            close - 1.0,
            close + 2.0,
            close - 2.0,
            close
        ));
    }
    std::fs::write(&path, content).unwrap();
    path
}

/// Same, with an Adj Close column offset below close by `adj_offset`.
pub fn write_adj_price_csv(
    dir: &tempfile::TempDir,
    name: &str,
    closes: &[f64],
    adj_offset: f64,
) -> PathBuf {
    let path = dir.path().join(name);
    let mut content = String::from("Date,Open,High,Low,Close,Adj Close,Volume\n");
    let start = date(2024, 1, 1);
    for (i, close) in closes.iter().enumerate() {
        let d = start + Duration::days(i as i64);
        content.push_str(&format!(
            "{},{:.2},{:.2},{:.2},{:.2},{:.2},1000\n",
            d.format("%Y-%m-%d"),
            close - 1.0,
            close + 2.0,
            close - 2.0,
            close,
            close - adj_offset
        ));
    }
    std::fs::write(&path, content).unwrap();
    path
}
