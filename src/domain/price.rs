//! Daily OHLCV price representation and the ordered series the simulator
//! consumes.

use super::error::DcasimError;
use chrono::NaiveDate;

/// Which column a series' working prices were taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBasis {
    AdjustedClose,
    Close,
}

impl std::fmt::Display for PriceBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceBasis::AdjustedClose => write!(f, "adjusted close"),
            PriceBasis::Close => write!(f, "close"),
        }
    }
}

/// Caller's choice of price basis when loading a series.
///
/// `Auto` picks adjusted close when the source carries that column and falls
/// back to close otherwise; either way the resolved [`PriceBasis`] is
/// recorded on the series rather than decided silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BasisSelection {
    #[default]
    Auto,
    AdjustedClose,
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: Option<f64>,
    pub volume: f64,
}

impl PricePoint {
    /// Working price under the given basis. A point without an adjusted
    /// close falls back to close even under `AdjustedClose`; loaders that
    /// resolve a basis guarantee the column is present series-wide.
    pub fn price(&self, basis: PriceBasis) -> f64 {
        match basis {
            PriceBasis::AdjustedClose => self.adj_close.unwrap_or(self.close),
            PriceBasis::Close => self.close,
        }
    }
}

/// Ordered daily price series. Dates are strictly ascending and unique;
/// gaps are fine — the simulation treats whatever rows exist as "days".
#[derive(Debug, Clone)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
    basis: PriceBasis,
}

impl PriceSeries {
    /// Build a series from unordered points. Sorts by date and rejects
    /// duplicate dates.
    pub fn new(mut points: Vec<PricePoint>, basis: PriceBasis) -> Result<Self, DcasimError> {
        points.sort_by_key(|p| p.date);
        for pair in points.windows(2) {
            if pair[0].date == pair[1].date {
                return Err(DcasimError::Data {
                    reason: format!("duplicate date {} in price series", pair[0].date),
                });
            }
        }
        Ok(Self { points, basis })
    }

    pub fn basis(&self) -> PriceBasis {
        self.basis
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Rows with date in `[start, end]`, both bounds inclusive.
    pub fn window(&self, start: NaiveDate, end: NaiveDate) -> &[PricePoint] {
        let lo = self.points.partition_point(|p| p.date < start);
        let hi = self.points.partition_point(|p| p.date <= end);
        &self.points[lo..hi]
    }

    /// Most recent close, for data-info display.
    pub fn latest_close(&self) -> Option<f64> {
        self.points.last().map(|p| p.close)
    }

    /// (min, max) over closes, for data-info display.
    pub fn close_range(&self) -> Option<(f64, f64)> {
        if self.points.is_empty() {
            return None;
        }
        let min = self.points.iter().map(|p| p.close).fold(f64::INFINITY, f64::min);
        let max = self
            .points
            .iter()
            .map(|p| p.close)
            .fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}
