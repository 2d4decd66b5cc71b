//! Price data access port trait.

use crate::domain::error::DcasimError;
use crate::domain::price::{BasisSelection, PriceSeries};
use chrono::NaiveDate;

pub trait PriceDataPort {
    fn load_series(&self, selection: BasisSelection) -> Result<PriceSeries, DcasimError>;

    /// (first date, last date, record count) of the underlying data, or
    /// `None` when the source holds no rows. Default implementation loads
    /// the full series.
    fn data_range(&self) -> Result<Option<(NaiveDate, NaiveDate, usize)>, DcasimError> {
        let series = self.load_series(BasisSelection::Auto)?;
        match (series.first_date(), series.last_date()) {
            (Some(first), Some(last)) => Ok(Some((first, last, series.len()))),
            _ => Ok(None),
        }
    }
}
