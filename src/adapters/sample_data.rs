//! Synthetic daily price data for testing and demos.
//!
//! Generates a geometric-Brownian-motion close series with plausible Bitcoin
//! volatility, wraps each close in an intraday range, and writes the result
//! as a standard OHLCV CSV file.

use crate::domain::error::DcasimError;
use crate::domain::price::PricePoint;
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

pub const DEFAULT_SEED: u64 = 42;

const INITIAL_PRICE: f64 = 35_000.0;
const PRICE_FLOOR: f64 = 1_000.0;
const DAILY_DRIFT: f64 = 0.0005;
const DAILY_VOLATILITY: f64 = 0.04;
const BASE_VOLUME: f64 = 25_000.0;

pub struct SampleDataGenerator {
    days: i64,
    seed: u64,
}

impl SampleDataGenerator {
    pub fn new(days: i64) -> Self {
        Self {
            days,
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Generate the daily series ending at `end_date`.
    pub fn generate(&self, end_date: NaiveDate) -> Result<Vec<PricePoint>, DcasimError> {
        if self.days <= 0 {
            return Err(DcasimError::InvalidParameter {
                name: "days".into(),
                reason: format!("must be positive, got {}", self.days),
            });
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let start_date = end_date - Duration::days(self.days - 1);

        let mut closes = Vec::with_capacity(self.days as usize);
        let mut price = INITIAL_PRICE;
        closes.push(price);
        for _ in 1..self.days {
            let shock = standard_normal(&mut rng);
            price = (price * (DAILY_DRIFT + DAILY_VOLATILITY * shock).exp()).max(PRICE_FLOOR);
            closes.push(price);
        }

        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                let intraday = rng.gen_range(0.02..0.08);
                let high = close * (1.0 + intraday * rng.gen_range(0.3..1.0));
                let low = close * (1.0 - intraday * rng.gen_range(0.3..1.0));
                let open = low + (high - low) * rng.gen_range(0.2..0.8);

                let swing = (close - open).abs() / open;
                let volume = BASE_VOLUME * (1.0 + swing * 10.0) * rng.gen_range(0.5..2.0);

                PricePoint {
                    date: start_date + Duration::days(i as i64),
                    open: round2(open),
                    high: round2(high),
                    low: round2(low),
                    close: round2(close),
                    adj_close: None,
                    volume: round2(volume),
                }
            })
            .collect();

        Ok(points)
    }

    /// Generate and write the series as a CSV file.
    pub fn write_csv(&self, path: &Path, end_date: NaiveDate) -> Result<Vec<PricePoint>, DcasimError> {
        let points = self.generate(end_date)?;

        let mut wtr = csv::Writer::from_path(path).map_err(|e| DcasimError::Data {
            reason: format!("failed to create {}: {}", path.display(), e),
        })?;
        wtr.write_record(["Date", "Open", "High", "Low", "Close", "Volume"])
            .map_err(|e| DcasimError::Data {
                reason: format!("CSV write error: {}", e),
            })?;
        for p in &points {
            wtr.write_record([
                p.date.format("%Y-%m-%d").to_string(),
                format!("{:.2}", p.open),
                format!("{:.2}", p.high),
                format!("{:.2}", p.low),
                format!("{:.2}", p.close),
                format!("{:.2}", p.volume),
            ])
            .map_err(|e| DcasimError::Data {
                reason: format!("CSV write error: {}", e),
            })?;
        }
        wtr.flush().map_err(|e| DcasimError::Data {
            reason: format!("CSV write error: {}", e),
        })?;

        Ok(points)
    }
}

/// Standard normal draw via the Box-Muller transform.
fn standard_normal(rng: &mut StdRng) -> f64 {
    let u1: f64 = 1.0 - rng.r#gen::<f64>();
    let u2: f64 = rng.r#gen();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price::{BasisSelection, PriceBasis, PriceSeries};
    use crate::ports::data_port::PriceDataPort;

    fn end_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    #[test]
    fn generates_requested_number_of_days() {
        let points = SampleDataGenerator::new(365).generate(end_date()).unwrap();
        assert_eq!(points.len(), 365);
        assert_eq!(points.last().unwrap().date, end_date());
        assert_eq!(
            points.first().unwrap().date,
            end_date() - Duration::days(364)
        );
    }

    #[test]
    fn deterministic_for_fixed_seed() {
        let a = SampleDataGenerator::new(100).generate(end_date()).unwrap();
        let b = SampleDataGenerator::new(100).generate(end_date()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let a = SampleDataGenerator::new(100).generate(end_date()).unwrap();
        let b = SampleDataGenerator::new(100)
            .with_seed(7)
            .generate(end_date())
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn respects_price_floor_and_intraday_ordering() {
        let points = SampleDataGenerator::new(500).generate(end_date()).unwrap();
        for p in &points {
            assert!(p.close >= PRICE_FLOOR);
            assert!(p.low <= p.open && p.open <= p.high);
            assert!(p.low <= p.close * 1.0001);
            assert!(p.volume > 0.0);
        }
    }

    #[test]
    fn zero_days_rejected() {
        let err = SampleDataGenerator::new(0).generate(end_date()).unwrap_err();
        assert!(matches!(err, DcasimError::InvalidParameter { .. }));
    }

    #[test]
    fn generated_points_form_a_valid_series() {
        let points = SampleDataGenerator::new(30).generate(end_date()).unwrap();
        let series = PriceSeries::new(points, PriceBasis::Close).unwrap();
        assert_eq!(series.len(), 30);
    }

    #[test]
    fn write_csv_round_trips_through_the_adapter() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("sample.csv");

        let written = SampleDataGenerator::new(60).write_csv(&path, end_date()).unwrap();

        let adapter = crate::adapters::csv_adapter::CsvDataAdapter::new(path);
        let series = adapter.load_series(BasisSelection::Auto).unwrap();
        assert_eq!(series.len(), written.len());
        assert_eq!(series.basis(), PriceBasis::Close);
        assert_eq!(series.points()[0].date, written[0].date);
    }
}
