//! Daily-investment simulation: replays a fixed purchase over a price
//! window and accumulates the resulting position.

use super::error::DcasimError;
use super::price::{PriceBasis, PriceSeries};
use chrono::{Duration, NaiveDate};

/// Parameters for one simulation run.
///
/// `days` takes precedence over `end_date` when both are set: the window
/// becomes `[start, start + days]` in calendar days. Omitted bounds default
/// to the series' own first/last dates.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    pub daily_amount: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub days: Option<i64>,
}

impl SimulationParams {
    pub fn new(daily_amount: f64) -> Self {
        Self {
            daily_amount,
            start_date: None,
            end_date: None,
            days: None,
        }
    }
}

/// One day of the simulated strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentRecord {
    pub date: NaiveDate,
    pub price: f64,
    pub daily_investment: f64,
    pub btc_purchased: f64,
    pub cumulative_investment: f64,
    pub cumulative_btc: f64,
    pub portfolio_value: f64,
    pub total_return: f64,
    pub return_pct: f64,
}

/// Full simulation output, ordered by date. Immutable after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentHistory {
    records: Vec<InvestmentRecord>,
    basis: PriceBasis,
}

impl InvestmentHistory {
    pub fn records(&self) -> &[InvestmentRecord] {
        &self.records
    }

    pub fn basis(&self) -> PriceBasis {
        self.basis
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&InvestmentRecord> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&InvestmentRecord> {
        self.records.last()
    }
}

/// Resolve the effective inclusive date window for the given parameters.
pub fn resolve_window(
    series: &PriceSeries,
    params: &SimulationParams,
) -> Result<(NaiveDate, NaiveDate), DcasimError> {
    let (series_first, series_last) = match (series.first_date(), series.last_date()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(DcasimError::Data {
                reason: "price series is empty".into(),
            });
        }
    };

    let start = params.start_date.unwrap_or(series_first);
    let end = match params.days {
        Some(days) => start + Duration::days(days),
        None => params.end_date.unwrap_or(series_last),
    };

    Ok((start, end))
}

/// Run the daily-investment simulation.
///
/// Pure function: no side effects, deterministic for identical inputs.
pub fn simulate(
    series: &PriceSeries,
    params: &SimulationParams,
) -> Result<InvestmentHistory, DcasimError> {
    if !params.daily_amount.is_finite() || params.daily_amount <= 0.0 {
        return Err(DcasimError::InvalidParameter {
            name: "daily_amount".into(),
            reason: format!("must be positive, got {}", params.daily_amount),
        });
    }
    if let Some(days) = params.days {
        if days <= 0 {
            return Err(DcasimError::InvalidParameter {
                name: "days".into(),
                reason: format!("must be positive, got {}", days),
            });
        }
    }

    let (start, end) = resolve_window(series, params)?;
    let window = series.window(start, end);
    if window.is_empty() {
        return Err(DcasimError::EmptyRange { start, end });
    }

    let basis = series.basis();
    let mut records = Vec::with_capacity(window.len());
    let mut cumulative_investment = 0.0_f64;
    let mut cumulative_btc = 0.0_f64;

    for point in window {
        let price = point.price(basis);
        if price <= 0.0 {
            return Err(DcasimError::NonPositivePrice {
                date: point.date,
                price,
            });
        }

        let btc_purchased = params.daily_amount / price;
        cumulative_investment += params.daily_amount;
        cumulative_btc += btc_purchased;

        let portfolio_value = cumulative_btc * price;
        let total_return = portfolio_value - cumulative_investment;
        let return_pct = if cumulative_investment > 0.0 {
            total_return / cumulative_investment * 100.0
        } else {
            0.0
        };

        records.push(InvestmentRecord {
            date: point.date,
            price,
            daily_investment: params.daily_amount,
            btc_purchased,
            cumulative_investment,
            cumulative_btc,
            portfolio_value,
            total_return,
            return_pct,
        });
    }

    Ok(InvestmentHistory { records, basis })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price::PricePoint;

    fn daily_series(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let points = closes
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
            .collect();
        PriceSeries::new(points, PriceBasis::Close).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn three_point_scenario() {
        let series = daily_series(&[100.0, 200.0, 50.0]);
        let history = simulate(&series, &SimulationParams::new(10.0)).unwrap();

        assert_eq!(history.len(), 3);
        let r = history.records();

        assert_eq!(r[0].cumulative_investment, 10.0);
        assert_eq!(r[1].cumulative_investment, 20.0);
        assert_eq!(r[2].cumulative_investment, 30.0);

        assert!((r[0].btc_purchased - 0.1).abs() < 1e-12);
        assert!((r[1].btc_purchased - 0.05).abs() < 1e-12);
        assert!((r[2].btc_purchased - 0.2).abs() < 1e-12);

        assert!((r[0].cumulative_btc - 0.1).abs() < 1e-12);
        assert!((r[1].cumulative_btc - 0.15).abs() < 1e-12);
        assert!((r[2].cumulative_btc - 0.35).abs() < 1e-12);

        assert!((r[0].portfolio_value - 10.0).abs() < 1e-12);
        assert!((r[1].portfolio_value - 30.0).abs() < 1e-12);
        assert!((r[2].portfolio_value - 17.5).abs() < 1e-12);

        assert!((r[0].total_return - 0.0).abs() < 1e-12);
        assert!((r[1].total_return - 10.0).abs() < 1e-12);
        assert!((r[2].total_return - (-12.5)).abs() < 1e-12);

        assert!((r[0].return_pct - 0.0).abs() < 1e-9);
        assert!((r[1].return_pct - 50.0).abs() < 1e-9);
        assert!((r[2].return_pct - (-41.666_666_666_666_664)).abs() < 1e-9);
    }

    #[test]
    fn non_positive_daily_amount_rejected() {
        let series = daily_series(&[100.0]);

        let err = simulate(&series, &SimulationParams::new(0.0)).unwrap_err();
        assert!(matches!(err, DcasimError::InvalidParameter { name, .. } if name == "daily_amount"));

        let err = simulate(&series, &SimulationParams::new(-5.0)).unwrap_err();
        assert!(matches!(err, DcasimError::InvalidParameter { name, .. } if name == "daily_amount"));
    }

    #[test]
    fn nan_daily_amount_rejected() {
        let series = daily_series(&[100.0]);
        let err = simulate(&series, &SimulationParams::new(f64::NAN)).unwrap_err();
        assert!(matches!(err, DcasimError::InvalidParameter { .. }));
    }

    #[test]
    fn zero_days_rejected() {
        let series = daily_series(&[100.0, 110.0]);
        let params = SimulationParams {
            days: Some(0),
            ..SimulationParams::new(10.0)
        };
        let err = simulate(&series, &params).unwrap_err();
        assert!(matches!(err, DcasimError::InvalidParameter { name, .. } if name == "days"));
    }

    #[test]
    fn range_outside_series_is_empty_range() {
        let series = daily_series(&[100.0, 110.0, 120.0]);
        let params = SimulationParams {
            start_date: Some(date(2030, 1, 1)),
            end_date: Some(date(2030, 12, 31)),
            ..SimulationParams::new(10.0)
        };
        let err = simulate(&series, &params).unwrap_err();
        assert!(matches!(err, DcasimError::EmptyRange { .. }));
    }

    #[test]
    fn days_takes_precedence_over_end_date() {
        let series = daily_series(&[100.0; 10]);
        let params = SimulationParams {
            start_date: Some(date(2024, 1, 1)),
            end_date: Some(date(2024, 1, 10)),
            days: Some(2),
            ..SimulationParams::new(10.0)
        };
        let history = simulate(&series, &params).unwrap();
        // days = 2 means [Jan 1, Jan 3] inclusive: three daily rows.
        assert_eq!(history.len(), 3);
        assert_eq!(history.last().unwrap().date, date(2024, 1, 3));
    }

    #[test]
    fn window_defaults_to_full_series() {
        let series = daily_series(&[100.0, 110.0, 120.0, 130.0]);
        let history = simulate(&series, &SimulationParams::new(10.0)).unwrap();
        assert_eq!(history.len(), 4);
    }

    #[test]
    fn explicit_date_window_filters_inclusively() {
        let series = daily_series(&[100.0, 110.0, 120.0, 130.0, 140.0]);
        let params = SimulationParams {
            start_date: Some(date(2024, 1, 2)),
            end_date: Some(date(2024, 1, 4)),
            ..SimulationParams::new(10.0)
        };
        let history = simulate(&series, &params).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history.first().unwrap().date, date(2024, 1, 2));
        assert_eq!(history.last().unwrap().date, date(2024, 1, 4));
    }

    #[test]
    fn zero_price_fails() {
        let series = daily_series(&[100.0, 0.0, 120.0]);
        let err = simulate(&series, &SimulationParams::new(10.0)).unwrap_err();
        assert!(
            matches!(err, DcasimError::NonPositivePrice { date: d, .. } if d == date(2024, 1, 2))
        );
    }

    #[test]
    fn negative_price_fails() {
        let series = daily_series(&[100.0, -3.0]);
        let err = simulate(&series, &SimulationParams::new(10.0)).unwrap_err();
        assert!(matches!(err, DcasimError::NonPositivePrice { price, .. } if price == -3.0));
    }

    #[test]
    fn simulate_is_deterministic() {
        let series = daily_series(&[40_000.0, 41_500.0, 39_800.0, 42_250.0]);
        let params = SimulationParams::new(25.0);

        let a = simulate(&series, &params).unwrap();
        let b = simulate(&series, &params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn adjusted_basis_drives_arithmetic() {
        let start = date(2024, 1, 1);
        let points = vec![
            PricePoint {
                date: start,
                open: 100.0,
                high: 100.0,
                low: 100.0,
                close: 100.0,
                adj_close: Some(50.0),
                volume: 0.0,
            },
        ];
        let series = PriceSeries::new(points, PriceBasis::AdjustedClose).unwrap();
        let history = simulate(&series, &SimulationParams::new(10.0)).unwrap();

        let record = history.first().unwrap();
        assert_eq!(record.price, 50.0);
        assert!((record.btc_purchased - 0.2).abs() < 1e-12);
        assert_eq!(history.basis(), PriceBasis::AdjustedClose);
    }

    #[test]
    fn resolve_window_defaults_and_days() {
        let series = daily_series(&[100.0, 110.0, 120.0]);

        let (start, end) = resolve_window(&series, &SimulationParams::new(10.0)).unwrap();
        assert_eq!(start, date(2024, 1, 1));
        assert_eq!(end, date(2024, 1, 3));

        let params = SimulationParams {
            start_date: Some(date(2024, 1, 2)),
            days: Some(5),
            ..SimulationParams::new(10.0)
        };
        let (start, end) = resolve_window(&series, &params).unwrap();
        assert_eq!(start, date(2024, 1, 2));
        assert_eq!(end, date(2024, 1, 7));
    }
}
