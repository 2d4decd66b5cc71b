//! Configuration validation.
//!
//! Validates all config fields before a simulation runs.

use crate::domain::error::DcasimError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_simulation_config(config: &dyn ConfigPort) -> Result<(), DcasimError> {
    validate_daily_amount(config)?;
    validate_days(config)?;
    validate_dates(config)?;
    validate_price_basis(config)?;
    validate_data_source(config)?;
    Ok(())
}

fn validate_daily_amount(config: &dyn ConfigPort) -> Result<(), DcasimError> {
    let value = config.get_double("simulation", "daily_amount", 0.0);
    if value <= 0.0 {
        return Err(DcasimError::ConfigInvalid {
            section: "simulation".to_string(),
            key: "daily_amount".to_string(),
            reason: "daily_amount must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_days(config: &dyn ConfigPort) -> Result<(), DcasimError> {
    if config.get_string("simulation", "days").is_none() {
        return Ok(());
    }
    let value = config.get_int("simulation", "days", 0);
    if value <= 0 {
        return Err(DcasimError::ConfigInvalid {
            section: "simulation".to_string(),
            key: "days".to_string(),
            reason: "days must be a positive integer".to_string(),
        });
    }
    Ok(())
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), DcasimError> {
    let start = parse_optional_date(config, "start_date")?;
    let end = parse_optional_date(config, "end_date")?;

    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(DcasimError::ConfigInvalid {
                section: "simulation".to_string(),
                key: "start_date".to_string(),
                reason: "start_date must not be after end_date".to_string(),
            });
        }
    }
    Ok(())
}

fn parse_optional_date(
    config: &dyn ConfigPort,
    field: &str,
) -> Result<Option<NaiveDate>, DcasimError> {
    match config.get_string("simulation", field) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d").map(Some).map_err(|_| {
            DcasimError::ConfigInvalid {
                section: "simulation".to_string(),
                key: field.to_string(),
                reason: format!("invalid {} format, expected YYYY-MM-DD", field),
            }
        }),
    }
}

fn validate_price_basis(config: &dyn ConfigPort) -> Result<(), DcasimError> {
    match config.get_string("data", "price_basis") {
        None => Ok(()),
        Some(s) => match s.to_lowercase().as_str() {
            "auto" | "adjusted" | "close" => Ok(()),
            _ => Err(DcasimError::ConfigInvalid {
                section: "data".to_string(),
                key: "price_basis".to_string(),
                reason: "price_basis must be one of auto, adjusted, close".to_string(),
            }),
        },
    }
}

fn validate_data_source(config: &dyn ConfigPort) -> Result<(), DcasimError> {
    let path = config.get_string("data", "path");
    let candidates = config.get_string("data", "candidates");

    match (path, candidates) {
        (Some(p), _) if !p.trim().is_empty() => Ok(()),
        (_, Some(c)) if c.split(',').any(|s| !s.trim().is_empty()) => Ok(()),
        _ => Err(DcasimError::ConfigMissing {
            section: "data".to_string(),
            key: "path".to_string(),
        }),
    }
}
