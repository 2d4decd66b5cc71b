//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for dcasim.
#[derive(Debug, thiserror::Error)]
pub enum DcasimError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("no price data between {start} and {end}")]
    EmptyRange { start: NaiveDate, end: NaiveDate },

    #[error("non-positive price {price} on {date}")]
    NonPositivePrice { date: NaiveDate, price: f64 },

    #[error("no BTC acquired, average purchase price is undefined")]
    ZeroHoldings,

    #[error("no simulation history to summarize")]
    EmptyHistory,

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("missing required column {column}")]
    MissingColumn { column: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&DcasimError> for std::process::ExitCode {
    fn from(err: &DcasimError) -> Self {
        let code: u8 = match err {
            DcasimError::Io(_) => 1,
            DcasimError::ConfigParse { .. }
            | DcasimError::ConfigMissing { .. }
            | DcasimError::ConfigInvalid { .. } => 2,
            DcasimError::Data { .. } | DcasimError::MissingColumn { .. } => 3,
            DcasimError::InvalidParameter { .. } => 4,
            DcasimError::EmptyRange { .. }
            | DcasimError::NonPositivePrice { .. }
            | DcasimError::ZeroHoldings
            | DcasimError::EmptyHistory => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_offending_value() {
        let err = DcasimError::NonPositivePrice {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            price: -5.0,
        };
        assert_eq!(err.to_string(), "non-positive price -5 on 2024-03-01");

        let err = DcasimError::EmptyRange {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "no price data between 2024-01-01 and 2024-01-31"
        );
    }

    #[test]
    fn config_errors_include_section_and_key() {
        let err = DcasimError::ConfigInvalid {
            section: "simulation".into(),
            key: "daily_amount".into(),
            reason: "daily_amount must be positive".into(),
        };
        assert!(err.to_string().contains("[simulation] daily_amount"));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = DcasimError::from(io);
        assert!(matches!(err, DcasimError::Io(_)));
    }
}
