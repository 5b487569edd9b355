use chrono::{DateTime, Utc};

use domain_model::date::parse_api_date;
use domain_model::Timeframe;

use crate::error::{ContractError, Result};

/// Bounds the backend contract leaves open, supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRules {
    pub confidence_min: Option<f64>,
    pub confidence_max: Option<f64>,
    pub require_signal_family: bool,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            confidence_min: Some(0.0),
            confidence_max: None,
            require_signal_family: false,
        }
    }
}

impl ValidationRules {
    pub(crate) fn check_confidence(&self, value: f64) -> Result<()> {
        let below = self.confidence_min.is_some_and(|min| value < min);
        let above = self.confidence_max.is_some_and(|max| value > max);
        if !value.is_finite() || below || above {
            return Err(ContractError::ConfidenceOutOfBounds {
                value,
                min: self.confidence_min,
                max: self.confidence_max,
            });
        }
        Ok(())
    }
}

pub(crate) fn check_not_empty(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ContractError::EmptyField(field));
    }
    Ok(())
}

pub(crate) fn check_timeframe(value: &str) -> Result<Timeframe> {
    value.parse()
        .map_err(|_| ContractError::InvalidTimeframe(value.to_string()))
}

pub(crate) fn check_date(value: &str) -> Result<DateTime<Utc>> {
    parse_api_date(value)
        .map_err(|_| ContractError::InvalidDate(value.to_string()))
}
