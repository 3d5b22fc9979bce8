//! Billing configuration.

use config::ConfigError;
use serde::Deserialize;

/// Rate configuration used to price a parking session.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BillingConfig {
    /// Currency units charged per hour.
    #[serde(default = "default_hourly_rate")]
    pub hourly_rate: f64,

    /// Proration granularity in minutes. Partial intervals bill as whole ones.
    #[serde(default = "default_minimum_interval")]
    pub minimum_interval: u32,
}

const fn default_hourly_rate() -> f64 {
    10.0
}

const fn default_minimum_interval() -> u32 {
    15
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            hourly_rate: default_hourly_rate(),
            minimum_interval: default_minimum_interval(),
        }
    }
}

impl BillingConfig {
    /// Validate billing configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the rate is negative or not finite, or the
    /// interval is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.hourly_rate.is_finite() || self.hourly_rate < 0.0 {
            return Err(ConfigError::Message(format!(
                "billing.hourly_rate must be a finite non-negative number, got {}",
                self.hourly_rate
            )));
        }

        if self.minimum_interval == 0 {
            return Err(ConfigError::Message(
                "billing.minimum_interval cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_billing_config() {
        let config = BillingConfig::default();
        assert!((config.hourly_rate - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.minimum_interval, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_interval = BillingConfig {
            minimum_interval: 0,
            ..BillingConfig::default()
        };
        assert!(zero_interval.validate().is_err());

        let negative_rate = BillingConfig {
            hourly_rate: -1.0,
            ..BillingConfig::default()
        };
        assert!(negative_rate.validate().is_err());

        let nan_rate = BillingConfig {
            hourly_rate: f64::NAN,
            ..BillingConfig::default()
        };
        assert!(nan_rate.validate().is_err());
    }
}
