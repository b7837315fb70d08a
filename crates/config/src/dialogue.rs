//! Dialogue policy configuration
//!
//! Numeric limits the step catalog enforces, and the account snapshot the
//! prompts are computed from.

use serde::{Deserialize, Serialize};

use crate::constants::{account, enrollment, loan};
use crate::ConfigError;

/// Limits applied to loan answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPolicyConfig {
    /// Absolute cap on the loan amount
    #[serde(default = "default_absolute_max")]
    pub absolute_max: f64,

    /// Fraction of the vested balance that may be borrowed
    #[serde(default = "default_balance_fraction")]
    pub balance_fraction: f64,

    #[serde(default = "default_min_term_years")]
    pub min_term_years: u32,

    #[serde(default = "default_max_term_years")]
    pub max_term_years: u32,

    /// Annual rate for repayment estimates (0.085 = 8.5%)
    #[serde(default = "default_annual_interest_rate")]
    pub annual_interest_rate: f64,

    #[serde(default = "default_pay_periods_per_year")]
    pub pay_periods_per_year: u32,
}

fn default_absolute_max() -> f64 {
    loan::ABSOLUTE_MAX
}
fn default_balance_fraction() -> f64 {
    loan::BALANCE_FRACTION
}
fn default_min_term_years() -> u32 {
    loan::MIN_TERM_YEARS
}
fn default_max_term_years() -> u32 {
    loan::MAX_TERM_YEARS
}
fn default_annual_interest_rate() -> f64 {
    loan::ANNUAL_INTEREST_RATE
}
fn default_pay_periods_per_year() -> u32 {
    loan::PAY_PERIODS_PER_YEAR
}

impl Default for LoanPolicyConfig {
    fn default() -> Self {
        Self {
            absolute_max: default_absolute_max(),
            balance_fraction: default_balance_fraction(),
            min_term_years: default_min_term_years(),
            max_term_years: default_max_term_years(),
            annual_interest_rate: default_annual_interest_rate(),
            pay_periods_per_year: default_pay_periods_per_year(),
        }
    }
}

impl LoanPolicyConfig {
    /// Largest amount that passes both the cap and the balance rule
    pub fn max_available(&self, vested_balance: f64) -> f64 {
        self.absolute_max.min(vested_balance * self.balance_fraction)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.absolute_max <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "dialogue.loan.absolute_max".to_string(),
                message: format!("Must be positive, got {}", self.absolute_max),
            });
        }

        if !(self.balance_fraction > 0.0 && self.balance_fraction <= 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "dialogue.loan.balance_fraction".to_string(),
                message: format!("Must be in (0, 1], got {}", self.balance_fraction),
            });
        }

        if self.min_term_years == 0 || self.min_term_years > self.max_term_years {
            return Err(ConfigError::InvalidValue {
                field: "dialogue.loan.min_term_years".to_string(),
                message: format!(
                    "Term range {}..={} is empty or starts at zero",
                    self.min_term_years, self.max_term_years
                ),
            });
        }

        if !(0.0..1.0).contains(&self.annual_interest_rate) {
            return Err(ConfigError::InvalidValue {
                field: "dialogue.loan.annual_interest_rate".to_string(),
                message: format!("Must be in [0, 1), got {}", self.annual_interest_rate),
            });
        }

        if self.pay_periods_per_year == 0 {
            return Err(ConfigError::InvalidValue {
                field: "dialogue.loan.pay_periods_per_year".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

/// Limits applied to enrollment answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentPolicyConfig {
    #[serde(default = "default_min_contribution")]
    pub min_contribution_percent: f64,

    #[serde(default = "default_max_contribution")]
    pub max_contribution_percent: f64,
}

fn default_min_contribution() -> f64 {
    enrollment::MIN_CONTRIBUTION_PERCENT
}
fn default_max_contribution() -> f64 {
    enrollment::MAX_CONTRIBUTION_PERCENT
}

impl Default for EnrollmentPolicyConfig {
    fn default() -> Self {
        Self {
            min_contribution_percent: default_min_contribution(),
            max_contribution_percent: default_max_contribution(),
        }
    }
}

impl EnrollmentPolicyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min_contribution_percent, self.max_contribution_percent);
        if min <= 0.0 || max > 100.0 || min > max {
            return Err(ConfigError::InvalidValue {
                field: "dialogue.enrollment".to_string(),
                message: format!("Contribution range {}..={} must sit within (0, 100]", min, max),
            });
        }
        Ok(())
    }
}

/// Dialogue policy section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DialogueConfig {
    #[serde(default)]
    pub loan: LoanPolicyConfig,

    #[serde(default)]
    pub enrollment: EnrollmentPolicyConfig,
}

impl DialogueConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.loan.validate()?;
        self.enrollment.validate()
    }
}

/// Participant account snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Vested balance the loan and withdrawal rules are computed from
    #[serde(default = "default_vested_balance")]
    pub vested_balance: f64,

    /// Name used in greetings
    #[serde(default = "default_participant_name")]
    pub participant_name: String,
}

fn default_vested_balance() -> f64 {
    account::DEFAULT_VESTED_BALANCE
}
fn default_participant_name() -> String {
    account::DEFAULT_PARTICIPANT_NAME.to_string()
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            vested_balance: default_vested_balance(),
            participant_name: default_participant_name(),
        }
    }
}

impl AccountConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vested_balance < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "account.vested_balance".to_string(),
                message: format!("Must not be negative, got {}", self.vested_balance),
            });
        }
        Ok(())
    }
}
