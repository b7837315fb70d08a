//! Numeric answer policies
//!
//! Checks applied to an extracted number before a step accepts it. Each
//! rejection maps to one `StepErrorKind`, so the step prompt can explain
//! exactly what was wrong.

use plan_assistant_config::{AccountConfig, EnrollmentPolicyConfig, LoanPolicyConfig};
use plan_assistant_core::StepErrorKind;
use plan_assistant_text_processing::{is_hedged, mentions_months};

/// Rule set attached to a numeric step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericPolicy {
    /// Positive, at most `absolute_max`, at most `balance_fraction` of the balance
    LoanAmount {
        absolute_max: f64,
        balance_fraction: f64,
        vested_balance: f64,
    },
    /// Whole years in `min..=max`, never phrased in months
    TermYears { min: u32, max: u32 },
    /// Exact percentage in `min..=max`
    Percentage { min: f64, max: f64 },
    /// Positive, at most the vested balance
    WithdrawalAmount { vested_balance: f64 },
}

impl NumericPolicy {
    pub fn loan_amount(policy: &LoanPolicyConfig, account: &AccountConfig) -> Self {
        NumericPolicy::LoanAmount {
            absolute_max: policy.absolute_max,
            balance_fraction: policy.balance_fraction,
            vested_balance: account.vested_balance,
        }
    }

    pub fn term_years(policy: &LoanPolicyConfig) -> Self {
        NumericPolicy::TermYears {
            min: policy.min_term_years,
            max: policy.max_term_years,
        }
    }

    pub fn contribution(policy: &EnrollmentPolicyConfig) -> Self {
        NumericPolicy::Percentage {
            min: policy.min_contribution_percent,
            max: policy.max_contribution_percent,
        }
    }

    pub fn withdrawal_amount(account: &AccountConfig) -> Self {
        NumericPolicy::WithdrawalAmount {
            vested_balance: account.vested_balance,
        }
    }

    /// Accept or reject `value`, extracted from `text`
    pub fn check(&self, value: f64, text: &str) -> Result<f64, StepErrorKind> {
        match *self {
            NumericPolicy::LoanAmount {
                absolute_max,
                balance_fraction,
                vested_balance,
            } => {
                if value <= 0.0 {
                    Err(StepErrorKind::ZeroOrNegative)
                } else if value > absolute_max {
                    Err(StepErrorKind::OverMax)
                } else if value > vested_balance * balance_fraction {
                    Err(StepErrorKind::OverBalance)
                } else {
                    Ok(value)
                }
            },
            NumericPolicy::TermYears { min, max } => {
                if mentions_months(text) {
                    return Err(StepErrorKind::WrongUnit);
                }
                let whole = value.fract() == 0.0;
                if whole && value >= f64::from(min) && value <= f64::from(max) {
                    Ok(value)
                } else {
                    Err(StepErrorKind::OutOfRange)
                }
            },
            NumericPolicy::Percentage { min, max } => {
                if is_hedged(text) {
                    Err(StepErrorKind::Ambiguous)
                } else if value < min || value > max {
                    Err(StepErrorKind::OutOfRange)
                } else {
                    Ok(value)
                }
            },
            NumericPolicy::WithdrawalAmount { vested_balance } => {
                if value <= 0.0 {
                    Err(StepErrorKind::ZeroOrNegative)
                } else if value > vested_balance {
                    Err(StepErrorKind::OverBalance)
                } else {
                    Ok(value)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loan_amount() -> NumericPolicy {
        NumericPolicy::loan_amount(&LoanPolicyConfig::default(), &AccountConfig::default())
    }

    #[test]
    fn test_loan_amount_boundaries() {
        let policy = loan_amount();
        assert_eq!(policy.check(50_000.0, "50000"), Ok(50_000.0));
        assert_eq!(policy.check(50_001.0, "50001"), Err(StepErrorKind::OverMax));
        assert_eq!(policy.check(0.0, "0"), Err(StepErrorKind::ZeroOrNegative));
        assert_eq!(policy.check(-500.0, "-500"), Err(StepErrorKind::ZeroOrNegative));
        assert_eq!(policy.check(5_000.0, "5000"), Ok(5_000.0));
    }

    #[test]
    fn test_loan_amount_balance_rule() {
        let account = AccountConfig {
            vested_balance: 40_000.0,
            ..Default::default()
        };
        let policy = NumericPolicy::loan_amount(&LoanPolicyConfig::default(), &account);
        assert_eq!(policy.check(20_000.0, "20000"), Ok(20_000.0));
        assert_eq!(policy.check(20_001.0, "20001"), Err(StepErrorKind::OverBalance));
        // The cap is checked first
        assert_eq!(policy.check(60_000.0, "60000"), Err(StepErrorKind::OverMax));
    }

    #[test]
    fn test_term_years() {
        let policy = NumericPolicy::term_years(&LoanPolicyConfig::default());
        assert_eq!(policy.check(5.0, "5"), Ok(5.0));
        assert_eq!(policy.check(1.0, "one year"), Ok(1.0));
        assert_eq!(policy.check(60.0, "60 months"), Err(StepErrorKind::WrongUnit));
        assert_eq!(policy.check(6.0, "6 months"), Err(StepErrorKind::WrongUnit));
        assert_eq!(policy.check(6.0, "6"), Err(StepErrorKind::OutOfRange));
        assert_eq!(policy.check(0.0, "0"), Err(StepErrorKind::OutOfRange));
        assert_eq!(policy.check(2.5, "2.5 years"), Err(StepErrorKind::OutOfRange));
    }

    #[test]
    fn test_contribution_percentage() {
        let policy = NumericPolicy::contribution(&EnrollmentPolicyConfig::default());
        assert_eq!(policy.check(6.0, "6%"), Ok(6.0));
        assert_eq!(policy.check(100.0, "100"), Ok(100.0));
        assert_eq!(policy.check(6.0, "about 6%"), Err(StepErrorKind::Ambiguous));
        assert_eq!(policy.check(0.0, "0"), Err(StepErrorKind::OutOfRange));
        assert_eq!(policy.check(101.0, "101"), Err(StepErrorKind::OutOfRange));
    }

    #[test]
    fn test_withdrawal_amount() {
        let policy = NumericPolicy::withdrawal_amount(&AccountConfig::default());
        assert_eq!(policy.check(1_000.0, "1000"), Ok(1_000.0));
        assert_eq!(policy.check(125_000.0, "125000"), Ok(125_000.0));
        assert_eq!(
            policy.check(125_000.5, "125000.50"),
            Err(StepErrorKind::OverBalance)
        );
        assert_eq!(policy.check(0.0, "0"), Err(StepErrorKind::ZeroOrNegative));
    }
}
