//! Loan steps
//!
//! Amount -> Term -> RepaymentReview -> Confirmation

use plan_assistant_config::{AccountConfig, LoanPolicyConfig};
use plan_assistant_core::{number_field, CollectedData, InputKind, LoanStep, StepErrorKind};

use super::{format_money, format_percent, with_error_lead, StepDefinition, TaskSteps};
use crate::confirmation;
use crate::policy::NumericPolicy;

pub const FIELD_AMOUNT: &str = "loan_amount";
pub const FIELD_TERM: &str = "loan_term_years";
pub const FIELD_REPAYMENT: &str = "loan_repayment_accepted";
pub const FIELD_CONFIRMATION: &str = "loan_confirmed";

/// Level payment per pay period for an amortized loan
pub fn payment_per_period(
    principal: f64,
    annual_rate: f64,
    years: f64,
    periods_per_year: u32,
) -> f64 {
    let periods = years * f64::from(periods_per_year);
    if periods <= 0.0 {
        return principal;
    }
    let rate = annual_rate / f64::from(periods_per_year);
    if rate == 0.0 {
        return principal / periods;
    }
    principal * rate / (1.0 - (1.0 + rate).powf(-periods))
}

fn yes_no_lead(error: StepErrorKind) -> Option<&'static str> {
    match error {
        StepErrorKind::Invalid => Some("Please answer yes or no."),
        _ => None,
    }
}

pub(super) fn steps(policy: &LoanPolicyConfig, account: &AccountConfig) -> TaskSteps {
    let vested = account.vested_balance;
    let max_available = policy.max_available(vested);
    let absolute_max = policy.absolute_max;
    let balance_percent = policy.balance_fraction * 100.0;
    let (min_term, max_term) = (policy.min_term_years, policy.max_term_years);
    let rate = policy.annual_interest_rate;
    let periods = policy.pay_periods_per_year;

    let amount = StepDefinition::new(
        LoanStep::Amount,
        FIELD_AMOUNT,
        InputKind::Number,
        move |_, error| {
            let base = format!(
                "With a vested balance of {}, you can borrow up to {}. How much would you like to borrow?",
                format_money(vested),
                format_money(max_available)
            );
            let lead = |kind| match kind {
                StepErrorKind::ZeroOrNegative => Some("The loan amount has to be more than zero."),
                StepErrorKind::OverMax => Some("That's above the plan's loan limit."),
                StepErrorKind::OverBalance => Some("That's more than your vested balance allows."),
                StepErrorKind::Ambiguous => Some("I need an exact dollar amount."),
                StepErrorKind::Invalid => Some("I didn't catch an amount."),
                _ => None,
            };
            let mut text = with_error_lead(error, lead, base);
            if error == Some(StepErrorKind::OverMax) {
                text.push_str(&format!(
                    " The most anyone can borrow is {}.",
                    format_money(absolute_max)
                ));
            } else if error == Some(StepErrorKind::OverBalance) {
                text.push_str(&format!(
                    " Loans are limited to {} of your vested balance.",
                    format_percent(balance_percent)
                ));
            }
            text
        },
    )
    .with_policy(NumericPolicy::loan_amount(policy, account))
    .then(LoanStep::Term);

    let term = StepDefinition::new(
        LoanStep::Term,
        FIELD_TERM,
        InputKind::Number,
        move |_, error| {
            let base = format!(
                "Over how many years would you like to repay it? Choose {} to {} years.",
                min_term, max_term
            );
            let lead = |kind| match kind {
                StepErrorKind::WrongUnit => Some("Please give the term in years, not months."),
                StepErrorKind::OutOfRange => Some("The term has to be a whole number of years."),
                StepErrorKind::Ambiguous => Some("I need an exact number of years."),
                StepErrorKind::Invalid => Some("I didn't catch a number of years."),
                _ => None,
            };
            with_error_lead(error, lead, base)
        },
    )
    .with_policy(NumericPolicy::term_years(policy))
    .then(LoanStep::RepaymentReview);

    let review = StepDefinition::new(
        LoanStep::RepaymentReview,
        FIELD_REPAYMENT,
        InputKind::YesNo,
        move |data: &CollectedData, error| {
            let base = match (number_field(data, FIELD_AMOUNT), number_field(data, FIELD_TERM)) {
                (Some(amount), Some(years)) => format!(
                    "Borrowing {} over {} years at {} comes to about {} per paycheck. Do you want to continue?",
                    format_money(amount),
                    years,
                    format_percent(rate * 100.0),
                    format_money(payment_per_period(amount, rate, years, periods))
                ),
                _ => "Please review your repayment schedule. Do you want to continue?".to_string(),
            };
            with_error_lead(error, yes_no_lead, base)
        },
    )
    .aborts_on_decline()
    .then(LoanStep::Confirmation);

    let confirm = StepDefinition::new(
        LoanStep::Confirmation,
        FIELD_CONFIRMATION,
        InputKind::Confirmation,
        |data: &CollectedData, error| {
            let phrase = confirmation::LOAN_PHRASES[0];
            let summary = match (number_field(data, FIELD_AMOUNT), number_field(data, FIELD_TERM)) {
                (Some(amount), Some(years)) => {
                    format!("your loan of {} over {} years", format_money(amount), years)
                },
                _ => "your loan application".to_string(),
            };
            let base = format!("To submit {}, say \"{}\".", summary, phrase);
            let lead = |kind| match kind {
                StepErrorKind::InvalidConfirmationPhrase => {
                    Some("For your protection I need the exact phrase.")
                },
                _ => None,
            };
            with_error_lead(error, lead, base)
        },
    );

    TaskSteps::from_steps([amount, term, review, confirm])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DefaultCatalog, StepCatalog};

    #[test]
    fn test_payment_per_period() {
        // 5,000 over 5 years at 8.5%, 26 paychecks a year
        let payment = payment_per_period(5_000.0, 0.085, 5.0, 26);
        assert!((payment - 47.3).abs() < 0.5, "payment was {}", payment);

        assert_eq!(payment_per_period(2_600.0, 0.0, 1.0, 26), 100.0);
    }

    #[test]
    fn test_review_prompt_shows_payment() {
        let catalog = DefaultCatalog::default();
        let review = catalog.step(LoanStep::RepaymentReview.into()).unwrap();

        let mut data = CollectedData::new();
        data.insert(FIELD_AMOUNT.into(), 5_000.0.into());
        data.insert(FIELD_TERM.into(), 5.0.into());

        let prompt = review.prompt(&data, None);
        assert!(prompt.contains("$5,000.00"));
        assert!(prompt.contains("8.5%"));
        assert!(prompt.contains("per paycheck"));
    }

    #[test]
    fn test_amount_prompt_explains_error() {
        let catalog = DefaultCatalog::default();
        let amount = catalog.step(LoanStep::Amount.into()).unwrap();
        let data = CollectedData::new();

        let plain = amount.prompt(&data, None);
        let over = amount.prompt(&data, Some(StepErrorKind::OverMax));
        assert!(plain.starts_with("With a vested balance of"));
        assert!(over.ends_with("The most anyone can borrow is $50,000.00."));
        assert!(over.contains(&plain));
        assert_ne!(plain, over);
    }

    #[test]
    fn test_confirmation_prompt_names_phrase() {
        let catalog = DefaultCatalog::default();
        let confirm = catalog.step(LoanStep::Confirmation.into()).unwrap();
        let prompt = confirm.prompt(&CollectedData::new(), None);
        assert!(prompt.contains("\"yes, submit loan\""));
    }
}
