//! Withdrawal steps
//!
//! Amount -> TaxNotice -> Requested. The last step expects no input, so
//! reaching it completes the task without a confirmation phrase.

use plan_assistant_config::AccountConfig;
use plan_assistant_core::{number_field, CollectedData, InputKind, StepErrorKind, WithdrawalStep};

use super::{format_money, with_error_lead, StepDefinition, TaskSteps};
use crate::policy::NumericPolicy;

pub const FIELD_AMOUNT: &str = "withdrawal_amount";
pub const FIELD_TAX_NOTICE: &str = "tax_notice_acknowledged";
pub const FIELD_REQUESTED: &str = "withdrawal_requested";

fn amount_label(data: &CollectedData) -> String {
    match number_field(data, FIELD_AMOUNT) {
        Some(amount) => format!("a {}", format_money(amount)),
        None => "your".to_string(),
    }
}

pub(super) fn steps(account: &AccountConfig) -> TaskSteps {
    let vested = account.vested_balance;

    let amount = StepDefinition::new(
        WithdrawalStep::Amount,
        FIELD_AMOUNT,
        InputKind::Number,
        move |_, error| {
            let base = format!(
                "How much would you like to withdraw? Your vested balance is {}.",
                format_money(vested)
            );
            let lead = |kind| match kind {
                StepErrorKind::ZeroOrNegative => Some("The amount has to be more than zero."),
                StepErrorKind::OverBalance => Some("That's more than your vested balance."),
                StepErrorKind::Ambiguous => Some("I need an exact dollar amount."),
                StepErrorKind::Invalid => Some("I didn't catch an amount."),
                _ => None,
            };
            with_error_lead(error, lead, base)
        },
    )
    .with_policy(NumericPolicy::withdrawal_amount(account))
    .then(WithdrawalStep::TaxNotice);

    let tax_notice = StepDefinition::new(
        WithdrawalStep::TaxNotice,
        FIELD_TAX_NOTICE,
        InputKind::YesNo,
        |data: &CollectedData, error| {
            let base = format!(
                "Withdrawals are usually taxed as income and may carry a 10% early withdrawal \
                 penalty. Do you want to continue with {} withdrawal?",
                amount_label(data)
            );
            let lead = |kind| match kind {
                StepErrorKind::Invalid => Some("Please answer yes or no."),
                _ => None,
            };
            with_error_lead(error, lead, base)
        },
    )
    .aborts_on_decline()
    .then(WithdrawalStep::Requested);

    let requested = StepDefinition::new(
        WithdrawalStep::Requested,
        FIELD_REQUESTED,
        InputKind::None,
        |data: &CollectedData, _| {
            let amount = number_field(data, FIELD_AMOUNT)
                .map(|amount| format!(" for {}", format_money(amount)))
                .unwrap_or_default();
            format!(
                "Your withdrawal request{} has been submitted. Is there anything else I can help with?",
                amount
            )
        },
    );

    TaskSteps::from_steps([amount, tax_notice, requested])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DefaultCatalog, StepCatalog};

    #[test]
    fn test_tax_notice_names_amount() {
        let catalog = DefaultCatalog::default();
        let step = catalog.step(WithdrawalStep::TaxNotice.into()).unwrap();

        let mut data = CollectedData::new();
        data.insert(FIELD_AMOUNT.into(), 1_000.0.into());

        assert!(step.prompt(&data, None).contains("$1,000.00 withdrawal"));
        assert!(step.declining_aborts());
    }
}
