//! Enrollment steps
//!
//! Plan -> Contribution -> Investment -> Review -> Confirmation

use plan_assistant_config::EnrollmentPolicyConfig;
use plan_assistant_core::{
    number_field, text_field, CollectedData, EnrollmentStep, FieldValue, InputKind, StepErrorKind,
};
use plan_assistant_text_processing::vocabulary::display_name;
use plan_assistant_text_processing::{normalize_investment_approach, normalize_plan};

use super::{format_percent, with_error_lead, StepDefinition, TaskSteps};
use crate::confirmation;
use crate::policy::NumericPolicy;

pub const FIELD_PLAN: &str = "plan";
pub const FIELD_CONTRIBUTION: &str = "contribution_percent";
pub const FIELD_INVESTMENT: &str = "investment_approach";
pub const FIELD_REVIEW: &str = "enrollment_reviewed";
pub const FIELD_CONFIRMATION: &str = "enrollment_confirmed";

fn plan_label(data: &CollectedData) -> &str {
    text_field(data, FIELD_PLAN).map_or("plan", display_name)
}

pub(super) fn steps(policy: &EnrollmentPolicyConfig) -> TaskSteps {
    let (min, max) = (policy.min_contribution_percent, policy.max_contribution_percent);

    let plan = StepDefinition::new(
        EnrollmentStep::Plan,
        FIELD_PLAN,
        InputKind::Text,
        |_, error| {
            let base = "Which plan would you like to join: a Traditional 401(k) or a Roth 401(k)?"
                .to_string();
            let lead = |kind| match kind {
                StepErrorKind::Invalid => Some("Please choose Traditional or Roth."),
                _ => None,
            };
            with_error_lead(error, lead, base)
        },
    )
    .with_validator(|text, _| {
        normalize_plan(text)
            .map(FieldValue::from)
            .ok_or(StepErrorKind::Invalid)
    })
    .then(EnrollmentStep::Contribution);

    let contribution = StepDefinition::new(
        EnrollmentStep::Contribution,
        FIELD_CONTRIBUTION,
        InputKind::Number,
        move |data: &CollectedData, error| {
            let base = format!(
                "What percentage of each paycheck would you like to put into your {}? Choose {} to {}.",
                plan_label(data),
                format_percent(min),
                format_percent(max)
            );
            let lead = |kind| match kind {
                StepErrorKind::Ambiguous => Some("I need an exact percentage."),
                StepErrorKind::OutOfRange => Some("That percentage is outside the allowed range."),
                StepErrorKind::Invalid => Some("I didn't catch a percentage."),
                _ => None,
            };
            with_error_lead(error, lead, base)
        },
    )
    .with_policy(NumericPolicy::contribution(policy))
    .then(EnrollmentStep::Investment);

    let investment = StepDefinition::new(
        EnrollmentStep::Investment,
        FIELD_INVESTMENT,
        InputKind::Text,
        |_, error| {
            let base = "How would you like your contributions invested: a target-date fund, \
                        a managed portfolio, or self-directed?"
                .to_string();
            let lead = |kind| match kind {
                StepErrorKind::Invalid => Some("Please pick one of the three options."),
                _ => None,
            };
            with_error_lead(error, lead, base)
        },
    )
    .with_validator(|text, _| {
        normalize_investment_approach(text)
            .map(FieldValue::from)
            .ok_or(StepErrorKind::Invalid)
    })
    .then(EnrollmentStep::Review);

    let review = StepDefinition::new(
        EnrollmentStep::Review,
        FIELD_REVIEW,
        InputKind::YesNo,
        |data: &CollectedData, error| {
            let percent = number_field(data, FIELD_CONTRIBUTION)
                .map_or_else(|| "your chosen percentage".to_string(), format_percent);
            let investment =
                text_field(data, FIELD_INVESTMENT).map_or("your chosen investments", display_name);
            let base = format!(
                "You're joining the {} with {} of each paycheck, invested in {}. Do you want to continue?",
                plan_label(data),
                percent,
                investment
            );
            let lead = |kind| match kind {
                StepErrorKind::Invalid => Some("Please answer yes or no."),
                _ => None,
            };
            with_error_lead(error, lead, base)
        },
    )
    .aborts_on_decline()
    .then(EnrollmentStep::Confirmation);

    let confirm = StepDefinition::new(
        EnrollmentStep::Confirmation,
        FIELD_CONFIRMATION,
        InputKind::Confirmation,
        |_, error| {
            let base = format!(
                "To complete your enrollment, say \"{}\".",
                confirmation::ENROLLMENT_PHRASES[0]
            );
            let lead = |kind| match kind {
                StepErrorKind::InvalidConfirmationPhrase => {
                    Some("For your protection I need the exact phrase.")
                },
                _ => None,
            };
            with_error_lead(error, lead, base)
        },
    );

    TaskSteps::from_steps([plan, contribution, investment, review, confirm])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DefaultCatalog, StepCatalog};

    #[test]
    fn test_plan_validator_normalizes() {
        let catalog = DefaultCatalog::default();
        let plan = catalog.step(EnrollmentStep::Plan.into()).unwrap();
        let data = CollectedData::new();

        assert_eq!(
            plan.validate("Roth please", &data),
            Some(Ok(FieldValue::from("roth_401k")))
        );
        assert_eq!(
            plan.validate("the blue one", &data),
            Some(Err(StepErrorKind::Invalid))
        );
    }

    #[test]
    fn test_investment_validator_normalizes() {
        let catalog = DefaultCatalog::default();
        let step = catalog.step(EnrollmentStep::Investment.into()).unwrap();
        assert_eq!(
            step.validate("a target date fund", &CollectedData::new()),
            Some(Ok(FieldValue::from("target_date")))
        );
    }

    #[test]
    fn test_review_summarizes_choices() {
        let catalog = DefaultCatalog::default();
        let review = catalog.step(EnrollmentStep::Review.into()).unwrap();

        let mut data = CollectedData::new();
        data.insert(FIELD_PLAN.into(), "roth_401k".into());
        data.insert(FIELD_CONTRIBUTION.into(), 6.0.into());
        data.insert(FIELD_INVESTMENT.into(), "target_date".into());

        let prompt = review.prompt(&data, None);
        assert!(prompt.contains("Roth 401(k)"));
        assert!(prompt.contains("6%"));
        assert!(prompt.contains("target-date fund"));
    }
}
