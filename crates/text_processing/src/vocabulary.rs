//! Enrollment vocabulary
//!
//! Free-text answers for the plan and investment steps are normalized to
//! stable identifiers before they are stored.

use crate::phrases::{contains_any, normalize};

/// Plan identifiers
pub mod plan {
    pub const TRADITIONAL_401K: &str = "traditional_401k";
    pub const ROTH_401K: &str = "roth_401k";
}

/// Investment approach identifiers
pub mod investment {
    pub const TARGET_DATE: &str = "target_date";
    pub const MANAGED_PORTFOLIO: &str = "managed_portfolio";
    pub const SELF_DIRECTED: &str = "self_directed";
}

const ROTH_PHRASES: &[&str] = &["roth", "after tax", "post tax"];
const TRADITIONAL_PHRASES: &[&str] = &["traditional", "pre tax", "pretax", "regular", "standard"];

const TARGET_DATE_PHRASES: &[&str] = &["target date", "target", "retirement date", "lifecycle"];
const MANAGED_PHRASES: &[&str] = &["managed", "professional", "advisor", "adviser", "someone else"];
const SELF_DIRECTED_PHRASES: &[&str] = &[
    "self directed",
    "self",
    "myself",
    "my own",
    "pick my own",
    "choose my own",
    "diy",
];

/// Normalize a plan answer: "Roth please" -> `roth_401k`
///
/// Returns `None` when both or neither plan is named.
pub fn normalize_plan(text: &str) -> Option<&'static str> {
    let normalized = normalize(text);
    let roth = contains_any(&normalized, ROTH_PHRASES);
    let traditional = contains_any(&normalized, TRADITIONAL_PHRASES);
    match (roth, traditional) {
        (true, false) => Some(plan::ROTH_401K),
        (false, true) => Some(plan::TRADITIONAL_401K),
        _ => None,
    }
}

/// Normalize an investment answer to one approach identifier
pub fn normalize_investment_approach(text: &str) -> Option<&'static str> {
    let normalized = normalize(text);
    let matches: Vec<&'static str> = [
        (investment::TARGET_DATE, TARGET_DATE_PHRASES),
        (investment::MANAGED_PORTFOLIO, MANAGED_PHRASES),
        (investment::SELF_DIRECTED, SELF_DIRECTED_PHRASES),
    ]
    .into_iter()
    .filter(|(_, table)| contains_any(&normalized, table))
    .map(|(id, _)| id)
    .collect();

    match matches.as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

/// Human label for a stored plan or investment identifier
pub fn display_name(id: &str) -> &str {
    match id {
        plan::TRADITIONAL_401K => "Traditional 401(k)",
        plan::ROTH_401K => "Roth 401(k)",
        investment::TARGET_DATE => "a target-date fund",
        investment::MANAGED_PORTFOLIO => "a managed portfolio",
        investment::SELF_DIRECTED => "self-directed investments",
        other => other,
    }
}
