//! Input interpretation for the plan assistant
//!
//! This crate provides the default `InputInterpreter`:
//! - **Intent Classification**: phrase tables for commands, task starts and questions
//! - **Number Extraction**: digits, currency, multipliers and English number words
//! - **Yes/No Extraction**: affirmative and negative vocabulary
//! - **Hedging and Units**: "about", "maybe"; months vs years
//! - **Enrollment Vocabulary**: plan names and investment approaches
//!
//! # Example
//!
//! ```
//! use plan_assistant_core::InputInterpreter;
//! use plan_assistant_text_processing::RuleBasedInterpreter;
//!
//! let interpreter = RuleBasedInterpreter::new();
//! assert_eq!(interpreter.extract_number("twelve thousand"), Some(12_000.0));
//! assert_eq!(interpreter.extract_yes_no("sounds good"), Some(true));
//! ```

pub mod english;
pub mod intent;
pub mod phrases;
pub mod slot_extraction;
pub mod vocabulary;

pub use intent::RuleBasedInterpreter;
pub use phrases::{is_hedged, mentions_months, mentions_years};
pub use slot_extraction::{extract_number, extract_yes_no};
pub use vocabulary::{normalize_investment_approach, normalize_plan};
