//! Task-oriented dialogue for guided plan transactions
//!
//! Features:
//! - Deterministic dialogue controller (`handle_user_input` -> `Response`)
//! - Data-driven step catalog for loans, enrollment and withdrawals
//! - Numeric answer policies with a typed error taxonomy
//! - Step-level undo and mid-flow change requests
//! - Exact-phrase confirmation gate for irreversible submissions
//!
//! # Example
//!
//! ```
//! use plan_assistant_agent::{DialogueController, Phase};
//! use plan_assistant_config::{AccountConfig, DialogueConfig};
//! use plan_assistant_core::UiHint;
//!
//! let mut controller =
//!     DialogueController::from_config(&DialogueConfig::default(), &AccountConfig::default());
//!
//! for turn in ["I want a loan", "5000", "5", "yes"] {
//!     controller.handle_user_input(turn);
//! }
//! let response = controller.handle_user_input("yes, submit loan");
//!
//! assert_eq!(response.ui_hint, UiHint::Completed);
//! assert_eq!(controller.state().phase, Phase::Completed);
//! ```

pub mod catalog;
pub mod change;
pub mod confirmation;
pub mod controller;
pub mod policy;
pub mod state;
pub mod topics;

pub use catalog::{DefaultCatalog, StepCatalog, StepDefinition, TaskSteps};
pub use controller::DialogueController;
pub use policy::NumericPolicy;
pub use state::{DialogueState, Phase};
