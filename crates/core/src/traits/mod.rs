//! Traits at the seams of the dialogue core
//!
//! ```text
//! Input Interpreter:
//!   - InputInterpreter: text -> intent tag, number, yes/no
//!
//! Response shaping:
//!   - ResponseShaper: optional rewording of response text
//! ```
//!
//! The step catalog trait lives with the controller in the agent crate,
//! because step definitions carry controller-specific policy.

mod interpreter;
mod shaper;

pub use interpreter::InputInterpreter;
pub use shaper::{NoopShaper, ResponseShaper};
