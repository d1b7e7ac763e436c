//! Replay validator: rebuilds a game's full step-by-step history from its
//! move list, independently of any live game state.

pub mod report;
mod step;
mod validator;

pub use report::{describe_step, render_report};
pub use step::{step_label, StepRecord, StepStatus, ValidationOutput, WinnerInfo};
pub use validator::{validate, validate_on};
