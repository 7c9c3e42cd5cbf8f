//! Application state module

mod app_state;
mod forms;
mod outcome;
mod toasts;

pub use app_state::*;
pub use forms::*;
pub use outcome::*;
pub use toasts::*;
