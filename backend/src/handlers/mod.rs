//! HTTP handlers

mod advisory;
mod alert;
mod health;
mod task;

pub use advisory::*;
pub use alert::*;
pub use health::*;
pub use task::*;
