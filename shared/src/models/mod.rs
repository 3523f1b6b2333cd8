//! Domain models for the AgriFund Weather Advisory Service

mod alert;
mod forecast;
mod intervention;
mod rule;
mod task;

pub use alert::*;
pub use forecast::*;
pub use intervention::*;
pub use rule::*;
pub use task::*;
