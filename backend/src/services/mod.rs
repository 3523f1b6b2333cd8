//! Business logic services

pub mod advisory;
pub mod alert;
pub mod task;
