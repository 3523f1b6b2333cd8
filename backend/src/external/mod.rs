//! External service integrations

pub mod forecast;
