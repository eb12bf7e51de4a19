//! Worker thread that runs payment requests on a tokio runtime.

pub mod commands;
pub mod runtime;
