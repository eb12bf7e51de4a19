//! Domain records, static fixtures and display formatting shared by the booking core and its front-ends.

pub mod domain;
pub mod error;
pub mod fixtures;
pub mod format;
