//! Domain values exposed to the view-model layer.

pub mod appointment;
pub mod chart;
pub mod patient;
pub mod report;
pub mod search;
pub mod session;
pub mod types;
