//! Settings loaded at startup.

pub mod config;
