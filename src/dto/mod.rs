//! Wire payloads exchanged with the infirmary server.

pub mod main;
pub mod report;
pub mod search;
