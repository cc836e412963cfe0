//! Client companion of the infirmary record-keeping service.
//!
//! The `data` feature exposes the view-model layer only. The default
//! `client` feature adds the HTTP adapter, services, renderers and the
//! terminal front end.

pub mod domain;
pub mod dto;
pub mod forms;
pub mod pagination;

#[cfg(feature = "client")]
pub mod alerts;
#[cfg(feature = "client")]
pub mod backend;
#[cfg(feature = "client")]
pub mod cli;
#[cfg(feature = "client")]
pub mod error_conversions;
#[cfg(feature = "client")]
pub mod models;
#[cfg(feature = "client")]
pub mod services;
#[cfg(feature = "client")]
pub mod view;
