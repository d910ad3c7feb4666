//! Shared UI crate for the report form mini app. Form logic, the host bridge
//! and views live here; platform crates only launch the renderer.

pub mod core;
pub mod form;
pub mod i18n;
pub mod views;
