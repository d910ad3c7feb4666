//! Platform-agnostic building blocks shared by the form.

pub mod catalog;
pub mod host;
pub mod identity;
pub mod validate;
