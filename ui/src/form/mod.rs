//! The report form: draft state, submission rules and the Dioxus view.

pub mod draft;
pub mod submit;

mod fields;
mod view;

pub use draft::{ReportDraft, UrlState, COMMENT_MAX_CHARS, URL_PLACEHOLDER};
pub use submit::{prepare, submit, ReportPayload, SubmitError};
pub use view::ReportForm;
