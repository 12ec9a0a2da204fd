//! Flavor submission dialog.
//!
//! - [`FlavorSubmissionModal`] - controlled modal plus success toast
//! - [`FormDelegate`] - what the modal needs from the form it hosts
//! - [`FlavorSubmitForm`] - the form that proposes flavors through the API

mod controller;
mod delegate;
mod form;

pub use controller::{FlavorSubmissionModal, ModalRequest, SUCCESS_TOAST_DELAY};
pub use delegate::{FormDelegate, FormOutcome};
pub use form::FlavorSubmitForm;
