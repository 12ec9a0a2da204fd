//! Domain models for flavordesk.
//!
//! This module contains core domain types that are not UI-specific:
//! - [`Site`] - A benchmarking site as returned by the API
//! - [`FlavorDraft`] - The body of a flavor submission

pub mod flavor;
pub mod site;

pub use flavor::FlavorDraft;
pub use site::Site;
