//! Client for the EOSC performance API.
//!
//! Only the two endpoints the application needs are covered: looking up a
//! site and proposing a flavor for it.

mod client;
mod error;

use async_trait::async_trait;

pub use client::HttpClient;
pub use error::ApiError;

use crate::model::{FlavorDraft, Site};

/// Remote operations on sites and their flavors.
#[async_trait]
pub trait FlavorApi: Send + Sync + 'static {
    /// Fetch a single site by id.
    async fn fetch_site(&self, site_id: &str) -> Result<Site, ApiError>;

    /// Propose a new flavor for a site.
    ///
    /// Returns once the server has accepted the proposal for review.
    async fn submit_flavor(&self, site_id: &str, draft: &FlavorDraft) -> Result<(), ApiError>;
}
