use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use tracing::debug;

use super::{ApiError, FlavorApi};
use crate::config::ApiConfig;
use crate::model::{FlavorDraft, Site};

/// `FlavorApi` over HTTP/JSON.
#[derive(Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(format!("flavordesk/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|token| !token.is_empty()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_status(status.as_u16(), &body))
}

#[async_trait]
impl FlavorApi for HttpClient {
    async fn fetch_site(&self, site_id: &str) -> Result<Site, ApiError> {
        let url = self.url(&format!("sites/{site_id}"));
        debug!("GET {url}");
        let response = self.authorize(self.http.get(&url)).send().await?;
        Ok(check(response).await?.json::<Site>().await?)
    }

    async fn submit_flavor(&self, site_id: &str, draft: &FlavorDraft) -> Result<(), ApiError> {
        let url = self.url(&format!("sites/{site_id}/flavors"));
        debug!("POST {url}");
        let response = self
            .authorize(self.http.post(&url))
            .json(draft)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}
