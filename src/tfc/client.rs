use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::errors::TfcError;
use super::types::ApiErrors;
use crate::config::TfcConfig;

/// Thin authenticated wrapper over the Terraform Cloud v2 API.
///
/// Holds a `reqwest::Client` configured once from [`TfcConfig`]: bearer
/// token and JSON:API content type as default headers, certificate
/// verification per SSL_VERIFY. Per-resource operations live in the
/// sibling modules (`workspaces`, `state_versions`, `projects`).
#[derive(Debug, Clone)]
pub struct TfcClient {
    http: Client,
    base_url: String,
    organization: String,
}

impl TfcClient {
    pub fn new(config: &TfcConfig) -> Result<Self, TfcError> {
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", config.token))?;
        auth.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/vnd.api+json"),
        );

        let http = Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(!config.ssl_verify)
            .build()?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            organization: config.organization.clone(),
        })
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/v2{path}", self.base_url)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, TfcError> {
        let url = self.api_url(path);
        debug!(%url, "GET");
        let response = self.http.get(url).query(query).send().await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), TfcError> {
        let url = self.api_url(path);
        debug!(%url, "POST");
        let response = self.http.post(url).json(body).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    pub(crate) async fn post_empty(&self, path: &str) -> Result<(), TfcError> {
        let url = self.api_url(path);
        debug!(%url, "POST");
        let response = self.http.post(url).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Authenticated GET of a raw (non-JSON:API) resource, such as the
    /// hosted state download URL. The bearer header rides along via the
    /// client's default headers.
    pub(crate) async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, TfcError> {
        debug!(%url, "GET (raw)");
        let response = self.http.get(url).send().await?;
        let response = Self::check(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Map any non-success response to a typed API error, pulling the
    /// message out of the JSON:API error body when one is present.
    async fn check(response: Response) -> Result<Response, TfcError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<ApiErrors>()
            .await
            .ok()
            .and_then(|body| body.summary())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unrecognized response")
                    .to_string()
            });
        Err(TfcError::Api { status, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> TfcClient {
        TfcClient::new(&TfcConfig {
            token: "t".to_string(),
            url: url.to_string(),
            organization: "acme".to_string(),
            ssl_verify: false,
            project: None,
            workspaces: Vec::new(),
        })
        .unwrap()
    }

    #[test]
    fn api_urls_are_rooted_at_v2() {
        let client = client("https://tfe.example.com");
        assert_eq!(
            client.api_url("/organizations/acme/workspaces/app"),
            "https://tfe.example.com/api/v2/organizations/acme/workspaces/app"
        );
    }

    #[test]
    fn trailing_slash_on_the_base_url_is_tolerated() {
        let client = client("https://tfe.example.com/");
        assert_eq!(
            client.api_url("/workspaces/ws-1"),
            "https://tfe.example.com/api/v2/workspaces/ws-1"
        );
    }
}
