//! Client capability trait and HTTP client for the MyAnimeList v2 API.

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use std::time::Duration;

use crate::error::{MalError, Result};
use crate::models::{Anime, AnimePage, MalListStatus, MyListStatus, UpdateListStatus, User};

/// Base URL of the public v2 REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.myanimelist.net/v2";

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const LIST_STATUS_FIELDS: &str = "status,score,num_episodes_watched,is_rewatching,\
start_date,finish_date,num_times_rewatched,priority,rewatch_value,tags,comments";

/// Remote client capability the adapter is built against.
///
/// Transport policy (token refresh, retries, rate limiting) belongs to the
/// implementation; the adapter issues one logical call at a time and
/// propagates failures unchanged.
#[async_trait]
pub trait MalApi: Send + Sync {
    async fn get_user(&self, username: &str) -> Result<User>;

    async fn get_anime(&self, anime_id: u64) -> Result<Anime>;

    async fn search_anime(&self, query: &str, limit: u32) -> Result<Vec<Anime>>;

    /// One page of the user's list, `offset`-based. Callers drain pages
    /// sequentially until a short page.
    async fn get_user_anime_list(
        &self,
        username: &str,
        status: Option<MalListStatus>,
        limit: u32,
        offset: u32,
    ) -> Result<AnimePage>;

    /// Create-or-update: the service upserts the caller's list entry.
    async fn update_anime_status(
        &self,
        anime_id: u64,
        update: &UpdateListStatus,
    ) -> Result<MyListStatus>;

    async fn delete_anime_status(&self, anime_id: u64) -> Result<()>;
}

/// Error body shape used by the API.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: String,
    message: Option<String>,
}

/// Search/list envelope where entries carry only a node.
#[derive(Debug, Deserialize)]
struct NodePage {
    #[serde(default)]
    data: Vec<NodeEntry>,
}

#[derive(Debug, Deserialize)]
struct NodeEntry {
    node: Anime,
}

/// Bearer-token client for the v2 REST API.
#[derive(Debug, Clone)]
pub struct HttpMalClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpMalClient {
    /// Create a client against `base_url` authenticating with `token`.
    pub fn new(base_url: &str, token: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Create headers for an API request.
    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let auth_value = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(|_| MalError::auth("Invalid access token format"))?;
        headers.insert(AUTHORIZATION, auth_value);
        Ok(headers)
    }

    /// Parse a JSON response body, mapping API error envelopes.
    async fn parse_response<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(Self::api_error(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            MalError::api(status.as_u16(), format!("Failed to parse response: {}", e))
        })
    }

    /// Check a response whose body is not interesting on success.
    async fn check_response(response: reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await?;
        Err(Self::api_error(status.as_u16(), &body))
    }

    fn api_error(status: u16, body: &str) -> MalError {
        if let Ok(error) = serde_json::from_str::<ApiErrorResponse>(body) {
            let message = match error.message {
                Some(message) => format!("{}: {}", error.error, message),
                None => error.error,
            };
            return MalError::api(status, message);
        }
        MalError::api(status, format!("Request failed: {}", body))
    }
}

#[async_trait]
impl MalApi for HttpMalClient {
    async fn get_user(&self, username: &str) -> Result<User> {
        let url = format!(
            "{}/users/{}?fields=time_zone",
            self.base_url,
            urlencoding::encode(username)
        );
        debug!("GET {}", url);
        let response = self.client.get(&url).headers(self.headers()?).send().await?;
        Self::parse_response(response).await
    }

    async fn get_anime(&self, anime_id: u64) -> Result<Anime> {
        let url = format!(
            "{}/anime/{}?fields=id,title,num_episodes,media_type,my_list_status{{{}}}",
            self.base_url, anime_id, LIST_STATUS_FIELDS
        );
        debug!("GET {}", url);
        let response = self.client.get(&url).headers(self.headers()?).send().await?;
        Self::parse_response(response).await
    }

    async fn search_anime(&self, query: &str, limit: u32) -> Result<Vec<Anime>> {
        let url = format!(
            "{}/anime?q={}&limit={}&fields=id,title,num_episodes,media_type",
            self.base_url,
            urlencoding::encode(query),
            limit
        );
        debug!("GET {}", url);
        let response = self.client.get(&url).headers(self.headers()?).send().await?;
        let page: NodePage = Self::parse_response(response).await?;
        Ok(page.data.into_iter().map(|entry| entry.node).collect())
    }

    async fn get_user_anime_list(
        &self,
        username: &str,
        status: Option<MalListStatus>,
        limit: u32,
        offset: u32,
    ) -> Result<AnimePage> {
        let mut url = format!(
            "{}/users/{}/animelist?fields=num_episodes,media_type,list_status{{{}}}&limit={}&offset={}",
            self.base_url,
            urlencoding::encode(username),
            LIST_STATUS_FIELDS,
            limit,
            offset
        );
        if let Some(status) = status {
            url.push_str("&status=");
            url.push_str(status.as_str());
        }
        debug!("GET {}", url);
        let response = self.client.get(&url).headers(self.headers()?).send().await?;
        Self::parse_response(response).await
    }

    async fn update_anime_status(
        &self,
        anime_id: u64,
        update: &UpdateListStatus,
    ) -> Result<MyListStatus> {
        let url = format!("{}/anime/{}/my_list_status", self.base_url, anime_id);
        debug!("PUT {}", url);
        let response = self
            .client
            .put(&url)
            .headers(self.headers()?)
            .form(&update.form_params())
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn delete_anime_status(&self, anime_id: u64) -> Result<()> {
        let url = format!("{}/anime/{}/my_list_status", self.base_url, anime_id);
        debug!("DELETE {}", url);
        let response = self.client.delete(&url).headers(self.headers()?).send().await?;
        Self::check_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = HttpMalClient::new("https://api.myanimelist.net/v2/", "token");
        assert_eq!(client.base_url, "https://api.myanimelist.net/v2");
    }

    #[test]
    fn invalid_token_is_an_auth_error() {
        let client = HttpMalClient::new(DEFAULT_BASE_URL, "token\nwith-newline");
        let err = client.headers().unwrap_err();
        assert!(matches!(err, MalError::Auth(_)));
    }

    #[test]
    fn api_error_envelope_is_mapped() {
        let err = HttpMalClient::api_error(404, r#"{"error":"not_found","message":"anime does not exist"}"#);
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.to_string(), "API error (404): not_found: anime does not exist");
    }

    #[test]
    fn non_json_error_body_still_maps() {
        let err = HttpMalClient::api_error(502, "Bad Gateway");
        assert_eq!(err.to_string(), "API error (502): Request failed: Bad Gateway");
    }

    #[test]
    fn search_page_parses_bare_nodes() {
        let json = r#"{"data":[{"node":{"id":5114,"title":"Fullmetal Alchemist: Brotherhood","num_episodes":64,"media_type":"tv"}}]}"#;
        let page: NodePage = serde_json::from_str(json).unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].node.id, 5114);
    }
}
