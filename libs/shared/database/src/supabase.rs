use reqwest::{
    Client,
    header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Method, StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use shared_config::AppConfig;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("API error ({status}): {body}")]
    Status { status: StatusCode, body: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),
}

impl DatabaseError {
    /// PostgREST answers 409 on primary key violations.
    pub fn is_conflict(&self) -> bool {
        matches!(self, DatabaseError::Status { status, .. } if *status == StatusCode::CONFLICT)
    }
}

pub struct SupabaseClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            anon_key: config.supabase_anon_key.clone(),
        }
    }

    fn get_headers(&self, auth_token: Option<&str>) -> Result<HeaderMap, DatabaseError> {
        let mut headers = HeaderMap::new();

        headers.insert("apikey", HeaderValue::from_str(&self.anon_key)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = auth_token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }

        Ok(headers)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        auth_token: Option<&str>,
        body: Option<Value>,
        extra_headers: Option<HeaderMap>,
    ) -> Result<reqwest::Response, DatabaseError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let mut headers = self.get_headers(auth_token)?;
        if let Some(extra) = extra_headers {
            headers.extend(extra);
        }

        let mut req = self.client.request(method, &url).headers(headers);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            error!("API error ({}): {}", status, body);
            return Err(DatabaseError::Status { status, body });
        }

        Ok(response)
    }

    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        auth_token: Option<&str>,
        body: Option<Value>,
    ) -> Result<T, DatabaseError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(method, path, auth_token, body, None).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Insert without asking for the stored row back (`Prefer: return=minimal`),
    /// so the response body is empty and nothing is decoded.
    pub async fn insert(
        &self,
        table: &str,
        auth_token: Option<&str>,
        row: Value,
    ) -> Result<(), DatabaseError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("prefer"),
            HeaderValue::from_static("return=minimal"),
        );

        let path = format!("/rest/v1/{}", table);
        self.send(Method::POST, &path, auth_token, Some(row), Some(headers))
            .await?;
        Ok(())
    }

    /// Fetch at most one row of `table` whose `id` equals `id`.
    pub async fn select_by_id<T>(
        &self,
        table: &str,
        id: &str,
        auth_token: Option<&str>,
    ) -> Result<Option<T>, DatabaseError>
    where
        T: DeserializeOwned,
    {
        let path = format!(
            "/rest/v1/{}?id=eq.{}&select=*&limit=1",
            table,
            urlencoding::encode(id)
        );
        let rows: Vec<T> = self.request(Method::GET, &path, auth_token, None).await?;
        Ok(rows.into_iter().next())
    }

    pub fn get_base_url(&self) -> &str {
        &self.base_url
    }
}
