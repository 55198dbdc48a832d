//! HTTP client for the remote employee collection resource.
//!
//! Single-record operations address the collection with the upstream's
//! `<base>(<id>)` syntax. Every request carries the three fixed headers from
//! static configuration; non-success responses are turned into errors that
//! keep the response body text as detail.

use crate::config::ApiConfig;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use roster_core::Employee;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status}: {detail}")]
    Transport { status: u16, detail: String },
    #[error("employee {id} not found: {detail}")]
    NotFound { id: String, detail: String },
    #[error("Config error: {0}")]
    Config(String),
}

#[derive(Debug, Clone)]
pub struct EmployeeClient {
    client: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
}

impl EmployeeClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let headers = build_fixed_headers(config)?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            headers,
        })
    }

    /// Read all records, in server order.
    pub async fn list(&self) -> Result<Vec<Employee>, ApiError> {
        let response = self
            .client
            .get(&self.base_url)
            .headers(self.headers.clone())
            .send()
            .await?;
        parse_response(response).await
    }

    /// Read a single record.
    pub async fn get(&self, id: &str) -> Result<Employee, ApiError> {
        let response = self
            .client
            .get(self.record_url(id))
            .headers(self.headers.clone())
            .send()
            .await?;
        if response.status().as_u16() == 404 {
            let detail = response.text().await.unwrap_or_default();
            return Err(ApiError::NotFound {
                id: id.to_string(),
                detail,
            });
        }
        parse_response(response).await
    }

    /// Create a record; returns it as persisted.
    pub async fn create(&self, employee: &Employee) -> Result<Employee, ApiError> {
        let response = self
            .client
            .post(&self.base_url)
            .headers(self.headers.clone())
            .json(employee)
            .send()
            .await?;
        parse_response(response).await
    }

    /// Update an existing record; returns it as persisted.
    pub async fn update(&self, id: &str, employee: &Employee) -> Result<Employee, ApiError> {
        let response = self
            .client
            .put(self.record_url(id))
            .headers(self.headers.clone())
            .json(employee)
            .send()
            .await?;
        parse_response(response).await
    }

    /// Delete a record. No body is expected on success.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.record_url(id))
            .headers(self.headers.clone())
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let detail = response.text().await.unwrap_or_default();
            Err(ApiError::Transport {
                status: status.as_u16(),
                detail,
            })
        }
    }

    fn record_url(&self, id: &str) -> String {
        format!("{}({})", self.base_url, id)
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response.json::<T>().await?)
    } else {
        let detail = response.text().await.unwrap_or_default();
        Err(ApiError::Transport {
            status: status.as_u16(),
            detail,
        })
    }
}

fn build_fixed_headers(config: &ApiConfig) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        HeaderName::from_static("customerid"),
        HeaderValue::from_str(&config.customer_id).map_err(|e| ApiError::Config(e.to_string()))?,
    );
    headers.insert(
        HeaderName::from_static("apikey"),
        HeaderValue::from_str(&config.api_key).map_err(|e| ApiError::Config(e.to_string()))?,
    );
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            customer_id: "tenant-1".to_string(),
            api_key: "test-key".to_string(),
            request_timeout_ms: 5_000,
        }
    }

    #[test]
    fn record_url_uses_collection_syntax() {
        let client = EmployeeClient::new(&config("http://host/employees/")).unwrap();
        assert_eq!(client.record_url("E1"), "http://host/employees(E1)");
    }

    #[test]
    fn invalid_header_value_is_a_config_error() {
        let mut cfg = config("http://host/employees");
        cfg.api_key = "bad\nkey".to_string();
        assert!(matches!(
            EmployeeClient::new(&cfg),
            Err(ApiError::Config(_))
        ));
    }
}
