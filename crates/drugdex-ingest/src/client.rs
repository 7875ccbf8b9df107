//! Blocking HTTP client shared by both sources.

use reqwest::blocking::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::SourceConfig;
use crate::error::FetchError;

/// Thin wrapper that maps every failure onto [`FetchError`].
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new client with the configured timeout and user agent.
    pub fn new(config: &SourceConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }

    /// GET a page body as text.
    pub fn get_text(&self, url: &str) -> Result<String, FetchError> {
        debug!(url, "GET");
        let response = check_status(self.client.get(url).send()?, url)?;
        Ok(response.text()?)
    }

    /// GET and decode a JSON body.
    pub fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let body = self.get_text(url)?;
        decode(&body, url)
    }

    /// POST a JSON body and decode the JSON reply.
    pub fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, FetchError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(url, "POST");
        let response = check_status(self.client.post(url).json(body).send()?, url)?;
        let text = response.text()?;
        decode(&text, url)
    }
}

fn check_status(response: Response, url: &str) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(FetchError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

fn decode<T: DeserializeOwned>(body: &str, url: &str) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new(&SourceConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn decode_reports_url() {
        let error = decode::<Vec<String>>("{not json", "https://example.invalid/api")
            .expect_err("invalid json");
        assert!(error.is_retryable());
        assert_eq!(
            error.to_string(),
            "invalid response from https://example.invalid/api"
        );
    }
}
