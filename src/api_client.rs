use crate::error::FetchError;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, error};

pub struct ApiClient {
    endpoint: String,
    token: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(endpoint: String, token: String) -> Self {
        Self {
            endpoint,
            token,
            client: reqwest::Client::new(),
        }
    }

    /// Запрашивает статусы работ начиная с `from_date`.
    /// Пустая или нулевая метка заменяется текущим временем.
    pub async fn get_api_answer(&self, from_date: Option<i64>) -> Result<Value, FetchError> {
        let timestamp = match from_date {
            Some(ts) if ts != 0 => ts,
            _ => chrono::Utc::now().timestamp(),
        };
        debug!("Requesting homework statuses from_date={}", timestamp);

        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", timestamp)])
            .send()
            .await
            .map_err(|e| {
                error!("API request failed: {}", e);
                FetchError(e.to_string())
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            error!("API returned unexpected status: {}", status);
            return Err(FetchError(format!("status {}", status)));
        }

        response.json::<Value>().await.map_err(|e| {
            error!("Failed to parse API response: {}", e);
            FetchError(e.to_string())
        })
    }
}
