//! HTTP client for the billing backend

use super::{ApiResult, BillingApi, ClientError};
use crate::config::Config;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use shared::ApiResponse;
use std::time::Duration;

/// reqwest-backed [`BillingApi`] implementation
#[derive(Debug, Clone)]
pub struct HttpBillingApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBillingApi {
    /// Create a new client from configuration
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            token: None,
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Make a POST request with JSON body
    async fn post<B: Serialize>(&self, path: &str, body: &B) -> ApiResult {
        let mut request = self.client.post(self.url(path)).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request without body
    async fn post_empty(&self, path: &str) -> ApiResult {
        let mut request = self.client.post(self.url(path));

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response(response: reqwest::Response) -> ApiResult {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(text)),
                _ => Err(ClientError::Internal(text)),
            };
        }

        response
            .json::<ApiResponse<Value>>()
            .await
            .map_err(Into::into)
    }
}

#[async_trait]
impl BillingApi for HttpBillingApi {
    async fn update_customer_number(&self, master_id: &str, phone: &str) -> ApiResult {
        #[derive(Serialize)]
        struct UpdateNumberRequest<'a> {
            phone: &'a str,
        }

        self.post(
            &format!("api/orders/{}/customer-number", master_id),
            &UpdateNumberRequest { phone },
        )
        .await
    }

    async fn register_kitchen_ticket(&self, master_id: &str) -> ApiResult {
        self.post_empty(&format!("api/orders/{}/kitchen-ticket", master_id))
            .await
    }

    async fn lock_sale_prices(&self, master_id: &str) -> ApiResult {
        self.post_empty(&format!("api/orders/{}/lock-prices", master_id))
            .await
    }

    async fn reprint_bill(&self, master_code: &str) -> ApiResult {
        self.post_empty(&format!("api/bills/{}/reprint", master_code))
            .await
    }
}
