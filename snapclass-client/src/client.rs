//! HTTP client for the shop backend

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::client::{
    CatalogQuery, GalleryPhoto, OrderCreateRequest, OrderCreateResponse, PaginatedResponse,
    PastOrder,
};
use snapclass_cart::{CheckoutError, OrderApi};

/// Error body returned by the backend on non-success statuses
#[derive(serde::Deserialize)]
struct ApiErrorResponse {
    pub message: String,
}

/// Shop backend client
#[derive(Debug, Clone)]
pub struct ShopClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ShopClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set the bearer token after login
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::NotAuthenticated);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&text)
                .map(|e| e.message)
                .unwrap_or(text);
            return Err(ClientError::ServerRejected {
                status: status.as_u16(),
                message,
            });
        }
        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                ClientError::InvalidResponse(e.to_string())
            } else {
                ClientError::Http(e)
            }
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let mut request = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(query);
        if let Some(auth) = self.auth_header() {
            request = request.header("Authorization", auth);
        }
        let response = request.send().await?;
        self.handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let mut request = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body);
        if let Some(auth) = self.auth_header() {
            request = request.header("Authorization", auth);
        }
        let response = request.send().await?;
        self.handle_response(response).await
    }

    // ========== Endpoints ==========

    /// Fetch a page of the gallery feed
    pub async fn fetch_photos(
        &self,
        query: &CatalogQuery,
    ) -> ClientResult<PaginatedResponse<GalleryPhoto>> {
        self.get("/photos", &query.query_pairs()).await
    }

    /// Create an order and request a payment intent
    pub async fn create_order(
        &self,
        request: &OrderCreateRequest,
    ) -> ClientResult<OrderCreateResponse> {
        tracing::debug!(
            order_number = %request.order_number,
            amount = request.amount,
            "creating order"
        );
        self.post("/orders", request).await
    }

    /// Fetch the buyer's past orders
    pub async fn order_history(&self) -> ClientResult<Vec<PastOrder>> {
        self.get("/orders/history", &[]).await
    }
}

#[async_trait]
impl OrderApi for ShopClient {
    async fn create_order(
        &self,
        request: &OrderCreateRequest,
    ) -> Result<OrderCreateResponse, CheckoutError> {
        Ok(ShopClient::create_order(self, request).await?)
    }
}
