//! Typed client for the tienda API
//!
//! Thin wrapper over reqwest. Error bodies (`{"error": …}`) are surfaced
//! verbatim so the user sees exactly what the API said.

use anyhow::{bail, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use tienda_core::types::{
    OrderRequest, OrderSummary, Product, ProfileUpdate, SaleWithProduct, UserProfile,
};

/// The `{user, token}` payload returned by register and login.
#[derive(Debug, Deserialize)]
pub struct AuthPayload {
    /// The account, password stripped
    pub user: UserProfile,
    /// Bearer token for subsequent requests
    pub token: String,
}

/// Registration input.
#[derive(Debug, Serialize)]
pub struct RegisterInput {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Plaintext password
    pub password: String,
    /// Optional phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Optional postal address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: UserProfile,
}

#[derive(Debug, Deserialize)]
struct OrderEnvelope {
    order: OrderSummary,
}

/// The tienda API client.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client against a base URL like `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        match response.json::<ErrorBody>().await {
            Ok(body) => bail!(body.error),
            Err(_) => bail!("request failed with status {status}"),
        }
    }

    /// GET /products
    pub async fn products(&self) -> Result<Vec<Product>> {
        Self::parse(self.http.get(self.url("/products")).send().await?).await
    }

    /// GET /products/{id}
    pub async fn product(&self, id: u64) -> Result<Product> {
        let url = self.url(&format!("/products/{id}"));
        Self::parse(self.http.get(url).send().await?).await
    }

    /// GET /categories
    pub async fn categories(&self) -> Result<Vec<String>> {
        Self::parse(self.http.get(self.url("/categories")).send().await?).await
    }

    /// POST /auth/register
    pub async fn register(&self, input: &RegisterInput) -> Result<AuthPayload> {
        let response = self
            .http
            .post(self.url("/auth/register"))
            .json(input)
            .send()
            .await?;
        Self::parse(response).await
    }

    /// POST /auth/login
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthPayload> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&serde_json::json!({"email": email, "password": password}))
            .send()
            .await?;
        Self::parse(response).await
    }

    /// GET /auth/profile
    pub async fn profile(&self, token: &str) -> Result<UserProfile> {
        let response = self
            .http
            .get(self.url("/auth/profile"))
            .bearer_auth(token)
            .send()
            .await?;
        Self::parse(response).await
    }

    /// PUT /auth/profile
    pub async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<UserProfile> {
        let response = self
            .http
            .put(self.url("/auth/profile"))
            .bearer_auth(token)
            .json(update)
            .send()
            .await?;
        let envelope: UserEnvelope = Self::parse(response).await?;
        Ok(envelope.user)
    }

    /// POST /orders
    pub async fn place_order(&self, token: &str, request: &OrderRequest) -> Result<OrderSummary> {
        let response = self
            .http
            .post(self.url("/orders"))
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;
        let envelope: OrderEnvelope = Self::parse(response).await?;
        Ok(envelope.order)
    }

    /// GET /orders/my-orders
    pub async fn my_orders(&self, token: &str) -> Result<Vec<SaleWithProduct>> {
        let response = self
            .http
            .get(self.url("/orders/my-orders"))
            .bearer_auth(token)
            .send()
            .await?;
        Self::parse(response).await
    }
}
