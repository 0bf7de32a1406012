use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;

use crate::domain::{NewProduct, ProductId, SessionToken, TestIdentity};

/// Thin HTTP client for the inventory API under test.
///
/// One method per endpoint; every method hands back the raw status and body
/// without interpreting them. All assertions live in [`crate::suite`], which
/// keeps this layer reusable for ad-hoc poking at a deployment.
#[derive(Clone, Debug)]
pub struct InventoryApiClient {
    base_url: String,
    http_client: Client,
}

/// Status code plus the raw body text of one response.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ApiClientError {
    #[error("failed to reach the inventory API: {0}")]
    Transport(#[from] reqwest::Error),
}

impl InventoryApiClient {
    pub fn new(base_url: String, timeout: std::time::Duration) -> Self {
        let http_client = Client::builder().timeout(timeout).build().unwrap();
        Self {
            base_url,
            http_client,
        }
    }

    #[tracing::instrument(name = "Registering test user", skip(self, identity))]
    pub async fn post_register(
        &self,
        identity: &TestIdentity,
    ) -> Result<ApiResponse, ApiClientError> {
        let url = format!("{}/auth/register", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .json(&credentials_body(identity))
            .send()
            .await?;
        Self::capture(response).await
    }

    #[tracing::instrument(name = "Logging in", skip(self, identity))]
    pub async fn post_login(&self, identity: &TestIdentity) -> Result<ApiResponse, ApiClientError> {
        let url = format!("{}/auth/login", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .json(&credentials_body(identity))
            .send()
            .await?;
        Self::capture(response).await
    }

    #[tracing::instrument(name = "Adding product", skip(self, token, product))]
    pub async fn post_product(
        &self,
        token: &SessionToken,
        product: &NewProduct,
    ) -> Result<ApiResponse, ApiClientError> {
        let url = format!("{}/products", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(token.expose())
            .json(product)
            .send()
            .await?;
        Self::capture(response).await
    }

    #[tracing::instrument(name = "Updating product quantity", skip(self, token))]
    pub async fn put_quantity(
        &self,
        token: &SessionToken,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<ApiResponse, ApiClientError> {
        let url = format!("{}/products/{}/quantity", self.base_url, product_id);
        let response = self
            .http_client
            .put(&url)
            .bearer_auth(token.expose())
            .json(&serde_json::json!({ "quantity": quantity }))
            .send()
            .await?;
        Self::capture(response).await
    }

    #[tracing::instrument(name = "Listing products", skip(self, token))]
    pub async fn get_products(
        &self,
        token: &SessionToken,
    ) -> Result<ApiResponse, ApiClientError> {
        let url = format!("{}/products", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token.expose())
            .send()
            .await?;
        Self::capture(response).await
    }

    async fn capture(response: reqwest::Response) -> Result<ApiResponse, ApiClientError> {
        let status = response.status();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }
}

fn credentials_body(identity: &TestIdentity) -> serde_json::Value {
    serde_json::json!({
        "username": identity.username(),
        "password": identity.password().expose_secret(),
    })
}
