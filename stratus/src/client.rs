//! Compute service client abstraction.
//!
//! [`ComputeApi`] is the seam between scenario bodies and the remote
//! service: scenarios are generic over it, tests swap in an in-memory
//! fake, and [`HttpComputeClient`] is the standard HTTP implementation.
//! Every operation is a single attempt; retry and backoff policy belongs
//! to the surrounding harness.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use stratus_core::{BootParams, FlavorRef, ImageRef, KeyType, Keypair, KeypairParams, Server};
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, body decode).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("compute API returned {status}: {message}")]
    Service { status: u16, message: String },
}

/// The compute service operations the keypair scenarios use.
#[async_trait]
pub trait ComputeApi: Send + Sync {
    async fn create_keypair(
        &self,
        name: &str,
        params: &KeypairParams,
    ) -> Result<Keypair, ApiError>;

    async fn list_keypairs(&self) -> Result<Vec<Keypair>, ApiError>;

    async fn get_keypair(&self, name: &str) -> Result<Keypair, ApiError>;

    async fn delete_keypair(&self, name: &str) -> Result<(), ApiError>;

    async fn boot_server(
        &self,
        name: &str,
        image: &ImageRef,
        flavor: &FlavorRef,
        key_name: &str,
        params: &BootParams,
    ) -> Result<Server, ApiError>;

    async fn delete_server(&self, id: &str) -> Result<(), ApiError>;
}

/// HTTP client for a compute API exposing the usual `/os-keypairs` and
/// `/servers` resources.
pub struct HttpComputeClient {
    http: reqwest::Client,
    base: Url,
    token: Option<String>,
}

impl HttpComputeClient {
    pub fn new(base: Url) -> Self {
        Self::with_client(reqwest::Client::new(), base)
    }

    /// Use a preconfigured [`reqwest::Client`], e.g. with connect and
    /// request timeouts suited to the deployment being benchmarked.
    pub fn with_client(http: reqwest::Client, base: Url) -> Self {
        Self {
            http,
            base,
            token: None,
        }
    }

    /// Authenticate requests with an `X-Auth-Token` header.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut req = self.http.request(method, self.url(path));
        if let Some(token) = &self.token {
            req = req.header("X-Auth-Token", token);
        }
        req
    }
}

async fn into_service_error(resp: reqwest::Response) -> ApiError {
    let status = resp.status().as_u16();
    let message = resp.text().await.unwrap_or_default();
    ApiError::Service { status, message }
}

async fn checked(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    if resp.status().is_success() {
        Ok(resp)
    } else {
        Err(into_service_error(resp).await)
    }
}

#[async_trait]
impl ComputeApi for HttpComputeClient {
    async fn create_keypair(
        &self,
        name: &str,
        params: &KeypairParams,
    ) -> Result<Keypair, ApiError> {
        debug!(name, "creating keypair");
        let body = KeypairCreateBody {
            keypair: KeypairCreate {
                name,
                public_key: params.public_key.as_deref(),
                key_type: params.key_type,
            },
        };
        let resp = self
            .request(reqwest::Method::POST, "os-keypairs")
            .json(&body)
            .send()
            .await?;
        let envelope: KeypairEnvelope = checked(resp).await?.json().await?;
        Ok(envelope.keypair)
    }

    async fn list_keypairs(&self) -> Result<Vec<Keypair>, ApiError> {
        let resp = self
            .request(reqwest::Method::GET, "os-keypairs")
            .send()
            .await?;
        let listing: KeypairListing = checked(resp).await?.json().await?;
        Ok(listing.keypairs.into_iter().map(|e| e.keypair).collect())
    }

    async fn get_keypair(&self, name: &str) -> Result<Keypair, ApiError> {
        let resp = self
            .request(reqwest::Method::GET, &format!("os-keypairs/{name}"))
            .send()
            .await?;
        let envelope: KeypairEnvelope = checked(resp).await?.json().await?;
        Ok(envelope.keypair)
    }

    async fn delete_keypair(&self, name: &str) -> Result<(), ApiError> {
        debug!(name, "deleting keypair");
        let resp = self
            .request(reqwest::Method::DELETE, &format!("os-keypairs/{name}"))
            .send()
            .await?;
        checked(resp).await?;
        Ok(())
    }

    async fn boot_server(
        &self,
        name: &str,
        image: &ImageRef,
        flavor: &FlavorRef,
        key_name: &str,
        params: &BootParams,
    ) -> Result<Server, ApiError> {
        debug!(name, key_name, "booting server");
        let body = ServerCreateBody {
            server: ServerCreate {
                name,
                image_ref: image.as_str(),
                flavor_ref: flavor.as_str(),
                key_name,
                availability_zone: params.availability_zone.as_deref(),
                metadata: &params.metadata,
                extra: &params.extra,
            },
        };
        let resp = self
            .request(reqwest::Method::POST, "servers")
            .json(&body)
            .send()
            .await?;
        let envelope: ServerEnvelope = checked(resp).await?.json().await?;
        Ok(envelope.server)
    }

    async fn delete_server(&self, id: &str) -> Result<(), ApiError> {
        debug!(id, "deleting server");
        let resp = self
            .request(reqwest::Method::DELETE, &format!("servers/{id}"))
            .send()
            .await?;
        checked(resp).await?;
        Ok(())
    }
}

/* Wire types */

#[derive(Serialize)]
struct KeypairCreateBody<'a> {
    keypair: KeypairCreate<'a>,
}

#[derive(Serialize)]
struct KeypairCreate<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    public_key: Option<&'a str>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    key_type: Option<KeyType>,
}

#[derive(Deserialize)]
struct KeypairEnvelope {
    keypair: Keypair,
}

#[derive(Deserialize)]
struct KeypairListing {
    keypairs: Vec<KeypairEnvelope>,
}

#[derive(Serialize)]
struct ServerCreateBody<'a> {
    server: ServerCreate<'a>,
}

#[derive(Serialize)]
struct ServerCreate<'a> {
    name: &'a str,
    #[serde(rename = "imageRef")]
    image_ref: &'a str,
    #[serde(rename = "flavorRef")]
    flavor_ref: &'a str,
    key_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    availability_zone: Option<&'a str>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    metadata: &'a BTreeMap<String, String>,
    #[serde(flatten)]
    extra: &'a BTreeMap<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct ServerEnvelope {
    server: Server,
}
