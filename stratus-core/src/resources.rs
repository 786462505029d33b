use serde::{Deserialize, Serialize};

/// A keypair record as returned by the compute service.
///
/// Keypairs are owned by the remote service; this is a short-lived local
/// view used to sequence dependent calls within a single scenario run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Keypair {
    pub name: String,
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub fingerprint: String,
}

/// A server record as returned by the compute service.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Server {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,
}

/// Concrete image reference, resolved by the harness from a logical name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

/// Concrete flavor reference, resolved by the harness from a logical name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlavorRef(pub String);

impl ImageRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FlavorRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
