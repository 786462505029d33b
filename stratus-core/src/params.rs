use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Optional arguments for keypair creation, supplied by the harness config.
///
/// With no fields set the compute service generates a fresh keypair
/// server-side, which is the common benchmarking case.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeypairParams {
    /// Import an existing public key instead of generating one server-side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_type: Option<KeyType>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    Ssh,
    X509,
}

/// Optional arguments for server boot.
///
/// Only the commonly-benchmarked fields are modeled; anything else the
/// harness config carries is forwarded verbatim through `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BootParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_zone: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}
