//! In-memory mock of a compute service's keypair and server endpoints.
//!
//! Speaks just enough of the API surface for the stratus scenarios:
//! `/os-keypairs` CRUD plus `/servers` boot/delete. Referential integrity
//! mirrors the real service: booting with an unknown `key_name` is a 400,
//! deleting a keypair still referenced by an active server is a 409.

use axum::{
    debug_handler,
    extract::Path,
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::RwLock;
use tracing::debug;

pub async fn run(addr: SocketAddr) {
    let app = router();
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

pub fn router() -> Router {
    Router::new()
        .route("/os-keypairs", post(create_keypair).get(list_keypairs))
        .route(
            "/os-keypairs/:name",
            get(get_keypair).delete(delete_keypair),
        )
        .route("/servers", post(boot_server))
        .route("/servers/:id", delete(delete_server))
}

/// Drop all keypairs and servers. For test isolation.
pub fn reset() {
    KEYPAIRS.write().unwrap().clear();
    SERVERS.write().unwrap().clear();
}

#[derive(Clone, Serialize)]
struct KeypairRecord {
    name: String,
    public_key: String,
    fingerprint: String,
}

#[derive(Clone, Serialize)]
struct ServerRecord {
    id: String,
    name: String,
    status: String,
    key_name: Option<String>,
}

lazy_static! {
    static ref KEYPAIRS: RwLock<HashMap<String, KeypairRecord>> = RwLock::new(HashMap::new());
    static ref SERVERS: RwLock<HashMap<String, ServerRecord>> = RwLock::new(HashMap::new());
}

#[derive(Deserialize)]
struct KeypairCreateBody {
    keypair: KeypairCreate,
}

#[derive(Deserialize)]
struct KeypairCreate {
    name: String,
    #[serde(default)]
    public_key: Option<String>,
}

#[debug_handler]
async fn create_keypair(
    Json(body): Json<KeypairCreateBody>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let req = body.keypair;
    if req.name.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "keypair name is empty".into()));
    }

    let mut keypairs = KEYPAIRS.write().unwrap();
    if keypairs.contains_key(&req.name) {
        return Err((
            StatusCode::CONFLICT,
            format!("keypair {} already exists", req.name),
        ));
    }

    debug!(name = %req.name, "MOCK COMPUTE ___ CREATE KEYPAIR");
    let record = KeypairRecord {
        fingerprint: fingerprint(&req.name),
        public_key: req
            .public_key
            .unwrap_or_else(|| format!("ssh-rsa MOCK {}", req.name)),
        name: req.name,
    };
    keypairs.insert(record.name.clone(), record.clone());
    Ok(Json(json!({ "keypair": record })))
}

#[debug_handler]
async fn list_keypairs() -> Json<Value> {
    let keypairs = KEYPAIRS.read().unwrap();
    let entries: Vec<Value> = keypairs.values().map(|k| json!({ "keypair": k })).collect();
    Json(json!({ "keypairs": entries }))
}

#[debug_handler]
async fn get_keypair(Path(name): Path<String>) -> Result<Json<Value>, (StatusCode, String)> {
    let keypairs = KEYPAIRS.read().unwrap();
    match keypairs.get(&name) {
        Some(record) => Ok(Json(json!({ "keypair": record }))),
        None => Err((StatusCode::NOT_FOUND, format!("keypair {name} not found"))),
    }
}

#[debug_handler]
async fn delete_keypair(Path(name): Path<String>) -> Result<StatusCode, (StatusCode, String)> {
    {
        let servers = SERVERS.read().unwrap();
        if servers
            .values()
            .any(|s| s.key_name.as_deref() == Some(name.as_str()))
        {
            return Err((
                StatusCode::CONFLICT,
                format!("keypair {name} is in use by a server"),
            ));
        }
    }

    debug!(name = %name, "MOCK COMPUTE ___ DELETE KEYPAIR");
    let mut keypairs = KEYPAIRS.write().unwrap();
    match keypairs.remove(&name) {
        Some(_) => Ok(StatusCode::ACCEPTED),
        None => Err((StatusCode::NOT_FOUND, format!("keypair {name} not found"))),
    }
}

#[derive(Deserialize)]
struct ServerCreateBody {
    server: ServerCreate,
}

#[derive(Deserialize)]
struct ServerCreate {
    name: String,
    #[serde(rename = "imageRef")]
    image_ref: String,
    #[serde(rename = "flavorRef")]
    flavor_ref: String,
    #[serde(default)]
    key_name: Option<String>,
}

#[debug_handler]
async fn boot_server(
    Json(body): Json<ServerCreateBody>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let req = body.server;
    if req.image_ref.is_empty() || req.flavor_ref.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "imageRef and flavorRef are required".into(),
        ));
    }

    if let Some(key_name) = &req.key_name {
        let keypairs = KEYPAIRS.read().unwrap();
        if !keypairs.contains_key(key_name) {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("unknown key_name {key_name}"),
            ));
        }
    }

    debug!(name = %req.name, "MOCK COMPUTE ___ BOOT SERVER");
    let record = ServerRecord {
        id: uuid::Uuid::new_v4().to_string(),
        name: req.name,
        status: "ACTIVE".to_string(),
        key_name: req.key_name,
    };
    SERVERS
        .write()
        .unwrap()
        .insert(record.id.clone(), record.clone());
    Ok(Json(json!({ "server": record })))
}

#[debug_handler]
async fn delete_server(Path(id): Path<String>) -> Result<StatusCode, (StatusCode, String)> {
    debug!(id = %id, "MOCK COMPUTE ___ DELETE SERVER");
    let mut servers = SERVERS.write().unwrap();
    match servers.remove(&id) {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err((StatusCode::NOT_FOUND, format!("server {id} not found"))),
    }
}

fn fingerprint(name: &str) -> String {
    let sum: u32 = name.bytes().map(u32::from).sum();
    format!("{:02x}:{:02x}:{:02x}", sum & 0xff, (sum >> 8) & 0xff, name.len() & 0xff)
}
