//! In-memory [`ComputeApi`] fake for scenario unit tests.
//!
//! Records every call in order and mimics the service-side referential
//! integrity rules: booting with an unknown keypair is a 400, deleting a
//! keypair still referenced by an active server is a 409.

use crate::client::{ApiError, ComputeApi};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use stratus_core::{BootParams, FlavorRef, ImageRef, Keypair, KeypairParams, Server};

#[derive(Default)]
pub(crate) struct FakeCompute {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    keypairs: HashMap<String, Keypair>,
    servers: HashMap<String, Server>,
    calls: Vec<String>,
    hide_listing: bool,
    blank_created_names: bool,
    fail_next: Option<&'static str>,
    next_server_id: u32,
}

impl FakeCompute {
    pub(crate) fn seed_keypair(&self, name: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.keypairs.insert(name.to_string(), fake_keypair(name));
    }

    /// Make `list_keypairs` return nothing, to exercise the membership
    /// post-condition.
    pub(crate) fn hide_listing(&self) {
        self.inner.lock().unwrap().hide_listing = true;
    }

    /// Make `create_keypair` answer with an empty name.
    pub(crate) fn blank_created_names(&self) {
        self.inner.lock().unwrap().blank_created_names = true;
    }

    /// Fail the next call to the named operation with a 503.
    pub(crate) fn fail_next(&self, op: &'static str) {
        self.inner.lock().unwrap().fail_next = Some(op);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub(crate) fn keypair_names(&self) -> Vec<String> {
        self.inner.lock().unwrap().keypairs.keys().cloned().collect()
    }

    pub(crate) fn server_ids(&self) -> Vec<String> {
        self.inner.lock().unwrap().servers.keys().cloned().collect()
    }
}

impl Inner {
    fn check_fail(&mut self, op: &'static str) -> Result<(), ApiError> {
        if self.fail_next == Some(op) {
            self.fail_next = None;
            return Err(service_error(503, "injected failure"));
        }
        Ok(())
    }
}

fn fake_keypair(name: &str) -> Keypair {
    Keypair {
        name: name.to_string(),
        public_key: format!("ssh-rsa FAKE {name}"),
        fingerprint: "aa:bb:cc".to_string(),
    }
}

fn service_error(status: u16, message: &str) -> ApiError {
    ApiError::Service {
        status,
        message: message.to_string(),
    }
}

#[async_trait]
impl ComputeApi for FakeCompute {
    async fn create_keypair(
        &self,
        name: &str,
        _params: &KeypairParams,
    ) -> Result<Keypair, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(format!("create_keypair {name}"));
        inner.check_fail("create_keypair")?;
        if inner.blank_created_names {
            return Ok(fake_keypair(""));
        }
        let keypair = fake_keypair(name);
        inner.keypairs.insert(name.to_string(), keypair.clone());
        Ok(keypair)
    }

    async fn list_keypairs(&self) -> Result<Vec<Keypair>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push("list_keypairs".to_string());
        inner.check_fail("list_keypairs")?;
        if inner.hide_listing {
            return Ok(Vec::new());
        }
        Ok(inner.keypairs.values().cloned().collect())
    }

    async fn get_keypair(&self, name: &str) -> Result<Keypair, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(format!("get_keypair {name}"));
        inner.check_fail("get_keypair")?;
        inner
            .keypairs
            .get(name)
            .cloned()
            .ok_or_else(|| service_error(404, "keypair not found"))
    }

    async fn delete_keypair(&self, name: &str) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(format!("delete_keypair {name}"));
        inner.check_fail("delete_keypair")?;
        if inner
            .servers
            .values()
            .any(|s| s.key_name.as_deref() == Some(name))
        {
            return Err(service_error(409, "keypair is in use by a server"));
        }
        inner
            .keypairs
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| service_error(404, "keypair not found"))
    }

    async fn boot_server(
        &self,
        name: &str,
        _image: &ImageRef,
        _flavor: &FlavorRef,
        key_name: &str,
        _params: &BootParams,
    ) -> Result<Server, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .calls
            .push(format!("boot_server {name} key_name={key_name}"));
        inner.check_fail("boot_server")?;
        if !inner.keypairs.contains_key(key_name) {
            return Err(service_error(400, "unknown key_name"));
        }
        inner.next_server_id += 1;
        let server = Server {
            id: format!("srv-{}", inner.next_server_id),
            name: name.to_string(),
            status: "ACTIVE".to_string(),
            key_name: Some(key_name.to_string()),
        };
        inner.servers.insert(server.id.clone(), server.clone());
        Ok(server)
    }

    async fn delete_server(&self, id: &str) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(format!("delete_server {id}"));
        inner.check_fail("delete_server")?;
        inner
            .servers
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| service_error(404, "server not found"))
    }
}
