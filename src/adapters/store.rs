//! Remote store gateway — Firebase Realtime Database over REST.
//!
//! Implements [`StorePort`]: scalar reads and writes against a
//! hierarchical key space (`{path}.json` endpoints, JSON payloads via
//! `serde_json`).  Session bootstrap is anonymous sign-up; the resulting
//! token authenticates every request.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real HTTPS requests through the ESP-IDF
//!   HTTP client with the certificate bundle attached.
//! - **all other targets**: an in-memory JSON map with failure injection
//!   for host-side tests.
//!
//! ## Failure policy
//!
//! Steady-state errors are returned to the caller, which logs and treats
//! the value as absent for the cycle.  Nothing here retries; the next
//! natural poll is the retry.

use log::info;
use serde_json::Value;

use crate::app::ports::StorePort;
use crate::error::StoreError;

#[cfg(target_os = "espidf")]
use esp_idf_svc::http::client::{Configuration as HttpConfiguration, EspHttpConnection};
#[cfg(target_os = "espidf")]
use esp_idf_svc::http::Method;

/// Gateway to the Firebase RTDB.
pub struct RtdbStoreAdapter {
    base_url: &'static str,
    api_key: &'static str,
    auth_token: Option<String>,

    #[cfg(not(target_os = "espidf"))]
    sim: SimState,
}

#[cfg(not(target_os = "espidf"))]
#[derive(Default)]
struct SimState {
    values: std::collections::BTreeMap<String, Value>,
    offline: bool,
}

impl RtdbStoreAdapter {
    pub fn new(base_url: &'static str, api_key: &'static str) -> Self {
        Self {
            base_url,
            api_key,
            auth_token: None,
            #[cfg(not(target_os = "espidf"))]
            sim: SimState::default(),
        }
    }

    /// Whether session bootstrap has completed.
    pub fn is_connected(&self) -> bool {
        self.auth_token.is_some()
    }

    // ── Session bootstrap ─────────────────────────────────────

    /// Anonymous sign-up against the identity endpoint.  The caller
    /// retries this forever at startup; it is never called again after
    /// success.
    #[cfg(target_os = "espidf")]
    pub fn connect(&mut self) -> Result<(), StoreError> {
        let url = format!(
            "https://identitytoolkit.googleapis.com/v1/accounts:signUp?key={}",
            self.api_key
        );
        let body = self.request(
            Method::Post,
            &url,
            Some(br#"{"returnSecureToken":true}"#),
        )?;
        let parsed: Value =
            serde_json::from_slice(&body).map_err(|_| StoreError::MalformedPayload)?;
        let token = parsed
            .get("idToken")
            .and_then(Value::as_str)
            .ok_or(StoreError::AuthFailed)?;
        self.auth_token = Some(token.to_owned());
        info!("store: anonymous session established");
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn connect(&mut self) -> Result<(), StoreError> {
        let _ = self.api_key;
        if self.sim.offline {
            return Err(StoreError::AuthFailed);
        }
        self.auth_token = Some(String::from("sim-token"));
        info!("store(sim): session established");
        Ok(())
    }

    // ── Scalar access ─────────────────────────────────────────

    fn read_value(&mut self, path: &str) -> Result<Option<Value>, StoreError> {
        let token = self.auth_token.as_deref().ok_or(StoreError::NotConnected)?;

        #[cfg(target_os = "espidf")]
        {
            let url = format!("{}/{}.json?auth={}", self.base_url, path, token);
            let body = self.request(Method::Get, &url, None)?;
            let parsed: Value =
                serde_json::from_slice(&body).map_err(|_| StoreError::MalformedPayload)?;
            Ok(match parsed {
                Value::Null => None,
                other => Some(other),
            })
        }

        #[cfg(not(target_os = "espidf"))]
        {
            let _ = (token, self.base_url);
            if self.sim.offline {
                return Err(StoreError::RequestFailed);
            }
            Ok(self.sim.values.get(path).cloned())
        }
    }

    fn write_value(&mut self, path: &str, value: Value) -> Result<(), StoreError> {
        let token = self.auth_token.as_deref().ok_or(StoreError::NotConnected)?;

        #[cfg(target_os = "espidf")]
        {
            let url = format!("{}/{}.json?auth={}", self.base_url, path, token);
            let body = serde_json::to_string(&value).map_err(|_| StoreError::MalformedPayload)?;
            self.request(Method::Put, &url, Some(body.as_bytes()))?;
            Ok(())
        }

        #[cfg(not(target_os = "espidf"))]
        {
            let _ = token;
            if self.sim.offline {
                return Err(StoreError::RequestFailed);
            }
            self.sim.values.insert(path.to_owned(), value);
            Ok(())
        }
    }

    // ── HTTP plumbing (espidf only) ───────────────────────────

    #[cfg(target_os = "espidf")]
    fn request(
        &mut self,
        method: Method,
        url: &str,
        body: Option<&[u8]>,
    ) -> Result<Vec<u8>, StoreError> {
        let mut conn = EspHttpConnection::new(&HttpConfiguration {
            use_global_ca_store: true,
            crt_bundle_attach: Some(esp_idf_svc::sys::esp_crt_bundle_attach),
            ..Default::default()
        })
        .map_err(|_| StoreError::RequestFailed)?;

        let headers: &[(&str, &str)] = if body.is_some() {
            &[("Content-Type", "application/json")]
        } else {
            &[]
        };
        conn.initiate_request(method, url, headers)
            .map_err(|_| StoreError::RequestFailed)?;
        if let Some(payload) = body {
            let mut written = 0;
            while written < payload.len() {
                written += conn
                    .write(&payload[written..])
                    .map_err(|_| StoreError::RequestFailed)?;
            }
        }
        conn.initiate_response()
            .map_err(|_| StoreError::RequestFailed)?;
        if conn.status() != 200 {
            return Err(StoreError::RequestFailed);
        }

        let mut response = Vec::new();
        let mut buf = [0u8; 256];
        loop {
            let n = conn.read(&mut buf).map_err(|_| StoreError::RequestFailed)?;
            if n == 0 {
                break;
            }
            response.extend_from_slice(&buf[..n]);
        }
        Ok(response)
    }

    // ── Host simulation controls ──────────────────────────────

    /// Seed a value as if a remote client had written it.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_insert(&mut self, path: &str, value: Value) {
        self.sim.values.insert(path.to_owned(), value);
    }

    /// Remove a value, making the path absent.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_remove(&mut self, path: &str) {
        self.sim.values.remove(path);
    }

    /// Force every subsequent operation to fail (connectivity loss).
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_offline(&mut self, offline: bool) {
        self.sim.offline = offline;
    }

    /// What the controller last published to a path, if anything.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_value(&self, path: &str) -> Option<&Value> {
        self.sim.values.get(path)
    }
}

// ── StorePort implementation ──────────────────────────────────

impl StorePort for RtdbStoreAdapter {
    fn read_int(&mut self, path: &str) -> Result<Option<i32>, StoreError> {
        match self.read_value(path)? {
            None => Ok(None),
            Some(v) => v
                .as_i64()
                .map(|n| Some(n as i32))
                .ok_or(StoreError::MalformedPayload),
        }
    }

    fn read_bool(&mut self, path: &str) -> Result<Option<bool>, StoreError> {
        match self.read_value(path)? {
            None => Ok(None),
            Some(v) => v.as_bool().map(Some).ok_or(StoreError::MalformedPayload),
        }
    }

    fn write_float(&mut self, path: &str, value: f32) -> Result<(), StoreError> {
        self.write_value(path, serde_json::json!(value))
    }

    fn write_int(&mut self, path: &str, value: i32) -> Result<(), StoreError> {
        self.write_value(path, serde_json::json!(value))
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    fn connected_adapter() -> RtdbStoreAdapter {
        let mut store = RtdbStoreAdapter::new("https://example.test", "key");
        store.connect().unwrap();
        store
    }

    #[test]
    fn reads_require_session() {
        let mut store = RtdbStoreAdapter::new("https://example.test", "key");
        assert_eq!(
            store.read_int("kitchen/led"),
            Err(StoreError::NotConnected)
        );
    }

    #[test]
    fn absent_path_reads_as_none() {
        let mut store = connected_adapter();
        assert_eq!(store.read_int("kitchen/led"), Ok(None));
        assert_eq!(store.read_bool("garage/garageDoor"), Ok(None));
    }

    #[test]
    fn scalar_roundtrip() {
        let mut store = connected_adapter();
        store.sim_insert("kitchen/led", serde_json::json!(75));
        store.sim_insert("garage/garageDoor", serde_json::json!(true));
        assert_eq!(store.read_int("kitchen/led"), Ok(Some(75)));
        assert_eq!(store.read_bool("garage/garageDoor"), Ok(Some(true)));

        store.write_int("globalData/gaz", 1).unwrap();
        assert_eq!(store.sim_value("globalData/gaz"), Some(&serde_json::json!(1)));
    }

    #[test]
    fn type_mismatch_is_malformed() {
        let mut store = connected_adapter();
        store.sim_insert("kitchen/led", serde_json::json!("bright"));
        assert_eq!(
            store.read_int("kitchen/led"),
            Err(StoreError::MalformedPayload)
        );
    }

    #[test]
    fn offline_fails_every_operation() {
        let mut store = connected_adapter();
        store.sim_set_offline(true);
        assert_eq!(
            store.read_bool("garage/garageDoor"),
            Err(StoreError::RequestFailed)
        );
        assert_eq!(
            store.write_float("globalData/temp", 21.5),
            Err(StoreError::RequestFailed)
        );
    }
}
