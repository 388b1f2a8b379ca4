//! Test helper module
//!
//! Provides an in-memory management API and scripted host collaborators.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use cosmic_settings_api::{
    ApiError, Configuration, HypervisorCapability, LdapConfiguration, ManagementClient,
    Operation, ParamValue, RemoteInvoker, RequestParams,
};
use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::registry::SectionRegistry;
use crate::services::{PanelService, ServiceContext};
use crate::traits::{ConfirmationRequest, Confirmer};
use crate::types::FieldValues;

// ===== FakeInvoker =====

#[derive(Default)]
struct FakeState {
    settings: Vec<Configuration>,
    ldap: Vec<LdapConfiguration>,
    hypervisors: Vec<HypervisorCapability>,
}

/// In-memory management API answering with server-shaped JSON.
pub struct FakeInvoker {
    state: RwLock<FakeState>,
    calls: RwLock<Vec<(Operation, RequestParams)>>,
    /// Canned bodies that replace the computed response
    raw_responses: RwLock<HashMap<Operation, Value>>,
    /// Errors returned instead of a response
    failures: RwLock<HashMap<Operation, ApiError>>,
}

impl FakeInvoker {
    /// Empty settings and LDAP lists, two hypervisor capability entries.
    pub fn new() -> Self {
        let state = FakeState {
            hypervisors: vec![
                hypervisor("1b9e", "KVM", "default", 50),
                hypervisor("7c20", "XenServer", "8.2.0", 500),
            ],
            ..FakeState::default()
        };
        Self {
            state: RwLock::new(state),
            calls: RwLock::new(Vec::new()),
            raw_responses: RwLock::new(HashMap::new()),
            failures: RwLock::new(HashMap::new()),
        }
    }

    pub async fn insert_setting(&self, setting: Configuration) {
        self.state.write().await.settings.push(setting);
    }

    pub async fn insert_ldap(&self, server: LdapConfiguration) {
        self.state.write().await.ldap.push(server);
    }

    pub async fn ldap_hostnames(&self) -> Vec<String> {
        self.state
            .read()
            .await
            .ldap
            .iter()
            .map(|s| s.hostname.clone())
            .collect()
    }

    pub async fn hypervisor_ids(&self) -> Vec<String> {
        self.state
            .read()
            .await
            .hypervisors
            .iter()
            .map(|h| h.id.clone())
            .collect()
    }

    pub async fn set_raw_response(&self, operation: Operation, body: Value) {
        self.raw_responses.write().await.insert(operation, body);
    }

    pub async fn set_failure(&self, operation: Operation, error: ApiError) {
        self.failures.write().await.insert(operation, error);
    }

    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    pub async fn last_call(&self) -> Option<(Operation, RequestParams)> {
        self.calls.read().await.last().cloned()
    }

    async fn respond(
        &self,
        operation: Operation,
        params: &RequestParams,
    ) -> Result<Value, ApiError> {
        let mut state = self.state.write().await;
        let env = operation.envelope();

        match operation {
            Operation::ListConfigurations => {
                let matching: Vec<_> = state
                    .settings
                    .iter()
                    .filter(|s| contains(&s.name, text(params, "name")))
                    .collect();
                Ok(list_body(env, "configuration", &matching, params))
            }
            Operation::UpdateConfiguration => {
                let name = text(params, "name").unwrap_or_default();
                let setting = state
                    .settings
                    .iter_mut()
                    .find(|s| s.name == name)
                    .ok_or_else(|| rejected(operation, "Configuration not found"))?;
                setting.value = text(params, "value");
                Ok(json!({ env: { "configuration": setting.clone() } }))
            }
            Operation::ListLdapConfigurations => {
                let matching: Vec<_> = state
                    .ldap
                    .iter()
                    .filter(|s| contains(&s.hostname, text(params, "hostname")))
                    .collect();
                Ok(list_body(env, "LdapConfiguration", &matching, params))
            }
            Operation::AddLdapConfiguration => {
                let hostname = text(params, "hostname").unwrap_or_default();
                let port = number(params, "port").unwrap_or_default();
                if state.ldap.iter().any(|s| s.hostname == hostname) {
                    return Err(rejected(operation, "Duplicate LDAP configuration"));
                }
                let port = u16::try_from(port).map_err(|_| rejected(operation, "Invalid port"))?;
                state.ldap.push(LdapConfiguration {
                    hostname: hostname.clone(),
                    port,
                });
                // The server reports the port as a string here.
                Ok(json!({ env: { "LdapAddConfiguration": {
                    "hostname": hostname,
                    "port": port.to_string()
                } } }))
            }
            Operation::DeleteLdapConfiguration => {
                let hostname = text(params, "hostname").unwrap_or_default();
                let before = state.ldap.len();
                state.ldap.retain(|s| s.hostname != hostname);
                if state.ldap.len() == before {
                    return Err(rejected(operation, "Cannot find LDAP configuration"));
                }
                Ok(json!({ env: { "LdapDeleteConfiguration": { "hostname": hostname } } }))
            }
            Operation::ListHypervisorCapabilities => {
                let id = text(params, "id");
                let keyword = text(params, "keyword").map(|k| k.to_lowercase());
                let matching: Vec<_> = state
                    .hypervisors
                    .iter()
                    .filter(|h| id.as_ref().map_or(true, |id| &h.id == id))
                    .filter(|h| contains(&h.hypervisor.to_lowercase(), keyword.clone()))
                    .collect();
                Ok(list_body(env, "hypervisorCapabilities", &matching, params))
            }
            Operation::UpdateHypervisorCapabilities => {
                let id = text(params, "id").unwrap_or_default();
                let capability = state
                    .hypervisors
                    .iter_mut()
                    .find(|h| h.id == id)
                    .ok_or_else(|| rejected(operation, "Hypervisor capability not found"))?;
                if let Some(limit) = number(params, "maxguestslimit") {
                    capability.max_guests_limit = Some(limit);
                }
                Ok(json!({ env: { "null": capability.clone() } }))
            }
        }
    }
}

#[async_trait]
impl RemoteInvoker for FakeInvoker {
    async fn invoke(
        &self,
        operation: Operation,
        params: &RequestParams,
    ) -> Result<Value, ApiError> {
        self.calls.write().await.push((operation, params.clone()));

        if let Some(err) = self.failures.read().await.get(&operation) {
            return Err(err.clone());
        }
        if let Some(body) = self.raw_responses.read().await.get(&operation) {
            return Ok(body.clone());
        }
        self.respond(operation, params).await
    }
}

fn text(params: &RequestParams, key: &str) -> Option<String> {
    params.get_str(key)
}

fn number(params: &RequestParams, key: &str) -> Option<i64> {
    match params.get(key)? {
        ParamValue::Number(n) => Some(*n),
        ParamValue::Text(s) => s.parse().ok(),
    }
}

fn contains(haystack: &str, needle: Option<String>) -> bool {
    needle.map_or(true, |n| haystack.contains(&n))
}

fn rejected(operation: Operation, message: &str) -> ApiError {
    ApiError::Api {
        operation: operation.name().to_string(),
        status: 431,
        error_code: Some(431),
        raw_message: message.to_string(),
    }
}

/// One page of `items`, shaped the way the server does it: an empty result omits the
/// entity key entirely.
fn list_body<T: serde::Serialize>(
    envelope: &str,
    key: &str,
    items: &[&T],
    params: &RequestParams,
) -> Value {
    if items.is_empty() {
        return json!({ envelope: {} });
    }
    let page = number(params, "page").unwrap_or(1).max(1);
    let size = number(params, "pagesize").unwrap_or(20).max(1);
    let start = usize::try_from((page - 1) * size).unwrap_or(usize::MAX);
    let size = usize::try_from(size).unwrap_or(usize::MAX);
    let page_items: Vec<_> = items.iter().skip(start).take(size).collect();
    json!({ envelope: { "count": items.len(), key: page_items } })
}

// ===== Fixtures =====

pub fn setting(name: &str, category: &str, value: &str) -> Configuration {
    Configuration {
        name: name.to_string(),
        category: category.to_string(),
        value: Some(value.to_string()),
        description: Some(format!("Description of {name}")),
        scope: None,
        isdynamic: Some(false),
    }
}

pub fn ldap_server(hostname: &str, port: u16) -> LdapConfiguration {
    LdapConfiguration {
        hostname: hostname.to_string(),
        port,
    }
}

pub fn hypervisor(id: &str, name: &str, version: &str, max_guests: i64) -> HypervisorCapability {
    HypervisorCapability {
        id: id.to_string(),
        hypervisor: name.to_string(),
        hypervisor_version: Some(version.to_string()),
        max_guests_limit: Some(max_guests),
        max_data_volumes_limit: None,
        max_hosts_per_cluster: None,
        security_group_enabled: Some(true),
        storage_motion_enabled: None,
    }
}

pub fn field_values(pairs: &[(&str, &str)]) -> FieldValues {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

// ===== ScriptedConfirmer =====

/// Confirmer with a fixed answer that records every prompt it was shown.
pub struct ScriptedConfirmer {
    answer: bool,
    seen: RwLock<Vec<(&'static str, Option<String>)>>,
}

impl ScriptedConfirmer {
    pub fn accept() -> Self {
        Self {
            answer: true,
            seen: RwLock::new(Vec::new()),
        }
    }

    pub fn decline() -> Self {
        Self {
            answer: false,
            seen: RwLock::new(Vec::new()),
        }
    }

    pub async fn prompts(&self) -> Vec<&'static str> {
        self.seen.read().await.iter().map(|(p, _)| *p).collect()
    }

    pub async fn targets(&self) -> Vec<Option<String>> {
        self.seen.read().await.iter().map(|(_, t)| t.clone()).collect()
    }
}

#[async_trait]
impl Confirmer for ScriptedConfirmer {
    async fn confirm(&self, request: &ConfirmationRequest<'_>) -> bool {
        self.seen
            .write()
            .await
            .push((request.prompt, request.target.map(str::to_string)));
        self.answer
    }
}

// ===== Factories =====

pub fn fake_client() -> (ManagementClient, Arc<FakeInvoker>) {
    let fake = Arc::new(FakeInvoker::new());
    (ManagementClient::new(fake.clone()), fake)
}

/// Standard registry over a fresh [`FakeInvoker`], default page size.
pub fn create_test_panel_service() -> (PanelService, Arc<FakeInvoker>) {
    let (client, fake) = fake_client();
    let registry = SectionRegistry::standard(&client).expect("standard registry is valid");
    let ctx = ServiceContext::with_default_page_size(Arc::new(registry));
    (PanelService::new(Arc::new(ctx)), fake)
}
