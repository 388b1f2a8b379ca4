//! Per-operation response schemas.
//!
//! Every operation nests its payload under `<envelope>.<entity key>`. Each schema below pins
//! both keys to one operation and one entity type, and the decoders fail with
//! [`ApiError::EnvelopeMismatch`] instead of yielding an empty or partial row.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ApiError, Result};
use crate::operation::{NULL_ENTITY_KEY_QUIRK, Operation};
use crate::types::{Configuration, HypervisorCapability, LdapConfiguration, ListPage};

/// Binds an operation to the key and type of its payload.
pub trait ResponseSchema {
    /// Operation whose response this describes.
    const OPERATION: Operation;
    /// Top-level key of the response.
    const ENVELOPE: &'static str = Self::OPERATION.envelope();
    /// Key inside the envelope holding the payload.
    const ENTITY_KEY: &'static str;
    /// Payload element type.
    type Entity: DeserializeOwned;
}

pub struct ListConfigurationsResponse;

impl ResponseSchema for ListConfigurationsResponse {
    const OPERATION: Operation = Operation::ListConfigurations;
    const ENTITY_KEY: &'static str = "configuration";
    type Entity = Configuration;
}

pub struct UpdateConfigurationResponse;

impl ResponseSchema for UpdateConfigurationResponse {
    const OPERATION: Operation = Operation::UpdateConfiguration;
    const ENTITY_KEY: &'static str = "configuration";
    type Entity = Configuration;
}

pub struct ListLdapConfigurationsResponse;

impl ResponseSchema for ListLdapConfigurationsResponse {
    const OPERATION: Operation = Operation::ListLdapConfigurations;
    const ENTITY_KEY: &'static str = "LdapConfiguration";
    type Entity = LdapConfiguration;
}

pub struct AddLdapConfigurationResponse;

impl ResponseSchema for AddLdapConfigurationResponse {
    const OPERATION: Operation = Operation::AddLdapConfiguration;
    const ENTITY_KEY: &'static str = "LdapAddConfiguration";
    type Entity = LdapConfiguration;
}

pub struct ListHypervisorCapabilitiesResponse;

impl ResponseSchema for ListHypervisorCapabilitiesResponse {
    const OPERATION: Operation = Operation::ListHypervisorCapabilities;
    const ENTITY_KEY: &'static str = "hypervisorCapabilities";
    type Entity = HypervisorCapability;
}

pub struct UpdateHypervisorCapabilitiesResponse;

impl ResponseSchema for UpdateHypervisorCapabilitiesResponse {
    const OPERATION: Operation = Operation::UpdateHypervisorCapabilities;
    const ENTITY_KEY: &'static str = NULL_ENTITY_KEY_QUIRK;
    type Entity = HypervisorCapability;
}

/// Return the envelope object of `operation`'s response.
pub fn envelope(operation: Operation, value: &Value) -> Result<&Map<String, Value>> {
    value
        .get(operation.envelope())
        .and_then(Value::as_object)
        .ok_or_else(|| ApiError::EnvelopeMismatch {
            operation: operation.name().to_string(),
            envelope: operation.envelope().to_string(),
            key: operation.envelope().to_string(),
        })
}

/// Decode a list response.
///
/// The server leaves the entity key out of empty pages, answering `{}` or `{"count": 0}`.
/// Those two shapes are an empty page; any other envelope without the entity key is a
/// mismatch.
pub fn decode_list<S: ResponseSchema>(value: Value) -> Result<ListPage<S::Entity>> {
    let operation = S::OPERATION;
    let env = envelope(operation, &value)?;
    let count = env
        .get("count")
        .and_then(Value::as_u64)
        .and_then(|c| u32::try_from(c).ok());

    let Some(items) = env.get(S::ENTITY_KEY) else {
        let empty_page = env.is_empty() || (env.len() == 1 && count == Some(0));
        if empty_page {
            return Ok(ListPage::empty());
        }
        return Err(mismatch::<S>());
    };

    let items: Vec<S::Entity> =
        serde_json::from_value(items.clone()).map_err(|e| ApiError::ParseError {
            operation: operation.name().to_string(),
            detail: e.to_string(),
        })?;

    Ok(ListPage { items, count })
}

/// Decode a single-entity response.
pub fn decode_single<S: ResponseSchema>(value: Value) -> Result<S::Entity> {
    let operation = S::OPERATION;
    let entity = envelope(operation, &value)?
        .get(S::ENTITY_KEY)
        .ok_or_else(mismatch::<S>)?;

    serde_json::from_value(entity.clone()).map_err(|e| ApiError::ParseError {
        operation: operation.name().to_string(),
        detail: e.to_string(),
    })
}

/// Check a response whose payload is not used beyond its presence.
pub fn expect_envelope(operation: Operation, value: &Value) -> Result<()> {
    envelope(operation, value).map(|_| ())
}

fn mismatch<S: ResponseSchema>() -> ApiError {
    ApiError::EnvelopeMismatch {
        operation: S::OPERATION.name().to_string(),
        envelope: S::ENVELOPE.to_string(),
        key: S::ENTITY_KEY.to_string(),
    }
}
