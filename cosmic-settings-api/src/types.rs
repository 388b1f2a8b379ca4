use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

// ============ Pagination ============

/// Page size used by every settings panel unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound accepted for a configured page size.
pub const MAX_PAGE_SIZE: u32 = 500;

/// Pagination parameters for list operations.
///
/// Pages are 1-indexed.
///
/// # Default
///
/// The default is `page = 1, page_size = 20`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// Page number (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub page_size: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationParams {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// Clamp pagination values to valid ranges.
    ///
    /// - `page` is clamped to `>= 1`
    /// - `page_size` is clamped to `1..=max_page_size`
    #[must_use]
    pub fn validated(&self, max_page_size: u32) -> Self {
        Self {
            page: self.page.max(1),
            page_size: self.page_size.clamp(1, max_page_size),
        }
    }
}

/// One page of a list operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage<T> {
    /// Items in the current page.
    pub items: Vec<T>,
    /// Total number of matching items reported by the server, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl<T> ListPage<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            count: Some(0),
        }
    }
}

// ============ Rows ============

/// A display row: field key → value, exactly as the server shaped it.
pub type Row = BTreeMap<String, serde_json::Value>;

/// Convert a typed entity into a display [`Row`].
///
/// Keys are the entity's wire field names, so they line up with panel field keys.
pub fn to_row<T: Serialize>(entity: &T) -> Result<Row> {
    match serde_json::to_value(entity) {
        Ok(serde_json::Value::Object(map)) => Ok(map.into_iter().collect()),
        Ok(other) => Err(ApiError::SerializationError {
            operation: "row".to_string(),
            detail: format!("expected an object, got {other}"),
        }),
        Err(e) => Err(ApiError::SerializationError {
            operation: "row".to_string(),
            detail: e.to_string(),
        }),
    }
}

// ============ Global settings ============

/// Category whose settings are read by the usage server rather than the management server.
pub const USAGE_CATEGORY: &str = "Usage";

/// One global configuration key-value setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Setting name; the row identifier.
    pub name: String,
    /// Grouping such as `Advanced`, `Usage`, `Network`.
    #[serde(default)]
    pub category: String,
    /// Current value. Absent for unset settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Scope for scoped settings (`zone`, `cluster`, `account`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Whether a change applies without a restart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isdynamic: Option<bool>,
}

impl Configuration {
    /// Whether this setting belongs to the usage server.
    pub fn is_usage(&self) -> bool {
        self.category == USAGE_CATEGORY
    }
}

// ============ LDAP ============

/// A configured LDAP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LdapConfiguration {
    /// Server host name or address; the row identifier.
    pub hostname: String,
    /// TCP port.
    #[serde(with = "crate::utils::number")]
    pub port: u16,
}

// ============ Hypervisor capabilities ============

/// Capability limits of one hypervisor type/version pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HypervisorCapability {
    /// Entry UUID; the row identifier.
    pub id: String,
    /// Hypervisor type, e.g. `KVM`, `XenServer`.
    pub hypervisor: String,
    #[serde(
        rename = "hypervisorversion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub hypervisor_version: Option<String>,
    /// Maximum number of guest VMs per host.
    #[serde(
        rename = "maxguestslimit",
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::number::option"
    )]
    pub max_guests_limit: Option<i64>,
    #[serde(
        rename = "maxdatavolumeslimit",
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::number::option"
    )]
    pub max_data_volumes_limit: Option<i64>,
    #[serde(
        rename = "maxhostspercluster",
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::number::option"
    )]
    pub max_hosts_per_cluster: Option<i64>,
    #[serde(
        rename = "securitygroupenabled",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub security_group_enabled: Option<bool>,
    #[serde(
        rename = "storagemotionenabled",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub storage_motion_enabled: Option<bool>,
}

/// Filter for hypervisor capability listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HypervisorCapabilityFilter {
    /// Restrict to one entry.
    pub id: Option<String>,
    /// Free-text keyword matched by the server.
    pub keyword: Option<String>,
}
