//! Typed operations over a [`RemoteInvoker`].

use std::sync::Arc;

use crate::error::Result;
use crate::operation::Operation;
use crate::params::RequestParams;
use crate::responses::{
    AddLdapConfigurationResponse, ListConfigurationsResponse, ListHypervisorCapabilitiesResponse,
    ListLdapConfigurationsResponse, UpdateConfigurationResponse,
    UpdateHypervisorCapabilitiesResponse, decode_list, decode_single, expect_envelope,
};
use crate::traits::RemoteInvoker;
use crate::types::{
    Configuration, HypervisorCapability, HypervisorCapabilityFilter, LdapConfiguration, ListPage,
    PaginationParams,
};

/// Typed management API client.
///
/// Each method builds one [`RequestParams`], performs exactly one remote call and decodes
/// the response through the operation's schema.
#[derive(Clone)]
pub struct ManagementClient {
    invoker: Arc<dyn RemoteInvoker>,
}

fn paged(page: &PaginationParams) -> RequestParams {
    RequestParams::new()
        .with("page", page.page)
        .with("pagesize", page.page_size)
}

impl ManagementClient {
    pub fn new(invoker: Arc<dyn RemoteInvoker>) -> Self {
        Self { invoker }
    }

    // ===== Global settings =====

    /// One page of global settings, optionally filtered by name.
    pub async fn list_configurations(
        &self,
        page: &PaginationParams,
        name: Option<&str>,
    ) -> Result<ListPage<Configuration>> {
        let params = paged(page).with_opt("name", name);
        let value = self
            .invoker
            .invoke(Operation::ListConfigurations, &params)
            .await?;
        decode_list::<ListConfigurationsResponse>(value)
    }

    /// Change the value of one setting. Returns the setting as stored by the server.
    pub async fn update_configuration(&self, name: &str, value: &str) -> Result<Configuration> {
        let params = RequestParams::new()
            .with("name", name)
            .with("value", value);
        let value = self
            .invoker
            .invoke(Operation::UpdateConfiguration, &params)
            .await?;
        decode_single::<UpdateConfigurationResponse>(value)
    }

    // ===== LDAP =====

    /// One page of LDAP servers, optionally filtered by host name.
    pub async fn list_ldap_configurations(
        &self,
        page: &PaginationParams,
        hostname: Option<&str>,
    ) -> Result<ListPage<LdapConfiguration>> {
        let params = paged(page).with_opt("hostname", hostname);
        let value = self
            .invoker
            .invoke(Operation::ListLdapConfigurations, &params)
            .await?;
        decode_list::<ListLdapConfigurationsResponse>(value)
    }

    /// Register an LDAP server.
    pub async fn add_ldap_configuration(
        &self,
        hostname: &str,
        port: u16,
    ) -> Result<LdapConfiguration> {
        let params = RequestParams::new()
            .with("hostname", hostname)
            .with("port", port);
        let value = self
            .invoker
            .invoke(Operation::AddLdapConfiguration, &params)
            .await?;
        decode_single::<AddLdapConfigurationResponse>(value)
    }

    /// Remove an LDAP server.
    pub async fn delete_ldap_configuration(&self, hostname: &str) -> Result<()> {
        let operation = Operation::DeleteLdapConfiguration;
        let params = RequestParams::new().with("hostname", hostname);
        let value = self.invoker.invoke(operation, &params).await?;
        expect_envelope(operation, &value)
    }

    // ===== Hypervisor capabilities =====

    /// One page of hypervisor capability entries.
    pub async fn list_hypervisor_capabilities(
        &self,
        page: &PaginationParams,
        filter: &HypervisorCapabilityFilter,
    ) -> Result<ListPage<HypervisorCapability>> {
        let params = paged(page)
            .with_opt("id", filter.id.as_deref())
            .with_opt("keyword", filter.keyword.as_deref());
        let value = self
            .invoker
            .invoke(Operation::ListHypervisorCapabilities, &params)
            .await?;
        decode_list::<ListHypervisorCapabilitiesResponse>(value)
    }

    /// Change the guest limit of one capability entry.
    pub async fn update_hypervisor_capabilities(
        &self,
        id: &str,
        max_guests_limit: i64,
    ) -> Result<HypervisorCapability> {
        let params = RequestParams::new()
            .with("id", id)
            .with("maxguestslimit", max_guests_limit);
        let value = self
            .invoker
            .invoke(Operation::UpdateHypervisorCapabilities, &params)
            .await?;
        decode_single::<UpdateHypervisorCapabilitiesResponse>(value)
    }
}
