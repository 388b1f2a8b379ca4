//! Section registry
//!
//! Ordered set of panels a host renders as one tabbed page behind a type selector.

use std::sync::Arc;

use cosmic_settings_api::ManagementClient;

use crate::error::{CoreError, CoreResult};
use crate::i18n::keys;
use crate::panels::{
    GlobalSettingsPanel, HypervisorCapabilitiesPanel, LdapConfigurationPanel, ResourcePanel,
};
use crate::types::ResourceType;

/// Identifier of the standard global settings section.
pub const GLOBAL_SETTINGS_SECTION: &str = "global-settings";

/// Panels of one section, in selector order. Immutable once built.
pub struct SectionRegistry {
    id: &'static str,
    title: &'static str,
    selector_label: &'static str,
    panels: Vec<Arc<dyn ResourcePanel>>,
}

impl SectionRegistry {
    /// Build a registry, validating every descriptor.
    ///
    /// Fails with [`CoreError::InvalidDescriptor`] if a descriptor is malformed or two
    /// panels share a resource type.
    pub fn new(
        id: &'static str,
        title: &'static str,
        selector_label: &'static str,
        panels: Vec<Arc<dyn ResourcePanel>>,
    ) -> CoreResult<Self> {
        for (i, panel) in panels.iter().enumerate() {
            let descriptor = panel.descriptor();
            descriptor.validate()?;
            if panels[..i]
                .iter()
                .any(|p| p.descriptor().resource == descriptor.resource)
            {
                return Err(CoreError::InvalidDescriptor {
                    panel: descriptor.id.to_string(),
                    reason: "resource type registered twice".to_string(),
                });
            }
        }

        log::debug!("Section {id} registered with {} panels", panels.len());
        Ok(Self {
            id,
            title,
            selector_label,
            panels,
        })
    }

    /// The global settings section: global settings, LDAP configuration and hypervisor
    /// capabilities.
    pub fn standard(client: &ManagementClient) -> CoreResult<Self> {
        let panels: Vec<Arc<dyn ResourcePanel>> = vec![
            Arc::new(GlobalSettingsPanel::new(client.clone())),
            Arc::new(LdapConfigurationPanel::new(client.clone())),
            Arc::new(HypervisorCapabilitiesPanel::new(client.clone())),
        ];
        Self::new(
            GLOBAL_SETTINGS_SECTION,
            keys::LABEL_GLOBAL_SETTINGS,
            keys::LABEL_SELECT_VIEW,
            panels,
        )
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn selector_label(&self) -> &'static str {
        self.selector_label
    }

    /// Panels in selector order.
    pub fn panels(&self) -> impl Iterator<Item = &Arc<dyn ResourcePanel>> {
        self.panels.iter()
    }

    /// Panel for a resource type.
    pub fn get(&self, resource: ResourceType) -> CoreResult<&Arc<dyn ResourcePanel>> {
        self.panels
            .iter()
            .find(|p| p.descriptor().resource == resource)
            .ok_or_else(|| CoreError::UnknownPanel(resource.panel_id().to_string()))
    }

    /// Panel by its identifier, e.g. `ldapConfiguration`.
    pub fn find(&self, panel_id: &str) -> CoreResult<&Arc<dyn ResourcePanel>> {
        self.panels
            .iter()
            .find(|p| p.descriptor().id == panel_id)
            .ok_or_else(|| CoreError::UnknownPanel(panel_id.to_string()))
    }
}
