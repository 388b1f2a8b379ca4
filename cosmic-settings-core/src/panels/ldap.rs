//! LDAP server configuration

use async_trait::async_trait;

use cosmic_settings_api::{to_row, ManagementClient, PaginationParams, Row, MAX_PAGE_SIZE};

use super::{check_inputs, required_port, required_text, rows, ResourcePanel};
use crate::error::{CoreError, CoreResult};
use crate::i18n::keys;
use crate::types::{
    ActionName, ActionOutcome, ActionSpec, FieldSpec, FieldValues, HostSignal, InputField,
    InputKind, ListQuery, PanelDescriptor, ResourceType, RowPage,
};

const HOSTNAME_INPUT: InputField =
    InputField::required("hostname", keys::LABEL_HOST_NAME, InputKind::Text);
const PORT_INPUT: InputField = InputField::required("port", keys::LABEL_PORT, InputKind::Port);

/// Configured LDAP servers, identified by host name.
pub struct LdapConfigurationPanel {
    client: ManagementClient,
    descriptor: PanelDescriptor,
}

impl LdapConfigurationPanel {
    pub fn new(client: ManagementClient) -> Self {
        Self {
            client,
            descriptor: PanelDescriptor {
                resource: ResourceType::LdapConfiguration,
                id: ResourceType::LdapConfiguration.panel_id(),
                label: keys::LABEL_LDAP_CONFIGURATION,
                list_fields: vec![
                    FieldSpec::new("hostname", keys::LABEL_HOST_NAME).identifier(),
                    FieldSpec::new("port", keys::LABEL_LDAP_PORT),
                ],
                detail_fields: vec![
                    FieldSpec::new("hostname", keys::LABEL_HOST_NAME).identifier(),
                    FieldSpec::new("port", keys::LABEL_PORT),
                ],
                actions: vec![
                    ActionSpec {
                        name: ActionName::Add,
                        label: keys::LABEL_CONFIGURE_LDAP,
                        confirmation: Some(keys::MESSAGE_CONFIGURE_LDAP),
                        inputs: vec![HOSTNAME_INPUT, PORT_INPUT],
                    },
                    ActionSpec {
                        name: ActionName::Remove,
                        label: keys::LABEL_REMOVE_LDAP,
                        confirmation: Some(keys::MESSAGE_REMOVE_LDAP),
                        inputs: Vec::new(),
                    },
                ],
            },
        }
    }
}

#[async_trait]
impl ResourcePanel for LdapConfigurationPanel {
    fn descriptor(&self) -> &PanelDescriptor {
        &self.descriptor
    }

    async fn list(&self, query: &ListQuery, page_size: u32) -> CoreResult<RowPage> {
        let page = PaginationParams::new(query.page, page_size);
        let servers = self
            .client
            .list_ldap_configurations(&page, query.search.as_deref())
            .await?;
        rows(servers)
    }

    async fn detail(&self, id: &str) -> CoreResult<Row> {
        let page = self
            .client
            .list_ldap_configurations(&PaginationParams::new(1, MAX_PAGE_SIZE), Some(id))
            .await?;
        // The hostname filter matches substrings; only the exact host is this row.
        let server = page
            .items
            .iter()
            .find(|s| s.hostname == id)
            .ok_or_else(|| CoreError::RowNotFound {
                panel: self.descriptor.id.to_string(),
                id: id.to_string(),
            })?;
        Ok(to_row(server)?)
    }

    async fn add(&self, values: &FieldValues) -> CoreResult<ActionOutcome> {
        check_inputs(values, &[HOSTNAME_INPUT, PORT_INPUT])?;
        let hostname = required_text(values, &HOSTNAME_INPUT)?;
        let port = required_port(values, &PORT_INPUT)?;

        let created = self.client.add_ldap_configuration(hostname, port).await?;
        Ok(ActionOutcome::with_row(to_row(&created)?)
            .signal(HostSignal::RefreshPanel(ResourceType::LdapConfiguration)))
    }

    /// Removing an LDAP server changes how accounts authenticate, so every panel of the
    /// section is refreshed.
    async fn remove(&self, id: &str) -> CoreResult<ActionOutcome> {
        self.client.delete_ldap_configuration(id).await?;
        Ok(ActionOutcome::default().signal(HostSignal::FullRefresh))
    }
}
