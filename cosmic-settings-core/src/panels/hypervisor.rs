//! Hypervisor capability limits

use async_trait::async_trait;

use cosmic_settings_api::{
    to_row, HypervisorCapabilityFilter, ManagementClient, PaginationParams, Row,
};

use super::{check_inputs, required_count, rows, ResourcePanel};
use crate::error::{CoreError, CoreResult};
use crate::i18n::keys;
use crate::types::{
    ActionName, ActionOutcome, ActionSpec, FieldSpec, FieldValues, HostSignal, InputField,
    InputKind, ListQuery, PanelDescriptor, ResourceType, RowPage,
};

const MAX_GUESTS_INPUT: InputField =
    InputField::required("maxguestslimit", keys::LABEL_MAX_GUESTS_LIMIT, InputKind::Count);

pub struct HypervisorCapabilitiesPanel {
    client: ManagementClient,
    descriptor: PanelDescriptor,
}

impl HypervisorCapabilitiesPanel {
    pub fn new(client: ManagementClient) -> Self {
        Self {
            client,
            descriptor: PanelDescriptor {
                resource: ResourceType::HypervisorCapability,
                id: ResourceType::HypervisorCapability.panel_id(),
                label: keys::LABEL_HYPERVISOR_CAPABILITIES,
                list_fields: vec![
                    FieldSpec::new("id", keys::LABEL_ID).identifier().hidden(),
                    FieldSpec::new("hypervisor", keys::LABEL_HYPERVISOR),
                    FieldSpec::new("hypervisorversion", keys::LABEL_HYPERVISOR_VERSION),
                    FieldSpec::new("maxguestslimit", keys::LABEL_MAX_GUESTS_LIMIT),
                ],
                detail_fields: vec![
                    FieldSpec::new("id", keys::LABEL_ID).identifier(),
                    FieldSpec::new("hypervisor", keys::LABEL_HYPERVISOR),
                    FieldSpec::new("hypervisorversion", keys::LABEL_HYPERVISOR_VERSION),
                    FieldSpec::new("maxguestslimit", keys::LABEL_MAX_GUESTS_LIMIT).editable(),
                ],
                actions: vec![ActionSpec {
                    name: ActionName::Edit,
                    label: keys::LABEL_EDIT,
                    confirmation: None,
                    inputs: vec![MAX_GUESTS_INPUT],
                }],
            },
        }
    }
}

#[async_trait]
impl ResourcePanel for HypervisorCapabilitiesPanel {
    fn descriptor(&self) -> &PanelDescriptor {
        &self.descriptor
    }

    async fn list(&self, query: &ListQuery, page_size: u32) -> CoreResult<RowPage> {
        let page = PaginationParams::new(query.page, page_size);
        let filter = HypervisorCapabilityFilter {
            id: None,
            keyword: query.search.clone(),
        };
        let capabilities = self
            .client
            .list_hypervisor_capabilities(&page, &filter)
            .await?;
        rows(capabilities)
    }

    async fn detail(&self, id: &str) -> CoreResult<Row> {
        let filter = HypervisorCapabilityFilter {
            id: Some(id.to_string()),
            keyword: None,
        };
        let page = self
            .client
            .list_hypervisor_capabilities(&PaginationParams::default(), &filter)
            .await?;
        let capability = page.items.first().ok_or_else(|| CoreError::RowNotFound {
            panel: self.descriptor.id.to_string(),
            id: id.to_string(),
        })?;
        Ok(to_row(capability)?)
    }

    async fn edit(&self, id: &str, values: &FieldValues) -> CoreResult<ActionOutcome> {
        check_inputs(values, &[MAX_GUESTS_INPUT])?;
        let limit = required_count(values, &MAX_GUESTS_INPUT)?;

        let updated = self
            .client
            .update_hypervisor_capabilities(id, limit)
            .await?;
        Ok(ActionOutcome::with_row(to_row(&updated)?)
            .signal(HostSignal::RefreshPanel(ResourceType::HypervisorCapability)))
    }
}
