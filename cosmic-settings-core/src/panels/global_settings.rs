//! Global configuration settings

use async_trait::async_trait;

use cosmic_settings_api::{to_row, ManagementClient, PaginationParams};

use super::{check_inputs, rows, ResourcePanel};
use crate::error::{CoreError, CoreResult, ValidationReason};
use crate::i18n::keys;
use crate::types::{
    ActionName, ActionOutcome, ActionSpec, FieldSpec, FieldValues, HostSignal, InputField,
    InputKind, ListQuery, Notice, PanelDescriptor, ResourceType, RowPage,
};

const VALUE_INPUT: InputField = InputField::optional("value", keys::LABEL_VALUE, InputKind::Text);

/// Key-value settings, edited inline on the list row.
pub struct GlobalSettingsPanel {
    client: ManagementClient,
    descriptor: PanelDescriptor,
}

impl GlobalSettingsPanel {
    pub fn new(client: ManagementClient) -> Self {
        Self {
            client,
            descriptor: PanelDescriptor {
                resource: ResourceType::GlobalSetting,
                id: ResourceType::GlobalSetting.panel_id(),
                label: keys::LABEL_GLOBAL_SETTINGS,
                list_fields: vec![
                    FieldSpec::new("name", keys::LABEL_NAME)
                        .identifier()
                        .truncate(),
                    FieldSpec::new("description", keys::LABEL_DESCRIPTION),
                    FieldSpec::new("value", keys::LABEL_VALUE)
                        .editable()
                        .truncate(),
                ],
                detail_fields: Vec::new(),
                actions: vec![ActionSpec {
                    name: ActionName::Edit,
                    label: keys::LABEL_CHANGE_VALUE,
                    confirmation: None,
                    inputs: vec![VALUE_INPUT],
                }],
            },
        }
    }
}

#[async_trait]
impl ResourcePanel for GlobalSettingsPanel {
    fn descriptor(&self) -> &PanelDescriptor {
        &self.descriptor
    }

    async fn list(&self, query: &ListQuery, page_size: u32) -> CoreResult<RowPage> {
        let page = PaginationParams::new(query.page, page_size);
        let settings = self
            .client
            .list_configurations(&page, query.search.as_deref())
            .await?;
        rows(settings)
    }

    /// Change a setting's value. The notice tells the user which server needs a restart
    /// for the change to take effect.
    async fn edit(&self, id: &str, values: &FieldValues) -> CoreResult<ActionOutcome> {
        check_inputs(values, &[VALUE_INPUT])?;
        // An explicit blank value clears the setting; a missing one is a mistake.
        let value = values.get(VALUE_INPUT.key).ok_or_else(|| {
            CoreError::validation(VALUE_INPUT.key, VALUE_INPUT.label, ValidationReason::Required)
        })?;

        let updated = self.client.update_configuration(id, value).await?;
        let notice = if updated.is_usage() {
            keys::MESSAGE_RESTART_USAGE_SERVER
        } else {
            keys::MESSAGE_RESTART_MGMT_SERVER
        };

        Ok(ActionOutcome::with_row(to_row(&updated)?)
            .notice(Notice::info(notice))
            .signal(HostSignal::RefreshPanel(ResourceType::GlobalSetting)))
    }
}
