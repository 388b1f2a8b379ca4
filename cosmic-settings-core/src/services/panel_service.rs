//! Panel list/detail/action dispatch

use std::sync::Arc;

use cosmic_settings_api::{PaginationParams, MAX_PAGE_SIZE};

use crate::error::{CoreError, CoreResult, ValidationReason};
use crate::panels::{check_inputs, ResourcePanel};
use crate::services::{Sequenced, ServiceContext};
use crate::traits::{ConfirmationRequest, Confirmer};
use crate::types::{
    ActionName, ActionOutcome, FieldValues, ListQuery, NavigationContext, Row, RowPage,
};

/// Drives every panel of the section.
///
/// Before an action reaches its panel this service checks the declared inputs and asks
/// for confirmation when the action carries a prompt. A failed check or a declined
/// prompt issues no remote call.
pub struct PanelService {
    ctx: Arc<ServiceContext>,
}

impl PanelService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &Arc<ServiceContext> {
        &self.ctx
    }

    /// One page of rows of the selected panel.
    pub async fn list(
        &self,
        nav: &NavigationContext,
        query: &ListQuery,
    ) -> CoreResult<Sequenced<RowPage>> {
        let panel = self.ctx.selected_panel(nav)?;
        let seq = self.ctx.next_seq();
        let paging =
            PaginationParams::new(query.page, self.ctx.page_size()).validated(MAX_PAGE_SIZE);
        let query = ListQuery {
            page: paging.page,
            search: query.search.clone(),
        };
        let panel_id = panel.descriptor().id;

        log::debug!(
            "[{panel_id}] list #{seq} page={} search={:?}",
            query.page,
            query.search
        );
        let page = panel
            .list(&query, paging.page_size)
            .await
            .inspect_err(|e| log_error(panel_id, "list", e))?;

        Ok(Sequenced { seq, value: page })
    }

    /// One row of the selected panel, fetched fresh.
    pub async fn detail(&self, nav: &NavigationContext, id: &str) -> CoreResult<Sequenced<Row>> {
        let panel = self.ctx.selected_panel(nav)?;
        let descriptor = panel.descriptor();
        if !descriptor.has_detail() {
            return Err(panel.unsupported("detail"));
        }
        let id = target_id(&**panel, Some(id))?;
        let seq = self.ctx.next_seq();

        log::debug!("[{}] detail #{seq} id={id}", descriptor.id);
        let row = panel
            .detail(id)
            .await
            .inspect_err(|e| log_error(descriptor.id, "detail", e))?;

        Ok(Sequenced { seq, value: row })
    }

    pub async fn edit(
        &self,
        nav: &NavigationContext,
        id: &str,
        values: &FieldValues,
        confirmer: &dyn Confirmer,
    ) -> CoreResult<ActionOutcome> {
        self.dispatch(nav, ActionName::Edit, Some(id), values, confirmer)
            .await
    }

    pub async fn add(
        &self,
        nav: &NavigationContext,
        values: &FieldValues,
        confirmer: &dyn Confirmer,
    ) -> CoreResult<ActionOutcome> {
        self.dispatch(nav, ActionName::Add, None, values, confirmer)
            .await
    }

    pub async fn remove(
        &self,
        nav: &NavigationContext,
        id: &str,
        confirmer: &dyn Confirmer,
    ) -> CoreResult<ActionOutcome> {
        self.dispatch(
            nav,
            ActionName::Remove,
            Some(id),
            &FieldValues::new(),
            confirmer,
        )
        .await
    }

    async fn dispatch(
        &self,
        nav: &NavigationContext,
        action: ActionName,
        target: Option<&str>,
        values: &FieldValues,
        confirmer: &dyn Confirmer,
    ) -> CoreResult<ActionOutcome> {
        let panel = self.ctx.selected_panel(nav)?;
        let descriptor = panel.descriptor();
        let spec = descriptor
            .action(action)
            .ok_or_else(|| panel.unsupported(action.as_str()))?;

        let target = if action.needs_target() {
            Some(target_id(&**panel, target)?)
        } else {
            None
        };
        check_inputs(values, &spec.inputs)
            .inspect_err(|e| log_error(descriptor.id, action.as_str(), e))?;

        if let Some(prompt) = spec.confirmation {
            let request = ConfirmationRequest {
                panel: descriptor,
                action: spec,
                prompt,
                target,
            };
            if !confirmer.confirm(&request).await {
                log::info!("[{}] {action} cancelled by user", descriptor.id);
                return Ok(ActionOutcome::cancelled());
            }
        }

        let result = match (action, target) {
            (ActionName::Edit, Some(id)) => panel.edit(id, values).await,
            (ActionName::Remove, Some(id)) => panel.remove(id).await,
            (ActionName::Add, _) => panel.add(values).await,
            (_, None) => Err(panel.unsupported(action.as_str())),
        };

        match &result {
            Ok(outcome) => log::info!(
                "[{}] {action}{} succeeded ({} notices, {} signals)",
                descriptor.id,
                target.map(|t| format!(" {t}")).unwrap_or_default(),
                outcome.notices.len(),
                outcome.signals.len()
            ),
            Err(e) => log_error(descriptor.id, action.as_str(), e),
        }
        result
    }
}

/// Non-blank row identifier, or a validation error naming the identifier field.
fn target_id<'a>(panel: &dyn ResourcePanel, target: Option<&'a str>) -> CoreResult<&'a str> {
    match target.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id),
        _ => {
            let descriptor = panel.descriptor();
            let (key, label) = descriptor
                .identifier_field()
                .map_or(("id", "label.id"), |f| (f.key, f.label));
            Err(CoreError::validation(key, label, ValidationReason::Required))
        }
    }
}

fn log_error(panel: &str, operation: &str, e: &CoreError) {
    if e.is_expected() {
        log::warn!("[{panel}] {operation} failed: {e}");
    } else {
        log::error!("[{panel}] {operation} failed: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        create_test_panel_service, field_values, ldap_server, setting, ScriptedConfirmer,
    };
    use crate::types::{HostSignal, Notice, ResourceType};
    use cosmic_settings_api::{ApiError, Operation};
    use serde_json::json;

    fn nav(resource: ResourceType) -> NavigationContext {
        NavigationContext::new("global-settings").select(resource)
    }

    // ===== Navigation =====

    #[tokio::test]
    async fn list_without_selection_is_rejected() {
        let (svc, fake) = create_test_panel_service();
        let res = svc
            .list(&NavigationContext::new("global-settings"), &ListQuery::page(1))
            .await;
        assert!(matches!(res, Err(CoreError::MissingSelection(_))));
        assert_eq!(fake.call_count().await, 0);
    }

    #[tokio::test]
    async fn list_in_unknown_section_is_rejected() {
        let (svc, _) = create_test_panel_service();
        let nav = NavigationContext::new("zones").select(ResourceType::GlobalSetting);
        let res = svc.list(&nav, &ListQuery::page(1)).await;
        assert!(matches!(res, Err(CoreError::UnknownPanel(s)) if s == "zones"));
    }

    // ===== List =====

    #[tokio::test]
    async fn ldap_search_passes_hostname_and_returns_match() {
        let (svc, fake) = create_test_panel_service();
        for host in ["10.0.0.1", "10.0.0.2", "ldap.example.com"] {
            fake.insert_ldap(ldap_server(host, 389)).await;
        }

        let page = svc
            .list(
                &nav(ResourceType::LdapConfiguration),
                &ListQuery::page(1).search("10.0.0.1"),
            )
            .await
            .unwrap()
            .value;

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0]["hostname"], json!("10.0.0.1"));

        let (op, params) = fake.last_call().await.unwrap();
        assert_eq!(op, Operation::ListLdapConfigurations);
        assert_eq!(params.get_str("hostname").as_deref(), Some("10.0.0.1"));
        assert_eq!(params.get_str("page").as_deref(), Some("1"));
        assert_eq!(params.get_str("pagesize").as_deref(), Some("20"));
    }

    #[tokio::test]
    async fn list_requests_one_page_of_shared_size() {
        let (svc, fake) = create_test_panel_service();
        for i in 0..25 {
            fake.insert_setting(setting(&format!("setting.{i:02}"), "Advanced", "1"))
                .await;
        }

        let nav = nav(ResourceType::GlobalSetting);
        let first = svc.list(&nav, &ListQuery::page(1)).await.unwrap();
        let second = svc.list(&nav, &ListQuery::page(2)).await.unwrap();

        assert_eq!(first.value.items.len(), 20);
        assert_eq!(second.value.items.len(), 5);
        assert_eq!(first.value.count, Some(25));
        assert!(second.seq > first.seq);
    }

    #[tokio::test]
    async fn page_zero_requests_first_page() {
        let (svc, fake) = create_test_panel_service();
        svc.list(&nav(ResourceType::GlobalSetting), &ListQuery::page(0))
            .await
            .unwrap();

        let (_, params) = fake.last_call().await.unwrap();
        assert_eq!(params.get_str("page").as_deref(), Some("1"));
    }

    #[test]
    fn context_page_size_is_clamped() {
        let (svc, _) = create_test_panel_service();
        let registry = Arc::clone(&svc.context().registry);
        assert_eq!(ServiceContext::new(Arc::clone(&registry), 0).page_size(), 1);
        assert_eq!(
            ServiceContext::new(registry, 10_000).page_size(),
            MAX_PAGE_SIZE
        );
    }

    #[tokio::test]
    async fn hypervisor_search_uses_keyword() {
        let (svc, fake) = create_test_panel_service();
        svc.list(
            &nav(ResourceType::HypervisorCapability),
            &ListQuery::page(1).search("KVM"),
        )
        .await
        .unwrap();

        let (_, params) = fake.last_call().await.unwrap();
        assert_eq!(params.get_str("keyword").as_deref(), Some("KVM"));
        assert!(params.get("hostname").is_none());
    }

    #[tokio::test]
    async fn list_missing_envelope_is_mismatch_not_empty() {
        let (svc, fake) = create_test_panel_service();
        fake.set_raw_response(
            Operation::ListConfigurations,
            json!({"listconfigurationresponse": {"configuration": []}}),
        )
        .await;

        let res = svc
            .list(&nav(ResourceType::GlobalSetting), &ListQuery::page(1))
            .await;
        assert!(
            matches!(
                &res,
                Err(CoreError::EnvelopeMismatch { envelope, .. })
                    if envelope == "listconfigurationsresponse"
            ),
            "unexpected result: {res:?}"
        );
    }

    #[tokio::test]
    async fn remote_failure_is_remote_error() {
        let (svc, fake) = create_test_panel_service();
        fake.set_failure(
            Operation::ListLdapConfigurations,
            ApiError::NetworkError {
                operation: "listLdapConfigurations".to_string(),
                detail: "connection refused".to_string(),
            },
        )
        .await;

        let res = svc
            .list(&nav(ResourceType::LdapConfiguration), &ListQuery::page(1))
            .await;
        assert!(matches!(res, Err(CoreError::Remote(ApiError::NetworkError { .. }))));
    }

    // ===== Detail =====

    #[tokio::test]
    async fn global_settings_have_no_detail() {
        let (svc, fake) = create_test_panel_service();
        let res = svc
            .detail(&nav(ResourceType::GlobalSetting), "expunge.delay")
            .await;
        assert!(matches!(res, Err(CoreError::UnsupportedAction { .. })));
        assert_eq!(fake.call_count().await, 0);
    }

    #[tokio::test]
    async fn hypervisor_detail_fetches_by_id() {
        let (svc, fake) = create_test_panel_service();
        let id = fake.hypervisor_ids().await[0].clone();

        let row = svc
            .detail(&nav(ResourceType::HypervisorCapability), &id)
            .await
            .unwrap()
            .value;
        assert_eq!(row["id"], json!(id));

        let (op, params) = fake.last_call().await.unwrap();
        assert_eq!(op, Operation::ListHypervisorCapabilities);
        assert_eq!(params.get_str("id").as_deref(), Some(id.as_str()));
    }

    #[tokio::test]
    async fn detail_of_missing_row_is_not_found() {
        let (svc, _) = create_test_panel_service();
        let res = svc
            .detail(&nav(ResourceType::LdapConfiguration), "nowhere.example.com")
            .await;
        assert!(matches!(res, Err(CoreError::RowNotFound { .. })));
    }

    #[tokio::test]
    async fn ldap_detail_needs_exact_hostname() {
        let (svc, fake) = create_test_panel_service();
        fake.insert_ldap(ldap_server("10.0.0.10", 389)).await;

        let res = svc
            .detail(&nav(ResourceType::LdapConfiguration), "10.0.0.1")
            .await;
        assert!(matches!(res, Err(CoreError::RowNotFound { id, .. }) if id == "10.0.0.1"));

        let row = svc
            .detail(&nav(ResourceType::LdapConfiguration), "10.0.0.10")
            .await
            .unwrap()
            .value;
        assert_eq!(row["hostname"], json!("10.0.0.10"));
    }

    // ===== Edit =====

    #[tokio::test]
    async fn usage_setting_edit_yields_usage_notice() {
        let (svc, fake) = create_test_panel_service();
        fake.insert_setting(setting("usage.stats.job.aggregation.range", "Usage", "1440"))
            .await;

        let outcome = svc
            .edit(
                &nav(ResourceType::GlobalSetting),
                "usage.stats.job.aggregation.range",
                &field_values(&[("value", "720")]),
                &ScriptedConfirmer::accept(),
            )
            .await
            .unwrap();

        assert_eq!(
            outcome.notices,
            vec![Notice::info("message.restart.mgmt.usage.server")]
        );
        assert_eq!(outcome.row.unwrap()["value"], json!("720"));
    }

    #[tokio::test]
    async fn other_setting_edit_yields_mgmt_notice() {
        let (svc, fake) = create_test_panel_service();
        fake.insert_setting(setting("expunge.delay", "Advanced", "86400"))
            .await;

        let outcome = svc
            .edit(
                &nav(ResourceType::GlobalSetting),
                "expunge.delay",
                &field_values(&[("value", "3600")]),
                &ScriptedConfirmer::accept(),
            )
            .await
            .unwrap();

        assert_eq!(
            outcome.notices,
            vec![Notice::info("message.restart.mgmt.server")]
        );
        assert_eq!(
            outcome.signals,
            vec![HostSignal::RefreshPanel(ResourceType::GlobalSetting)]
        );
    }

    #[tokio::test]
    async fn setting_edit_sends_name_and_value() {
        let (svc, fake) = create_test_panel_service();
        fake.insert_setting(setting("vm.name", "Advanced", "")).await;

        svc.edit(
            &nav(ResourceType::GlobalSetting),
            "vm.name",
            &field_values(&[("value", "a b&c")]),
            &ScriptedConfirmer::accept(),
        )
        .await
        .unwrap();

        let (op, params) = fake.last_call().await.unwrap();
        assert_eq!(op, Operation::UpdateConfiguration);
        assert_eq!(params.get_str("name").as_deref(), Some("vm.name"));
        assert_eq!(params.get_str("value").as_deref(), Some("a b&c"));
        assert!(params.to_query_string().contains("value=a%20b%26c"));
    }

    #[tokio::test]
    async fn setting_edit_without_value_sends_nothing() {
        let (svc, fake) = create_test_panel_service();
        fake.insert_setting(setting("expunge.delay", "Advanced", "86400"))
            .await;

        let res = svc
            .edit(
                &nav(ResourceType::GlobalSetting),
                "expunge.delay",
                &FieldValues::new(),
                &ScriptedConfirmer::accept(),
            )
            .await;

        assert!(matches!(
            res,
            Err(CoreError::Validation { ref field, reason: ValidationReason::Required, .. })
                if field == "value"
        ));
        assert_eq!(fake.call_count().await, 0);
    }

    #[tokio::test]
    async fn setting_edit_with_blank_value_clears_it() {
        let (svc, fake) = create_test_panel_service();
        fake.insert_setting(setting("vm.name", "Advanced", "old")).await;

        svc.edit(
            &nav(ResourceType::GlobalSetting),
            "vm.name",
            &field_values(&[("value", "")]),
            &ScriptedConfirmer::accept(),
        )
        .await
        .unwrap();

        let (op, params) = fake.last_call().await.unwrap();
        assert_eq!(op, Operation::UpdateConfiguration);
        assert_eq!(params.get_str("value").as_deref(), Some(""));
    }

    #[tokio::test]
    async fn hypervisor_edit_unwraps_null_key() {
        let (svc, fake) = create_test_panel_service();
        let id = fake.hypervisor_ids().await[0].clone();

        let outcome = svc
            .edit(
                &nav(ResourceType::HypervisorCapability),
                &id,
                &field_values(&[("maxguestslimit", "75")]),
                &ScriptedConfirmer::accept(),
            )
            .await
            .unwrap();

        assert_eq!(outcome.row.unwrap()["maxguestslimit"], json!(75));
        let (op, params) = fake.last_call().await.unwrap();
        assert_eq!(op, Operation::UpdateHypervisorCapabilities);
        assert_eq!(params.get_str("maxguestslimit").as_deref(), Some("75"));
    }

    #[tokio::test]
    async fn hypervisor_edit_rejects_non_numeric_limit() {
        let (svc, fake) = create_test_panel_service();
        let id = fake.hypervisor_ids().await[0].clone();

        let res = svc
            .edit(
                &nav(ResourceType::HypervisorCapability),
                &id,
                &field_values(&[("maxguestslimit", "lots")]),
                &ScriptedConfirmer::accept(),
            )
            .await;
        assert!(matches!(
            res,
            Err(CoreError::Validation {
                reason: ValidationReason::InvalidInteger,
                ..
            })
        ));
        assert_eq!(fake.call_count().await, 0);
    }

    #[tokio::test]
    async fn edit_on_panel_without_edit_is_unsupported() {
        let (svc, _) = create_test_panel_service();
        let res = svc
            .edit(
                &nav(ResourceType::LdapConfiguration),
                "10.0.0.1",
                &FieldValues::new(),
                &ScriptedConfirmer::accept(),
            )
            .await;
        assert!(matches!(
            res,
            Err(CoreError::UnsupportedAction { action, .. }) if action == "edit"
        ));
    }

    // ===== Add =====

    #[tokio::test]
    async fn ldap_add_then_list_shows_new_host() {
        let (svc, fake) = create_test_panel_service();
        let confirmer = ScriptedConfirmer::accept();

        let outcome = svc
            .add(
                &nav(ResourceType::LdapConfiguration),
                &field_values(&[("hostname", "ldap.example.com"), ("port", "389")]),
                &confirmer,
            )
            .await
            .unwrap();
        assert!(!outcome.cancelled);
        assert_eq!(outcome.row.unwrap()["port"], json!(389));
        assert_eq!(confirmer.prompts().await, vec!["message.configure.ldap"]);

        let page = svc
            .list(&nav(ResourceType::LdapConfiguration), &ListQuery::page(1))
            .await
            .unwrap()
            .value;
        assert!(page
            .items
            .iter()
            .any(|row| row["hostname"] == json!("ldap.example.com")));
        assert_eq!(fake.ldap_hostnames().await, vec!["ldap.example.com"]);
    }

    #[tokio::test]
    async fn ldap_add_without_hostname_or_port_sends_nothing() {
        let (svc, fake) = create_test_panel_service();
        let confirmer = ScriptedConfirmer::accept();

        for values in [
            field_values(&[("port", "389")]),
            field_values(&[("hostname", "ldap.example.com")]),
            field_values(&[("hostname", " "), ("port", "389")]),
        ] {
            let res = svc
                .add(&nav(ResourceType::LdapConfiguration), &values, &confirmer)
                .await;
            assert!(
                matches!(
                    res,
                    Err(CoreError::Validation {
                        reason: ValidationReason::Required,
                        ..
                    })
                ),
                "accepted {values:?}"
            );
        }

        assert_eq!(fake.call_count().await, 0);
        assert!(confirmer.prompts().await.is_empty(), "prompted before validation");
    }

    #[tokio::test]
    async fn ldap_add_with_bad_port_is_rejected() {
        let (svc, fake) = create_test_panel_service();
        let res = svc
            .add(
                &nav(ResourceType::LdapConfiguration),
                &field_values(&[("hostname", "ldap.example.com"), ("port", "70000")]),
                &ScriptedConfirmer::accept(),
            )
            .await;
        assert!(
            matches!(
                &res,
                Err(CoreError::Validation { field, reason: ValidationReason::InvalidPort, .. })
                    if field == "port"
            ),
            "unexpected result: {res:?}"
        );
        assert_eq!(fake.call_count().await, 0);
    }

    #[tokio::test]
    async fn declined_add_sends_nothing() {
        let (svc, fake) = create_test_panel_service();
        let outcome = svc
            .add(
                &nav(ResourceType::LdapConfiguration),
                &field_values(&[("hostname", "ldap.example.com"), ("port", "389")]),
                &ScriptedConfirmer::decline(),
            )
            .await
            .unwrap();
        assert_eq!(outcome, ActionOutcome::cancelled());
        assert_eq!(fake.call_count().await, 0);
    }

    // ===== Remove =====

    #[tokio::test]
    async fn remove_confirms_then_signals_full_refresh() {
        let (svc, fake) = create_test_panel_service();
        fake.insert_ldap(ldap_server("10.0.0.1", 389)).await;
        let confirmer = ScriptedConfirmer::accept();

        let outcome = svc
            .remove(&nav(ResourceType::LdapConfiguration), "10.0.0.1", &confirmer)
            .await
            .unwrap();

        assert_eq!(confirmer.prompts().await, vec!["message.remove.ldap"]);
        assert_eq!(confirmer.targets().await, vec![Some("10.0.0.1".to_string())]);
        assert_eq!(outcome.signals, vec![HostSignal::FullRefresh]);
        assert!(fake.ldap_hostnames().await.is_empty());

        let (op, params) = fake.last_call().await.unwrap();
        assert_eq!(op, Operation::DeleteLdapConfiguration);
        assert_eq!(params.get_str("hostname").as_deref(), Some("10.0.0.1"));
    }

    #[tokio::test]
    async fn declined_remove_sends_nothing() {
        let (svc, fake) = create_test_panel_service();
        fake.insert_ldap(ldap_server("10.0.0.1", 389)).await;
        let confirmer = ScriptedConfirmer::decline();

        let outcome = svc
            .remove(&nav(ResourceType::LdapConfiguration), "10.0.0.1", &confirmer)
            .await
            .unwrap();

        assert!(outcome.cancelled);
        assert_eq!(confirmer.prompts().await.len(), 1);
        assert_eq!(fake.call_count().await, 0);
        assert_eq!(fake.ldap_hostnames().await, vec!["10.0.0.1"]);
    }

    #[tokio::test]
    async fn remove_with_blank_id_is_validation_error() {
        let (svc, fake) = create_test_panel_service();
        let res = svc
            .remove(
                &nav(ResourceType::LdapConfiguration),
                "  ",
                &ScriptedConfirmer::accept(),
            )
            .await;
        assert!(
            matches!(&res, Err(CoreError::Validation { field, .. }) if field == "hostname"),
            "unexpected result: {res:?}"
        );
        assert_eq!(fake.call_count().await, 0);
    }
}
