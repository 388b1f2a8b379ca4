//! Subcommands and their execution against the panel service

use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use clap::Subcommand;
use cosmic_settings_core::types::{
    ActionOutcome, FieldValues, ListQuery, NavigationContext, PanelDescriptor, ResourceType,
};
use cosmic_settings_core::{
    AutoConfirm, Confirmer, LatestResponse, Localizer, PanelService, GLOBAL_SETTINGS_SECTION,
};

use crate::confirm::TerminalConfirmer;
use crate::render;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the panels of the global settings section
    Sections,

    /// List one page of a panel
    List {
        /// Panel id or alias (global, ldap, hypervisor)
        panel: String,
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
        /// Server-side search term
        #[arg(long)]
        search: Option<String>,
    },

    /// Show the detail view of one row
    Show { panel: String, id: String },

    /// Edit a row, e.g. `edit global expunge.delay value=3600`
    Edit {
        panel: String,
        id: String,
        /// Field values as key=value
        values: Vec<String>,
        /// Accept confirmation prompts
        #[arg(long)]
        yes: bool,
    },

    /// Add a row, e.g. `add ldap hostname=ldap.example.com port=389`
    Add {
        panel: String,
        /// Field values as key=value
        values: Vec<String>,
        #[arg(long)]
        yes: bool,
    },

    /// Remove a row
    Remove {
        panel: String,
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

/// Resolve a panel id or one of its short aliases.
pub fn parse_panel(name: &str) -> Result<ResourceType> {
    let alias = match name.to_ascii_lowercase().as_str() {
        "global" | "settings" => Some(ResourceType::GlobalSetting),
        "ldap" => Some(ResourceType::LdapConfiguration),
        "hypervisor" | "hypervisors" => Some(ResourceType::HypervisorCapability),
        _ => None,
    };
    alias
        .or_else(|| {
            ResourceType::ALL
                .into_iter()
                .find(|r| r.panel_id().eq_ignore_ascii_case(name))
        })
        .ok_or_else(|| {
            let known: Vec<&str> = ResourceType::ALL.iter().map(|r| r.panel_id()).collect();
            anyhow!("Unknown panel '{name}', expected one of: {}", known.join(", "))
        })
}

/// Parse `key=value` arguments. Values may contain `=`; a repeated key keeps the last value.
pub fn parse_values(args: &[String]) -> Result<FieldValues> {
    let mut values = FieldValues::new();
    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            bail!("Expected key=value, got '{arg}'");
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("Missing field name in '{arg}'");
        }
        values.insert(key.to_string(), value.to_string());
    }
    Ok(values)
}

/// Executes commands and prints their output.
pub struct Console {
    service: PanelService,
    l10n: Arc<dyn Localizer>,
    latest: LatestResponse,
}

impl Console {
    pub fn new(service: PanelService, l10n: Arc<dyn Localizer>) -> Self {
        Self {
            service,
            l10n,
            latest: LatestResponse::new(),
        }
    }

    fn nav(resource: ResourceType) -> NavigationContext {
        NavigationContext::new(GLOBAL_SETTINGS_SECTION).select(resource)
    }

    fn descriptor(&self, resource: ResourceType) -> Result<&PanelDescriptor> {
        Ok(self.service.context().registry.get(resource)?.descriptor())
    }

    fn confirmer(&self, yes: bool) -> Box<dyn Confirmer> {
        if yes {
            Box::new(AutoConfirm)
        } else {
            Box::new(TerminalConfirmer::new(Arc::clone(&self.l10n)))
        }
    }

    pub async fn execute(&self, command: Command) -> Result<String> {
        match command {
            Command::Sections => Ok(render::sections(
                &self.service.context().registry,
                self.l10n.as_ref(),
            )),
            Command::List { panel, page, search } => {
                let resource = parse_panel(&panel)?;
                let mut query = ListQuery::page(page);
                if let Some(search) = search {
                    query = query.search(search);
                }
                let response = self.service.list(&Self::nav(resource), &query).await?;
                let Some(rows) = self.latest.take(response) else {
                    return Ok(String::new());
                };
                Ok(render::table(
                    self.descriptor(resource)?,
                    &rows,
                    page,
                    self.l10n.as_ref(),
                ))
            }
            Command::Show { panel, id } => {
                let resource = parse_panel(&panel)?;
                let response = self.service.detail(&Self::nav(resource), &id).await?;
                let Some(row) = self.latest.take(response) else {
                    return Ok(String::new());
                };
                let descriptor = self.descriptor(resource)?;
                Ok(render::detail(
                    &descriptor.detail_fields,
                    &row,
                    self.l10n.as_ref(),
                ))
            }
            Command::Edit {
                panel,
                id,
                values,
                yes,
            } => {
                let resource = parse_panel(&panel)?;
                let values = parse_values(&values)?;
                let confirmer = self.confirmer(yes);
                let outcome = self
                    .service
                    .edit(&Self::nav(resource), &id, &values, confirmer.as_ref())
                    .await?;
                self.render_outcome(resource, &outcome)
            }
            Command::Add { panel, values, yes } => {
                let resource = parse_panel(&panel)?;
                let values = parse_values(&values)?;
                let confirmer = self.confirmer(yes);
                let outcome = self
                    .service
                    .add(&Self::nav(resource), &values, confirmer.as_ref())
                    .await?;
                self.render_outcome(resource, &outcome)
            }
            Command::Remove { panel, id, yes } => {
                let resource = parse_panel(&panel)?;
                let confirmer = self.confirmer(yes);
                let outcome = self
                    .service
                    .remove(&Self::nav(resource), &id, confirmer.as_ref())
                    .await?;
                self.render_outcome(resource, &outcome)
            }
        }
    }

    fn render_outcome(&self, resource: ResourceType, outcome: &ActionOutcome) -> Result<String> {
        Ok(render::outcome(
            self.descriptor(resource)?,
            outcome,
            self.l10n.as_ref(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cosmic_settings_api::{
        ApiError, ManagementClient, Operation, RemoteInvoker, RequestParams,
    };
    use cosmic_settings_core::i18n::EnglishCatalog;
    use cosmic_settings_core::{SectionRegistry, ServiceContext};
    use serde_json::{json, Value};

    /// Answers every list with an empty envelope and every mutation with an error.
    struct EmptyServer;

    #[async_trait]
    impl RemoteInvoker for EmptyServer {
        async fn invoke(
            &self,
            operation: Operation,
            _params: &RequestParams,
        ) -> Result<Value, ApiError> {
            if operation.name().starts_with("list") {
                Ok(json!({ operation.envelope(): {} }))
            } else {
                Err(ApiError::Api {
                    operation: operation.name().to_string(),
                    status: 530,
                    error_code: Some(530),
                    raw_message: "read only".to_string(),
                })
            }
        }
    }

    fn console() -> Console {
        let client = ManagementClient::new(Arc::new(EmptyServer));
        let registry = Arc::new(SectionRegistry::standard(&client).unwrap());
        let ctx = Arc::new(ServiceContext::with_default_page_size(registry));
        Console::new(PanelService::new(ctx), Arc::new(EnglishCatalog))
    }

    #[tokio::test]
    async fn sections_lists_every_panel() {
        let out = console().execute(Command::Sections).await.unwrap();
        assert!(out.starts_with("Global Settings (global-settings)"));
        assert!(out.contains("ldapConfiguration"));
        assert!(out.contains("[show, edit]"));
    }

    #[tokio::test]
    async fn empty_list_renders_no_items() {
        let out = console()
            .execute(Command::List {
                panel: "ldap".to_string(),
                page: 1,
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(out, "No Available Items\n");
    }

    #[tokio::test]
    async fn server_error_surfaces_as_error() {
        let res = console()
            .execute(Command::Edit {
                panel: "global".to_string(),
                id: "expunge.delay".to_string(),
                values: vec!["value=10".to_string()],
                yes: true,
            })
            .await;
        assert!(res.unwrap_err().to_string().contains("read only"));
    }

    #[test]
    fn aliases_and_ids_resolve() {
        assert_eq!(parse_panel("ldap").unwrap(), ResourceType::LdapConfiguration);
        assert_eq!(parse_panel("global").unwrap(), ResourceType::GlobalSetting);
        assert_eq!(
            parse_panel("hypervisor").unwrap(),
            ResourceType::HypervisorCapability
        );
        assert_eq!(
            parse_panel("hypervisorCapabilities").unwrap(),
            ResourceType::HypervisorCapability
        );
        assert_eq!(
            parse_panel("ldapconfiguration").unwrap(),
            ResourceType::LdapConfiguration
        );
    }

    #[test]
    fn unknown_panel_lists_known_ids() {
        let err = parse_panel("zones").unwrap_err().to_string();
        assert!(err.contains("globalSettings"));
        assert!(err.contains("hypervisorCapabilities"));
    }

    #[test]
    fn values_split_on_first_equals() {
        let values = parse_values(&[
            "hostname=ldap.example.com".to_string(),
            "value=a=b".to_string(),
            "empty=".to_string(),
        ])
        .unwrap();
        assert_eq!(values["hostname"], "ldap.example.com");
        assert_eq!(values["value"], "a=b");
        assert_eq!(values["empty"], "");
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(parse_values(&["port".to_string()]).is_err());
        assert!(parse_values(&["=389".to_string()]).is_err());
    }
}
