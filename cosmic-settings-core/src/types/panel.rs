//! Declarative panel descriptors

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{CoreError, CoreResult};

/// Resource types shown in the global settings section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceType {
    GlobalSetting,
    LdapConfiguration,
    HypervisorCapability,
}

impl ResourceType {
    /// All resource types, in selector order.
    pub const ALL: [Self; 3] = [
        Self::GlobalSetting,
        Self::LdapConfiguration,
        Self::HypervisorCapability,
    ];

    /// Panel identifier.
    pub const fn panel_id(self) -> &'static str {
        match self {
            Self::GlobalSetting => "globalSettings",
            Self::LdapConfiguration => "ldapConfiguration",
            Self::HypervisorCapability => "hypervisorCapabilities",
        }
    }
}

/// One column of a list or detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub key: &'static str,
    /// Message key of the column header.
    pub label: &'static str,
    pub editable: bool,
    /// Marks the field whose value identifies a row.
    pub identifier: bool,
    /// Carried in the row but not shown.
    pub hidden: bool,
    /// Long values may be shortened by the renderer.
    pub truncate: bool,
}

impl FieldSpec {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            editable: false,
            identifier: false,
            hidden: false,
            truncate: false,
        }
    }

    #[must_use]
    pub const fn identifier(mut self) -> Self {
        self.identifier = true;
        self
    }

    #[must_use]
    pub const fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    #[must_use]
    pub const fn truncate(mut self) -> Self {
        self.truncate = true;
        self
    }
}

/// Accepted shape of an input value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InputKind {
    Text,
    /// TCP port, `1..=65535`.
    Port,
    /// Non-negative integer.
    Count,
}

/// One form field of an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputField {
    pub key: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub kind: InputKind,
}

impl InputField {
    pub const fn required(key: &'static str, label: &'static str, kind: InputKind) -> Self {
        Self {
            key,
            label,
            required: true,
            kind,
        }
    }

    pub const fn optional(key: &'static str, label: &'static str, kind: InputKind) -> Self {
        Self {
            key,
            label,
            required: false,
            kind,
        }
    }
}

/// Row actions a panel may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionName {
    Edit,
    Add,
    Remove,
}

impl ActionName {
    /// Whether the action operates on an existing row.
    pub const fn needs_target(self) -> bool {
        matches!(self, Self::Edit | Self::Remove)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }
}

impl std::fmt::Display for ActionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared action of a panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionSpec {
    pub name: ActionName,
    pub label: &'static str,
    /// Message key of the confirmation prompt; the action is only dispatched once the user
    /// accepts it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<&'static str>,
    pub inputs: Vec<InputField>,
}

/// User-supplied form values, keyed by [`InputField::key`].
pub type FieldValues = BTreeMap<String, String>;

/// Everything a host needs to render one resource panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelDescriptor {
    pub resource: ResourceType,
    pub id: &'static str,
    pub label: &'static str,
    pub list_fields: Vec<FieldSpec>,
    /// Empty when the panel has no detail view.
    pub detail_fields: Vec<FieldSpec>,
    pub actions: Vec<ActionSpec>,
}

impl PanelDescriptor {
    /// The identifier field of the list view.
    pub fn identifier_field(&self) -> Option<&FieldSpec> {
        self.list_fields.iter().find(|f| f.identifier)
    }

    pub fn action(&self, name: ActionName) -> Option<&ActionSpec> {
        self.actions.iter().find(|a| a.name == name)
    }

    pub fn has_detail(&self) -> bool {
        !self.detail_fields.is_empty()
    }

    /// Check the structural rules every descriptor must satisfy.
    ///
    /// - exactly one list field is the row identifier
    /// - the identifier is the panel's resource id
    /// - list field keys are unique
    /// - each action is declared once
    /// - `remove` carries a confirmation prompt
    pub fn validate(&self) -> CoreResult<()> {
        let invalid = |reason: String| CoreError::InvalidDescriptor {
            panel: self.id.to_string(),
            reason,
        };

        if self.id != self.resource.panel_id() {
            return Err(invalid(format!(
                "id does not match resource type {:?}",
                self.resource
            )));
        }

        let identifiers = self.list_fields.iter().filter(|f| f.identifier).count();
        if identifiers != 1 {
            return Err(invalid(format!(
                "expected exactly one identifier field, found {identifiers}"
            )));
        }

        for (i, field) in self.list_fields.iter().enumerate() {
            if self.list_fields[..i].iter().any(|f| f.key == field.key) {
                return Err(invalid(format!("duplicate list field '{}'", field.key)));
            }
        }

        for (i, action) in self.actions.iter().enumerate() {
            if self.actions[..i].iter().any(|a| a.name == action.name) {
                return Err(invalid(format!("duplicate action '{}'", action.name)));
            }
            if action.name == ActionName::Remove && action.confirmation.is_none() {
                return Err(invalid("remove action without confirmation".to_string()));
            }
        }

        Ok(())
    }
}
