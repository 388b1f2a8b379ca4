//! Resource panels
//!
//! Each panel pairs a static [`PanelDescriptor`] with the remote calls behind it. Panels are
//! stateless: every list or detail request fetches fresh rows.

mod global_settings;
mod hypervisor;
mod ldap;

pub use global_settings::GlobalSettingsPanel;
pub use hypervisor::HypervisorCapabilitiesPanel;
pub use ldap::LdapConfigurationPanel;

use async_trait::async_trait;
use serde::Serialize;

use cosmic_settings_api::{to_row, ListPage, Row};

use crate::error::{CoreError, CoreResult, ValidationReason};
use crate::types::{
    ActionName, ActionOutcome, FieldValues, InputField, InputKind, ListQuery, PanelDescriptor,
    RowPage,
};

/// One resource type's list, detail and actions.
///
/// Only `list` is mandatory; the other operations default to
/// [`CoreError::UnsupportedAction`] and are overridden by panels that declare them.
#[async_trait]
pub trait ResourcePanel: Send + Sync {
    /// Static description of this panel.
    fn descriptor(&self) -> &PanelDescriptor;

    /// Fetch one page of rows.
    async fn list(&self, query: &ListQuery, page_size: u32) -> CoreResult<RowPage>;

    /// Fetch one row by its identifier.
    async fn detail(&self, id: &str) -> CoreResult<Row> {
        let _ = id;
        Err(self.unsupported("detail"))
    }

    /// Apply `values` to an existing row.
    async fn edit(&self, id: &str, values: &FieldValues) -> CoreResult<ActionOutcome> {
        let _ = (id, values);
        Err(self.unsupported(ActionName::Edit.as_str()))
    }

    /// Create a row from `values`.
    async fn add(&self, values: &FieldValues) -> CoreResult<ActionOutcome> {
        let _ = values;
        Err(self.unsupported(ActionName::Add.as_str()))
    }

    /// Delete a row.
    async fn remove(&self, id: &str) -> CoreResult<ActionOutcome> {
        let _ = id;
        Err(self.unsupported(ActionName::Remove.as_str()))
    }

    #[doc(hidden)]
    fn unsupported(&self, action: &str) -> CoreError {
        CoreError::UnsupportedAction {
            panel: self.descriptor().id.to_string(),
            action: action.to_string(),
        }
    }
}

/// Convert a typed page into display rows.
pub(crate) fn rows<T: Serialize>(page: ListPage<T>) -> CoreResult<RowPage> {
    let items = page
        .items
        .iter()
        .map(to_row)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ListPage {
        items,
        count: page.count,
    })
}

/// Value of `field` after trimming; `None` when absent or blank.
pub(crate) fn input<'a>(values: &'a FieldValues, field: &InputField) -> Option<&'a str> {
    values
        .get(field.key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

/// Check one input against its declaration.
pub(crate) fn check_input(values: &FieldValues, field: &InputField) -> CoreResult<()> {
    let Some(value) = input(values, field) else {
        if field.required {
            return Err(CoreError::validation(
                field.key,
                field.label,
                ValidationReason::Required,
            ));
        }
        return Ok(());
    };

    match field.kind {
        InputKind::Text => Ok(()),
        InputKind::Port => parse_port(value).map(|_| ()).ok_or_else(|| {
            CoreError::validation(field.key, field.label, ValidationReason::InvalidPort)
        }),
        InputKind::Count => parse_count(value).map(|_| ()).ok_or_else(|| {
            CoreError::validation(field.key, field.label, ValidationReason::InvalidInteger)
        }),
    }
}

/// Check every input of an action, in declaration order.
pub(crate) fn check_inputs(values: &FieldValues, fields: &[InputField]) -> CoreResult<()> {
    fields.iter().try_for_each(|f| check_input(values, f))
}

/// Required text input.
pub(crate) fn required_text<'a>(
    values: &'a FieldValues,
    field: &InputField,
) -> CoreResult<&'a str> {
    check_input(values, field)?;
    input(values, field)
        .ok_or_else(|| CoreError::validation(field.key, field.label, ValidationReason::Required))
}

/// Required TCP port input.
pub(crate) fn required_port(values: &FieldValues, field: &InputField) -> CoreResult<u16> {
    let raw = required_text(values, field)?;
    parse_port(raw)
        .ok_or_else(|| CoreError::validation(field.key, field.label, ValidationReason::InvalidPort))
}

/// Required non-negative integer input.
pub(crate) fn required_count(values: &FieldValues, field: &InputField) -> CoreResult<i64> {
    let raw = required_text(values, field)?;
    parse_count(raw).ok_or_else(|| {
        CoreError::validation(field.key, field.label, ValidationReason::InvalidInteger)
    })
}

fn parse_port(raw: &str) -> Option<u16> {
    raw.parse::<u16>().ok().filter(|p| *p != 0)
}

fn parse_count(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|n| *n >= 0)
}
