use serde::Serialize;

use super::panel::ResourceType;

/// Where the host currently is: which section, and which resource type it shows.
///
/// Passed explicitly into every service call; nothing in the core remembers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationContext {
    pub section: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<ResourceType>,
}

impl NavigationContext {
    pub fn new(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            selection: None,
        }
    }

    /// Same section, a different resource type selected.
    #[must_use]
    pub fn select(mut self, resource: ResourceType) -> Self {
        self.selection = Some(resource);
        self
    }

    /// Leave the selector without a selection.
    pub fn clear(&mut self) {
        self.selection = None;
    }
}
