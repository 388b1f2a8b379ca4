use serde::Serialize;

use cosmic_settings_api::{ListPage, Row};

use super::panel::ResourceType;

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NoticeLevel {
    Info,
}

/// User-visible advisory produced by a successful action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub level: NoticeLevel,
    /// Message key, resolved by the host's localizer.
    pub message: &'static str,
}

impl Notice {
    pub const fn info(message: &'static str) -> Self {
        Self {
            level: NoticeLevel::Info,
            message,
        }
    }
}

/// Request from an action to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "resource", rename_all = "camelCase")]
pub enum HostSignal {
    /// Re-fetch the list of this panel.
    RefreshPanel(ResourceType),
    /// Re-fetch every panel of the section.
    FullRefresh,
}

/// Result of one dispatched (or declined) action.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionOutcome {
    /// `true` when the user declined confirmation; nothing was sent.
    pub cancelled: bool,
    /// Row as returned by the server, when the operation returns one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<Row>,
    pub notices: Vec<Notice>,
    pub signals: Vec<HostSignal>,
}

impl ActionOutcome {
    /// Outcome of a declined confirmation.
    pub fn cancelled() -> Self {
        Self {
            cancelled: true,
            ..Self::default()
        }
    }

    pub fn with_row(row: Row) -> Self {
        Self {
            row: Some(row),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }

    #[must_use]
    pub fn signal(mut self, signal: HostSignal) -> Self {
        self.signals.push(signal);
        self
    }
}

/// Page and optional substring filter for a list request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-indexed page number.
    pub page: u32,
    pub search: Option<String>,
}

impl ListQuery {
    pub fn page(page: u32) -> Self {
        Self { page, search: None }
    }

    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = (!search.trim().is_empty()).then_some(search);
        self
    }
}

/// One rendered page of rows.
pub type RowPage = ListPage<Row>;
